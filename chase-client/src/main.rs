use anyhow::{Context, Result};
use chase_client::report::{output_path, ALIVE_FILE, LOG_FILE, POSITIONS_FILE};
use chase_client::{
    chase_config, load_settings, run_chase, AliveReporter, ConsoleReporter, PositionReporter,
    Reporter,
};
use chase_core::Chase;
use chase_shared::ChaseSettings;
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Wolf chasing a herd of sheep", long_about = None)]
struct Args {
    /// Settings file with [Terrain] and [Movement] sections
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory where pos.json, alive.csv and chase.log are saved
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Log events at this level to chase.log
    #[arg(short, long, value_name = "LEVEL", value_enum, ignore_case = true)]
    log: Option<LogLevel>,

    /// Number of rounds in the simulation
    #[arg(short, long, value_name = "NUMBER", default_value_t = 50,
          value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,

    /// Number of sheep in the simulation
    #[arg(short, long, value_name = "NUMBER", default_value_t = 15,
          value_parser = clap::value_parser!(u32).range(1..))]
    sheep: u32,

    /// Wait for Enter after every round
    #[arg(short, long)]
    wait: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

fn init_logging(level: Option<LogLevel>, dir: Option<&Path>) -> Result<()> {
    match level {
        Some(level) => {
            let path = output_path(dir, LOG_FILE);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            env_logger::Builder::new()
                .filter_level(level.into())
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
    }
    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    print!("Press enter to continue...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let dir = args.dir.as_deref();
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    init_logging(args.log, dir)?;

    let settings = match &args.config {
        Some(path) => load_settings(path).context("Invalid configuration")?,
        None => ChaseSettings::default(),
    };
    let config = chase_config(&settings, args.sheep as usize, args.rounds);
    log::debug!("configuration: {:?}", config);

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("Seed: {}", seed);

    let mut reporters: Vec<Box<dyn Reporter>> = vec![
        Box::new(ConsoleReporter::new(io::stdout())),
        Box::new(PositionReporter::new(output_path(dir, POSITIONS_FILE))),
        Box::new(
            AliveReporter::create(output_path(dir, ALIVE_FILE))
                .context("Failed to create alive count file")?,
        ),
    ];

    let mut chase = Chase::new(config, ChaCha8Rng::seed_from_u64(seed));
    let wait = args.wait;
    run_chase(&mut chase, &mut reporters, || {
        if wait {
            wait_for_enter()
        } else {
            Ok(())
        }
    })
    .context("Simulation error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        let cases = [
            (LogLevel::Debug, log::LevelFilter::Debug),
            (LogLevel::Info, log::LevelFilter::Info),
            (LogLevel::Warning, log::LevelFilter::Warn),
            (LogLevel::Error, log::LevelFilter::Error),
            (LogLevel::Critical, log::LevelFilter::Error),
        ];
        for (level, expected) in cases {
            assert_eq!(log::LevelFilter::from(level), expected);
        }
    }

    #[test]
    fn test_log_level_parses_uppercase_names() {
        let args = Args::try_parse_from(["chase", "-l", "CRITICAL"]).unwrap();
        assert!(matches!(args.log, Some(LogLevel::Critical)));
        let args = Args::try_parse_from(["chase", "--log", "WARNING"]).unwrap();
        assert!(matches!(args.log, Some(LogLevel::Warning)));
        assert!(Args::try_parse_from(["chase", "-l", "VERBOSE"]).is_err());
    }

    #[test]
    fn test_rounds_and_sheep_must_be_positive() {
        assert!(Args::try_parse_from(["chase", "-r", "0"]).is_err());
        assert!(Args::try_parse_from(["chase", "-s", "0"]).is_err());
        let args = Args::try_parse_from(["chase"]).unwrap();
        assert_eq!((args.rounds, args.sheep), (50, 15));
    }
}
