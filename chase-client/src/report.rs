use chase_core::{EventKind, RoundReport, Snapshot, Termination, Wolf};
use chase_shared::{write_round_records, AliveRecord, RoundRecord};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const POSITIONS_FILE: &str = "pos.json";
pub const ALIVE_FILE: &str = "alive.csv";
pub const LOG_FILE: &str = "chase.log";

/// `name` inside `dir`, or in the working directory when no dir was given.
pub fn output_path(dir: Option<&Path>, name: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Receives the outcome of every round
pub trait Reporter {
    /// Called with the wolf's position as it was before the round ran
    fn round_started(&mut self, _round: u32, _wolf: &Wolf) -> io::Result<()> {
        Ok(())
    }

    fn round_finished(&mut self, report: &RoundReport) -> io::Result<()>;

    fn finished(&mut self, _termination: Termination) -> io::Result<()> {
        Ok(())
    }
}

/// Human-readable round summaries, mirrored into the log
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: String) -> io::Result<()> {
        log::info!("{}", text);
        writeln!(self.out, "{}", text)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn round_started(&mut self, round: u32, wolf: &Wolf) -> io::Result<()> {
        self.line(format!("Round number: {}", round))?;
        self.line(format!(
            "Wolf position: {:.3}, {:.3}",
            wolf.position.x, wolf.position.y
        ))
    }

    fn round_finished(&mut self, report: &RoundReport) -> io::Result<()> {
        let verb = match report.event.kind {
            EventKind::Captured => "ate",
            EventKind::Pursued => "chose",
        };
        self.line(format!("Wolf {} sheep with index: {}", verb, report.event.index))?;
        self.line(format!("Alive sheep: {}", report.alive))
    }

    fn finished(&mut self, termination: Termination) -> io::Result<()> {
        if termination == Termination::Extinction {
            self.line("Wolf ate all sheep. The end of simulation.".to_string())?;
        }
        self.out.flush()
    }
}

pub fn round_record(snapshot: &Snapshot) -> RoundRecord {
    RoundRecord {
        round_no: snapshot.round,
        wolf_pos: [snapshot.wolf.x, snapshot.wolf.y],
        sheep_pos: snapshot
            .sheep
            .iter()
            .map(|slot| slot.map(|p| [p.x, p.y]))
            .collect(),
    }
}

/// Collects every snapshot and dumps them as one JSON array when the run ends
pub struct PositionReporter {
    path: PathBuf,
    records: Vec<RoundRecord>,
}

impl PositionReporter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
}

impl Reporter for PositionReporter {
    fn round_finished(&mut self, report: &RoundReport) -> io::Result<()> {
        self.records.push(round_record(&report.snapshot));
        Ok(())
    }

    fn finished(&mut self, _termination: Termination) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(&self.path)?);
        write_round_records(&mut file, &self.records)?;
        file.flush()?;
        log::debug!(
            "wrote {} rounds to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Alive-count table, one row appended per round
pub struct AliveReporter {
    file: BufWriter<File>,
}

impl AliveReporter {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut file = BufWriter::new(File::create(path)?);
        writeln!(file, "{}", AliveRecord::HEADER.join(","))?;
        file.flush()?;
        Ok(Self { file })
    }
}

impl Reporter for AliveReporter {
    fn round_finished(&mut self, report: &RoundReport) -> io::Result<()> {
        let record = AliveRecord {
            round: report.snapshot.round,
            alive: report.alive,
        };
        writeln!(self.file, "{}", record)?;
        self.file.flush()
    }
}
