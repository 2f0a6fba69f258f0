use chase_core::ChaseConfig;
use chase_shared::ChaseSettings;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Read, parse and validate a settings file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ChaseSettings, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: ChaseSettings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_settings(&settings)?;

    log::debug!("loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

/// Every distance must be finite and strictly positive.
pub fn validate_settings(settings: &ChaseSettings) -> Result<(), ConfigError> {
    let fields = [
        ("InitPosLimit", settings.terrain.init_pos_limit),
        ("SheepMoveDist", settings.movement.sheep_move_dist),
        ("WolfMoveDist", settings.movement.wolf_move_dist),
    ];
    for (name, value) in fields {
        if !(value.is_finite() && value > 0.0) {
            log::error!("{} - given value must be positive!", value);
            return Err(ConfigError::NotPositive { name, value });
        }
    }
    Ok(())
}

/// Combine file settings with the run-length options from the command line.
pub fn chase_config(settings: &ChaseSettings, sheep_count: usize, max_rounds: u32) -> ChaseConfig {
    ChaseConfig {
        sheep_count,
        init_pos_limit: settings.terrain.init_pos_limit,
        sheep_move_dist: settings.movement.sheep_move_dist,
        wolf_move_dist: settings.movement.wolf_move_dist,
        max_rounds,
    }
}
