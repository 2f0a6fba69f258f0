//! Command-line driver for the wolf-and-sheep chase: settings files, reporting
//! and the round loop.

pub mod config;
pub mod report;

pub use config::{chase_config, load_settings, validate_settings, ConfigError};
pub use report::{AliveReporter, ConsoleReporter, PositionReporter, Reporter};

use chase_core::{Chase, Termination};
use rand::Rng;
use std::io;

/// Play `chase` to the end, handing every round to each reporter.
///
/// `pause` runs after a round has been reported and before the next one starts.
pub fn run_chase<R, P>(
    chase: &mut Chase<R>,
    reporters: &mut [Box<dyn Reporter>],
    mut pause: P,
) -> io::Result<Termination>
where
    R: Rng,
    P: FnMut() -> io::Result<()>,
{
    log::info!("New simulation");
    loop {
        if let Some(round) = chase.next_round() {
            for reporter in reporters.iter_mut() {
                reporter.round_started(round, chase.wolf())?;
            }
        }
        let Some(report) = chase.step() else {
            break;
        };
        for reporter in reporters.iter_mut() {
            reporter.round_finished(&report)?;
        }
        pause()?;
    }

    let termination = chase.termination().unwrap_or(Termination::RoundLimit);
    log::info!(
        "simulation ended after {} rounds: {:?}",
        chase.round(),
        termination
    );
    for reporter in reporters.iter_mut() {
        reporter.finished(termination)?;
    }
    Ok(termination)
}
