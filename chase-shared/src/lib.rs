#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Terrain section of the settings file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TerrainSettings {
    /// Sheep start within `[-limit, limit]` on both axes
    #[serde(rename = "InitPosLimit")]
    pub init_pos_limit: f64,
}

/// Movement section of the settings file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MovementSettings {
    #[serde(rename = "SheepMoveDist")]
    pub sheep_move_dist: f64,
    #[serde(rename = "WolfMoveDist")]
    pub wolf_move_dist: f64,
}

/// Contents of a chase settings file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChaseSettings {
    #[serde(rename = "Terrain")]
    pub terrain: TerrainSettings,
    #[serde(rename = "Movement")]
    pub movement: MovementSettings,
}

impl Default for ChaseSettings {
    fn default() -> Self {
        Self {
            terrain: TerrainSettings {
                init_pos_limit: 10.0,
            },
            movement: MovementSettings {
                sheep_move_dist: 0.5,
                wolf_move_dist: 1.0,
            },
        }
    }
}

/// One entry of the per-round position dump.
///
/// Dead sheep serialize as `null` so every slot keeps its index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    pub round_no: u32,
    pub wolf_pos: [f64; 2],
    pub sheep_pos: Vec<Option<[f64; 2]>>,
}

/// One row of the alive-count table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliveRecord {
    pub round: u32,
    pub alive: usize,
}

impl AliveRecord {
    pub const HEADER: [&'static str; 2] = ["Round number", "Number of alive sheep"];
}

/// Formats as a CSV row matching `HEADER`
impl core::fmt::Display for AliveRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.round, self.alive)
    }
}

/// Write round records as a JSON array indented by four spaces
#[cfg(feature = "std")]
pub fn write_round_records<W: std::io::Write>(
    writer: W,
    records: &[RoundRecord],
) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    records.serialize(&mut serializer)
}
