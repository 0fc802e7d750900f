//! Level catalog
//!
//! Three built-in levels plus a JSON loader for custom ones. A level is
//! pure data: the tile allotment, the target height, and the hazard
//! timeline. Everything that interprets this data lives in [`crate::sim`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::catalog::{TileKind, TileKindId};

/// Hazard configuration entry in a level's timeline. Trigger times are
/// seconds from the start of the simulation phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardSpec {
    WreckingBall {
        trigger_time: f32,
    },
    Wind {
        trigger_time: f32,
        duration: f32,
    },
    MeteoriteShower {
        trigger_time: f32,
        duration: f32,
    },
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("unknown level id {0}")]
    UnknownLevel(u32),
    #[error("malformed level definition: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One level: scenario text, tile allotment, win condition, hazards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub name: String,
    pub objective: String,
    /// Height in pixels the tower must reach to win
    pub target_height: f32,
    /// Allotment as (kind, count) pairs; strip order follows this list
    pub tiles: Vec<(TileKindId, u32)>,
    pub hazards: Vec<HazardSpec>,
}

impl LevelConfig {
    /// Built-in level by 1-based id.
    pub fn by_id(id: u32) -> Result<LevelConfig, LevelError> {
        builtin_levels()
            .into_iter()
            .find(|level| level.id == id)
            .ok_or(LevelError::UnknownLevel(id))
    }

    /// Parse a level from its JSON representation.
    pub fn from_json(json: &str) -> Result<LevelConfig, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Expand the allotment into one catalog entry per strip slot, in
    /// allotment order.
    pub fn tile_allotment(&self) -> impl Iterator<Item = &'static TileKind> + '_ {
        self.tiles
            .iter()
            .flat_map(|&(kind, count)| (0..count).map(move |_| TileKind::of(kind)))
    }

    /// Total number of tiles the level hands out.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().map(|&(_, count)| count as usize).sum()
    }
}

/// The shipped campaign.
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig {
            id: 1,
            name: "Earth".into(),
            objective: "Build a tower 400px tall and survive the wrecking ball".into(),
            target_height: 400.0,
            tiles: vec![
                (TileKindId::Rectangle, 2),
                (TileKindId::Beam, 2),
                (TileKindId::Square, 2),
            ],
            hazards: vec![HazardSpec::WreckingBall { trigger_time: 2.0 }],
        },
        LevelConfig {
            id: 2,
            name: "Jupiter".into(),
            objective: "Build a tower 500px tall and survive the wind".into(),
            target_height: 500.0,
            tiles: vec![
                (TileKindId::Rectangle, 3),
                (TileKindId::Beam, 3),
                (TileKindId::Square, 1),
            ],
            hazards: vec![HazardSpec::Wind {
                trigger_time: 1.5,
                duration: 4.0,
            }],
        },
        LevelConfig {
            id: 3,
            name: "Mars".into(),
            objective: "Build a tower 650px tall and survive the meteorite shower".into(),
            target_height: 650.0,
            tiles: vec![
                (TileKindId::Square, 2),
                (TileKindId::Rectangle, 3),
                (TileKindId::Beam, 4),
            ],
            hazards: vec![HazardSpec::MeteoriteShower {
                trigger_time: 1.0,
                duration: 6.0,
            }],
        },
    ]
}
