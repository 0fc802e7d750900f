//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock-driven ticks with a bounded delta
//! - Seeded RNG only
//! - Stable iteration order (placed-tile vector order)
//! - No rendering or platform dependencies
//!
//! Collision and support detection always use a tile's canonical upright
//! mask; cosmetic rotation never feeds back into physics.

pub mod catalog;
pub mod events;
pub mod hazard;
pub mod mask;
pub mod placement;
pub mod state;
pub mod support;
pub mod tick;
pub mod tile;

pub use catalog::{TileKind, TileKindId};
pub use events::{EventQueue, GameEvent};
pub use hazard::{Hazard, HazardPhase, HazardSchedule};
pub use mask::{Aabb, Mask};
pub use placement::PlacementController;
pub use state::{GameOutcome, GamePhase, GameState};
pub use support::{SupportClass, classify_support, resolve_tile_collision};
pub use tick::{TickInput, tick};
pub use tile::TileInstance;
