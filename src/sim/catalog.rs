//! Tile shape catalog
//!
//! Defines the geometry and physics constants for each tile variant. The
//! values are hand-tuned for gameplay feel and are design-significant;
//! changing them changes how towers settle and topple.
//!
//! A kind's occupancy mask is derived from its canonical upright
//! silhouette. All three shipped kinds render as solid rectangles, so
//! their masks are fully occupied; the mask path still exists so that
//! kinds with transparent pixels collide correctly.

use serde::{Deserialize, Serialize};

use super::mask::Mask;

/// Identifier for a tile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKindId {
    /// Wide building block for foundations and walls (2x1 sprite tiles)
    Rectangle,
    /// Compact tile at native sprite size
    Square,
    /// Tall, narrow tile for bridges and supports (unstable on its own)
    Beam,
}

impl TileKindId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKindId::Rectangle => "rectangle",
            TileKindId::Square => "square",
            TileKindId::Beam => "beam",
        }
    }
}

/// Immutable catalog entry for a tile variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileKind {
    pub id: TileKindId,
    pub name: &'static str,
    /// Canonical pixel size (w, h)
    pub size: (u32, u32),
    pub mass: f32,
    /// Isotropic velocity damping per tick
    pub friction: f32,
    /// Bounce factor on ground impact
    pub restitution: f32,
}

/// Native sprite size; the Square kind uses it directly.
pub const SPRITE_TILE_SIZE: u32 = 96;

const RECTANGLE: TileKind = TileKind {
    id: TileKindId::Rectangle,
    name: "rectangle",
    size: (192, 96),
    mass: 1.5,
    friction: 0.98,
    restitution: 0.2,
};

const SQUARE: TileKind = TileKind {
    id: TileKindId::Square,
    name: "square",
    size: (SPRITE_TILE_SIZE, SPRITE_TILE_SIZE),
    mass: 0.8,
    friction: 0.98,
    restitution: 0.2,
};

const BEAM: TileKind = TileKind {
    id: TileKindId::Beam,
    name: "beam",
    size: (48, 192),
    mass: 0.8,
    friction: 0.96,
    restitution: 0.3,
};

impl TileKind {
    /// Look up a catalog entry by variant.
    pub fn of(id: TileKindId) -> &'static TileKind {
        match id {
            TileKindId::Rectangle => &RECTANGLE,
            TileKindId::Square => &SQUARE,
            TileKindId::Beam => &BEAM,
        }
    }

    /// Look up a catalog entry by name.
    ///
    /// An unknown name is a programmer error (the level catalog only
    /// references shipped kinds), so this panics rather than returning
    /// a recoverable error.
    pub fn get(name: &str) -> &'static TileKind {
        match name {
            "rectangle" => &RECTANGLE,
            "square" => &SQUARE,
            "beam" => &BEAM,
            other => panic!("unknown tile kind: {other:?}"),
        }
    }

    /// Generate the occupancy mask from the canonical silhouette.
    pub fn mask(&self) -> Mask {
        Mask::filled(self.size.0, self.size.1)
    }

    /// Pixel area of the canonical silhouette's bounding box.
    pub fn area(&self) -> f32 {
        (self.size.0 * self.size.1) as f32
    }
}
