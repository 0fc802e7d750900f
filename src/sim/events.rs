//! Outbound simulation events
//!
//! The core never holds a reference into the animation or rendering
//! subsystems. Anything cosmetic (rotation tweens, explosions, wind
//! streaks, placement feedback) is emitted here as a fire-and-forget
//! event and drained by the external animator each frame. Events carry
//! tile identity, never tile references.

use glam::Vec2;

use crate::consts::MAX_VISUAL_ROTATION;

/// Default duration for cosmetic rotation tweens (seconds).
pub const ROTATION_TWEEN_DURATION: f32 = 0.8;

/// A notification from the simulation to its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Request a cosmetic rotation tween for a tile. `target_deg` is
    /// already clamped to the ±45° visual cap.
    RotationRequest {
        tile_id: u32,
        target_deg: f32,
        duration: f32,
    },
    /// A tile was committed to the build area.
    TilePlaced { pos: Vec2 },
    /// The wrecking ball struck a tile.
    WreckingBallImpact { pos: Vec2 },
    /// A meteorite exploded against a tile.
    MeteoriteExplosion { pos: Vec2 },
    /// Spawn wind streak particles around a tile being pushed.
    WindGust { pos: Vec2, direction: f32 },
}

/// Buffer of pending events, drained by the frontend once per frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Emit a rotation request, clamping the target to the visual cap.
    pub fn push_rotation(&mut self, tile_id: u32, target_deg: f32) {
        self.events.push(GameEvent::RotationRequest {
            tile_id,
            target_deg: target_deg.clamp(-MAX_VISUAL_ROTATION, MAX_VISUAL_ROTATION),
            duration: ROTATION_TWEEN_DURATION,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_request_is_clamped() {
        let mut queue = EventQueue::new();
        queue.push_rotation(7, 90.0);
        queue.push_rotation(7, -120.0);
        queue.push_rotation(7, 30.0);

        let events = queue.drain();
        let targets: Vec<f32> = events
            .iter()
            .map(|e| match e {
                GameEvent::RotationRequest { target_deg, .. } => *target_deg,
                _ => panic!("expected rotation request"),
            })
            .collect();
        assert_eq!(targets, vec![45.0, -45.0, 30.0]);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::TilePlaced {
            pos: Vec2::new(1.0, 2.0),
        });
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain().len(), 1);
        assert!(queue.is_empty());
    }
}
