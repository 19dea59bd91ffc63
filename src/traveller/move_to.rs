//! One-shot movement toward a single destination.

use bevy::prelude::*;

use crate::geometry::facing_rotation;

use super::{TravellerSettings, MIN_MOVE_SPEED};

/// Moves an entity in a straight line to a destination, turning to face it on
/// the way, then deactivates itself and emits [`MoveCompleted`].
///
/// An optional [`delay`](Self::delay) counts down before the move begins.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[require(Transform)]
#[reflect(Component, Default)]
pub struct MoveToLocation {
    pub start: Vec3,
    pub destination: Vec3,
    /// Speed in world units per second.
    pub speed: f32,
    /// Seconds left before the move begins.
    pub delay: f32,
    /// Whether the move is in progress (or waiting out its delay).
    pub active: bool,
    elapsed: f32,
    total_distance: f32,
    start_rotation: Quat,
    destination_rotation: Quat,
    position: Vec3,
    rotation: Quat,
}

impl MoveToLocation {
    /// Begin moving from `start` to `destination`.
    pub fn start_move(&mut self, start: Vec3, destination: Vec3, speed: f32, current_rotation: Quat) {
        self.start = start;
        self.destination = destination;
        self.speed = speed;
        self.start_rotation = current_rotation;
        self.destination_rotation = facing_rotation(start, destination);
        self.total_distance = start.distance(destination);
        self.elapsed = 0.0;
        self.position = start;
        self.rotation = current_rotation;
        self.active = true;
    }

    /// Wait `seconds` before the move begins.
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    /// Advance by `delta` seconds. Returns `true` on the frame the destination
    /// is reached.
    pub fn advance(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        if self.delay > 0.0 {
            self.delay -= delta;
            return false;
        }

        self.elapsed += delta;
        let travelled = self.elapsed * self.speed.max(MIN_MOVE_SPEED);
        let fraction = if self.total_distance <= f32::EPSILON {
            1.0
        } else {
            (travelled / self.total_distance).min(1.0)
        };

        self.position = self.start.lerp(self.destination, fraction);
        self.rotation = self.start_rotation.slerp(self.destination_rotation, fraction);

        if fraction >= 1.0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }
}

/// Message emitted when a [`MoveToLocation`] arrives.
#[derive(Message, Debug, Clone)]
pub struct MoveCompleted {
    pub entity: Entity,
}

/// System that drives all active [`MoveToLocation`] components.
///
/// Honors [`TravellerSettings`] the same way the traveller systems do.
pub fn update_move_to_location(
    settings: Res<TravellerSettings>,
    time: Res<Time>,
    mut movers: Query<(Entity, &mut MoveToLocation, &mut Transform)>,
    mut completed: MessageWriter<MoveCompleted>,
) {
    if !settings.enabled {
        return;
    }

    let delta = time.delta_secs() * settings.time_scale;

    for (entity, mut mover, mut transform) in &mut movers {
        if !mover.active {
            continue;
        }

        let arrived = mover.advance(delta);
        if mover.delay > 0.0 {
            continue;
        }

        transform.translation = mover.position();
        transform.rotation = mover.rotation();

        if arrived {
            completed.write(MoveCompleted { entity });
        }
    }
}
