//! Headless physics provider
//!
//! Kinematic движение по MovementIntent + trigger overlaps.
//! В движке эту роль играет его physics (ECS видит только тот же контракт).

use bevy::prelude::*;

pub mod movement;
pub mod overlap;

// Re-export основных типов
pub use movement::{KinematicBody, GROUND_Y};
pub use overlap::{ActiveOverlaps, Collider, OverlapEvent, TriggerZone};

use crate::SimulationSet;

/// Plugin headless physics
///
/// Порядок выполнения (SimulationSet::Physics):
/// 1. apply_movement_intent: intent прошлого tick → velocity
/// 2. apply_gravity
/// 3. integrate_velocity_to_transform
/// 4. ground_detection
/// 5. move_projectiles (combat): снаряды летят по прямой
/// 6. detect_overlaps: OverlapEvent для hazards/pickups/projectiles
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<OverlapEvent>()
            .init_resource::<ActiveOverlaps>()
            .add_systems(
                FixedUpdate,
                (
                    movement::apply_movement_intent,
                    movement::apply_gravity,
                    movement::integrate_velocity_to_transform,
                    movement::ground_detection,
                    crate::combat::projectile::move_projectiles,
                    overlap::detect_overlaps,
                )
                    .chain()
                    .in_set(SimulationSet::Physics),
            );
    }
}
