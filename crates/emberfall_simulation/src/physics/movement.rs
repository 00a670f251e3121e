//! Headless kinematic контроллер (2D side-scroller)
//!
//! Архитектура:
//! - MovementIntent (AI/player) → velocity: горизонталь + one-shot jump
//! - Custom velocity integration + gravity
//! - Ground check: плоскость y = GROUND_Y (уровни без рельефа)
//!
//! Stand-in для physics provider движка: тот же контракт (читаем intent,
//! пишем Transform + grounded), без коллизий между телами.

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::components::MovementIntent;

/// Высота пола
pub const GROUND_Y: f32 = 0.0;

/// Kinematic тело актора
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicBody {
    pub velocity: Vec2,
    /// Сила гравитации (units/s²)
    pub gravity: f32,
    /// На земле ли тело (пишется ground_detection)
    pub grounded: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity: -25.0,
            grounded: true,
        }
    }
}

/// Система: intent → velocity
///
/// Jump request one-shot: забираем из intent.
pub fn apply_movement_intent(mut query: Query<(&mut MovementIntent, &mut KinematicBody)>) {
    for (mut intent, mut body) in query.iter_mut() {
        body.velocity.x = intent.horizontal;

        if let Some(jump_velocity) = intent.jump_velocity.take() {
            body.velocity.y = jump_velocity;
            body.grounded = false;
        }
    }
}

/// Система: гравитация только в воздухе
pub fn apply_gravity(mut query: Query<&mut KinematicBody>, clock: Res<SimClock>) {
    let delta = clock.step_secs() as f32;

    for mut body in query.iter_mut() {
        if !body.grounded {
            body.velocity.y += body.gravity * delta;
        }
    }
}

/// Система: velocity → Transform (position += velocity * dt)
pub fn integrate_velocity_to_transform(
    mut query: Query<(&KinematicBody, &mut Transform)>,
    clock: Res<SimClock>,
) {
    let delta = clock.step_secs() as f32;

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity.extend(0.0) * delta;
    }
}

/// Система: ground detection через Y-проверку
///
/// Тело ниже пола возвращается на пол, вертикальная скорость гасится.
pub fn ground_detection(mut query: Query<(&mut Transform, &mut KinematicBody)>) {
    for (mut transform, mut body) in query.iter_mut() {
        if transform.translation.y <= GROUND_Y && body.velocity.y <= 0.0 {
            transform.translation.y = GROUND_Y;
            body.velocity.y = 0.0;
            body.grounded = true;
        } else {
            body.grounded = false;
        }
    }
}
