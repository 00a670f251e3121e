//! Movement intent: ECS решает КУДА, physics provider решает КАК
//!
//! Архитектура:
//! - AI/player системы пишут MovementIntent (horizontal speed + jump request)
//! - Physics provider (движок или headless stand-in) читает и применяет к телу
//! - Вертикаль (гравитация) целиком на стороне physics provider

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Желаемая горизонтальная скорость (units/sec, знак = направление)
    pub horizontal: f32,
    /// Запрос прыжка: вертикальная скорость (one-shot, physics provider сбрасывает)
    pub jump_velocity: Option<f32>,
}

impl MovementIntent {
    pub fn stop(&mut self) {
        self.horizontal = 0.0;
        self.jump_velocity = None;
    }

    pub fn is_stationary(&self) -> bool {
        self.horizontal == 0.0 && self.jump_velocity.is_none()
    }
}
