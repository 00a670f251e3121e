//! Базовые компоненты акторов: Player, SimulationEntity, Facing

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker component для player-controlled entity
///
/// Агенты таргетят только entity с этим маркером.
/// AI systems используют `Without<Agent>` для цели, input systems: `With<Player>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker: entity принадлежит текущей симуляции (удаляется при restart)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SimulationEntity;

/// Ориентация в 2D side-scroller (поворот на 180° вокруг Y в движке)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 вправо, -1 влево
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    pub fn flip(&mut self) {
        *self = self.flipped();
    }

    /// Сторона точки `to_x` относительно `from_x` (None: ровно на одной вертикали)
    pub fn towards(from_x: f32, to_x: f32) -> Option<Self> {
        let dx = to_x - from_x;
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Смещение, заданное для facing Right, зеркалится по X
    pub fn mirror(&self, offset: Vec2) -> Vec2 {
        Vec2::new(offset.x * self.sign(), offset.y)
    }
}
