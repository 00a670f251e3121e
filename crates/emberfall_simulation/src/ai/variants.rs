//! Attack variants: Ranged (лучник) и Melee (мечник)
//!
//! Закрытый набор вариантов за одним capability trait. FSM вызывает
//! `execute_attack` в Attack, `test_attack_range` из периодического check,
//! `track_target` каждый tick в TargetSpotted.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{Agent, AgentState};
use super::sensor;
use crate::combat::actions::{apply_direct_damage, LaunchProjectile, ProjectileSpec};
use crate::components::{Facing, MovementIntent};
use crate::health::Health;
use crate::presentation::{AnimatorParams, SpawnKind};

/// Мутабельное окружение агента на один tick
pub struct AgentContext<'a> {
    pub now: f64,
    pub entity: Entity,
    pub position: Vec2,
    pub facing: &'a mut Facing,
    pub intent: &'a mut MovementIntent,
    pub animator: &'a mut AnimatorParams,
    /// Снаряды, запрошенные за tick (система отправит LaunchProjectile)
    pub launches: &'a mut Vec<LaunchProjectile>,
    pub waypoint_epsilon: f32,
}

impl AgentContext<'_> {
    /// Повернуться к точке (toggle facing); no-op при disable_flip
    pub fn turn_to(&mut self, target_x: f32, disable_flip: bool) {
        if disable_flip {
            return;
        }
        if let Some(side) = Facing::towards(self.position.x, target_x) {
            if side != *self.facing {
                self.facing.flip();
            }
        }
    }

    /// Движение вперёд по facing
    pub fn move_forward(&mut self, speed: f32) {
        self.intent.horizontal = self.facing.sign() * speed;
    }

    /// Мировая позиция смещения, заданного для facing Right
    pub fn local_point(&self, offset: Vec2) -> Vec2 {
        self.position + self.facing.mirror(offset)
    }
}

/// Цель агента на один tick
pub struct TargetView<'a> {
    pub entity: Entity,
    pub position: Vec2,
    pub health: &'a mut Health,
}

/// Capability trait варианта атаки
pub trait AttackBehavior {
    /// Тело состояния Attack (цель может отсутствовать)
    fn execute_attack(
        &self,
        agent: &mut Agent,
        ctx: &mut AgentContext,
        target: Option<&mut TargetView>,
    );

    /// Решение TargetSpotted → Attack
    fn test_attack_range(&self, agent: &mut Agent, ctx: &mut AgentContext, target: &mut TargetView);

    /// Дополнительная логика TargetSpotted каждый tick
    fn track_target(&self, _agent: &mut Agent, _ctx: &mut AgentContext, _target: &mut TargetView) {}

    /// Сколько труп остаётся в мире до despawn
    fn corpse_linger_secs(&self) -> f32 {
        0.0
    }

    /// One-shot клип смерти
    fn death_clip(&self) -> Option<&'static str> {
        None
    }
}

/// Лучник: стреляет пока цель в trigger range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedAttack {
    /// Точка вылета стрелы (смещение для facing Right)
    pub shoot_point: [f32; 2],
    pub projectile: ProjectileSpec,
}

impl Default for RangedAttack {
    fn default() -> Self {
        Self {
            shoot_point: [0.6, 0.5],
            projectile: ProjectileSpec::arrow(),
        }
    }
}

impl AttackBehavior for RangedAttack {
    fn execute_attack(
        &self,
        agent: &mut Agent,
        ctx: &mut AgentContext,
        target: Option<&mut TargetView>,
    ) {
        ctx.intent.stop();

        let target_alive = target.is_some_and(|target| target.health.is_alive());
        if !target_alive {
            agent.change_state(AgentState::Idle, ctx.animator);
            return;
        }

        if !agent.cooldown.is_ready(ctx.now) {
            return;
        }

        let launch = LaunchProjectile {
            owner: ctx.entity,
            kind: SpawnKind::Arrow,
            spec: self.projectile,
            position: ctx.local_point(Vec2::from(self.shoot_point)),
            facing: *ctx.facing,
        };
        crate::log(&format!(
            "🏹 {:?} shoots arrow at {:?} (facing {:?})",
            ctx.entity, launch.position, launch.facing
        ));
        ctx.launches.push(launch);
        agent.cooldown.mark(ctx.now);
    }

    /// Вход в Attack определяется только trigger range
    fn test_attack_range(&self, agent: &mut Agent, ctx: &mut AgentContext, target: &mut TargetView) {
        if sensor::in_trigger_range(ctx.position, target.position, agent.config.trigger_range) {
            ctx.turn_to(target.position.x, agent.config.disable_flip);
            agent.change_state(AgentState::Attack, ctx.animator);
        } else {
            agent.change_state(AgentState::TargetSpotted, ctx.animator);
        }
    }
}

/// Мечник: сближение до attack radius + прямой урон
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeAttack {
    pub damage: i32,
    /// Длительность death анимации перед despawn
    pub corpse_linger_secs: f32,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            damage: 15,
            corpse_linger_secs: 1.5,
        }
    }
}

impl AttackBehavior for MeleeAttack {
    fn execute_attack(
        &self,
        agent: &mut Agent,
        ctx: &mut AgentContext,
        target: Option<&mut TargetView>,
    ) {
        let target = match target {
            Some(target) if target.health.is_alive() => target,
            _ => {
                agent.change_state(AgentState::Idle, ctx.animator);
                agent.halt();
                ctx.intent.stop();
                return;
            }
        };

        ctx.move_forward(agent.config.speed);

        if agent.cooldown.is_ready(ctx.now) {
            crate::log(&format!(
                "⚔️ {:?} hits {:?} for {}",
                ctx.entity, target.entity, self.damage
            ));
            apply_direct_damage(target.health, self.damage);
            agent.cooldown.mark(ctx.now);
        }
    }

    /// Chase disabled → Attack сразу, без проверки радиуса
    fn test_attack_range(&self, agent: &mut Agent, ctx: &mut AgentContext, target: &mut TargetView) {
        let origin = ctx.local_point(agent.config.attack_origin());

        if sensor::in_attack_radius(origin, target.position, agent.config.attack_radius) {
            agent.change_state(AgentState::Attack, ctx.animator);
            return;
        }

        ctx.turn_to(target.position.x, agent.config.disable_flip);
        if agent.config.chase_target {
            ctx.move_forward(agent.config.speed);
        } else {
            agent.change_state(AgentState::Attack, ctx.animator);
        }
    }

    fn track_target(&self, agent: &mut Agent, ctx: &mut AgentContext, target: &mut TargetView) {
        self.test_attack_range(agent, ctx, target);
    }

    fn corpse_linger_secs(&self) -> f32 {
        self.corpse_linger_secs
    }

    fn death_clip(&self) -> Option<&'static str> {
        Some("Death")
    }
}

/// Вариант агента (отдельный component рядом с Agent)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentVariant {
    Ranged(RangedAttack),
    Melee(MeleeAttack),
}

impl AgentVariant {
    fn behavior(&self) -> &dyn AttackBehavior {
        match self {
            AgentVariant::Ranged(ranged) => ranged,
            AgentVariant::Melee(melee) => melee,
        }
    }
}

impl AttackBehavior for AgentVariant {
    fn execute_attack(
        &self,
        agent: &mut Agent,
        ctx: &mut AgentContext,
        target: Option<&mut TargetView>,
    ) {
        self.behavior().execute_attack(agent, ctx, target);
    }

    fn test_attack_range(&self, agent: &mut Agent, ctx: &mut AgentContext, target: &mut TargetView) {
        self.behavior().test_attack_range(agent, ctx, target);
    }

    fn track_target(&self, agent: &mut Agent, ctx: &mut AgentContext, target: &mut TargetView) {
        self.behavior().track_target(agent, ctx, target);
    }

    fn corpse_linger_secs(&self) -> f32 {
        self.behavior().corpse_linger_secs()
    }

    fn death_clip(&self) -> Option<&'static str> {
        self.behavior().death_clip()
    }
}
