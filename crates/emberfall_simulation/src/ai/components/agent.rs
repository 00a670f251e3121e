//! Agent component: FSM state, config, waypoints, target, periodic tasks.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clock::{AttackCooldown, PeriodicTask};
use crate::presentation::AnimatorParams;

/// Состояния агента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum AgentState {
    /// Отключен (после смерти): ни scan, ни движения, ни атак
    None,
    #[default]
    Idle,
    /// Patrol по waypoints
    Move,
    /// Цель в trigger range, ждём attack-range check
    TargetSpotted,
    Attack,
}

impl AgentState {
    /// Имя bool параметра аниматора для этого состояния
    pub fn animation_flag(&self) -> Option<&'static str> {
        match self {
            AgentState::None => None,
            AgentState::Idle => Some("Idle"),
            AgentState::Move => Some("Move"),
            AgentState::TargetSpotted => Some("TargetSpotted"),
            AgentState::Attack => Some("Attack"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum MovementType {
    #[default]
    HoldPosition,
    Patrol,
}

/// Параметры агента (задаются в level blueprint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Горизонтальная скорость (units/sec)
    pub speed: f32,
    /// Дистанция обнаружения цели (строго <)
    pub trigger_range: f32,
    /// Радиус атаки от attack_origin (включительно)
    pub attack_radius: f32,
    pub attack_cooldown_secs: f32,
    pub movement_type: MovementType,
    /// Куда переходим когда цель вышла из trigger range
    pub target_lost_state: AgentState,
    pub chase_target: bool,
    pub disable_flip: bool,
    /// Точка проверки attack radius (смещение для facing Right)
    pub attack_origin: [f32; 2],
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            trigger_range: 8.0,
            attack_radius: 1.5,
            attack_cooldown_secs: 1.0,
            movement_type: MovementType::HoldPosition,
            target_lost_state: AgentState::Idle,
            chase_target: true,
            disable_flip: false,
            attack_origin: [0.8, 0.0],
        }
    }
}

impl AgentConfig {
    pub fn attack_origin(&self) -> Vec2 {
        Vec2::from(self.attack_origin)
    }
}

/// Враждебный агент
///
/// Target: non-owning ссылка на entity игрока. Мёртвая или despawned цель
/// игнорируется (scan/attack-range check становятся no-op).
#[derive(Component, Debug, Clone)]
pub struct Agent {
    state: AgentState,
    pub config: AgentConfig,
    waypoints: Vec<Vec2>,
    waypoint_index: usize,
    pub target: Option<Entity>,
    pub cooldown: AttackCooldown,
    /// Периодический scan trigger range (живёт пока агент не None)
    pub scan_task: PeriodicTask,
    /// Периодический attack-range check (только в TargetSpotted)
    pub attack_check_task: PeriodicTask,
}

impl Agent {
    pub fn new(config: AgentConfig, waypoints: Vec<Vec2>, scan_interval_secs: f32) -> Self {
        let cooldown = AttackCooldown::new(config.attack_cooldown_secs);
        Self {
            state: AgentState::Idle,
            config,
            waypoints,
            waypoint_index: 0,
            target: None,
            cooldown,
            scan_task: PeriodicTask::new(scan_interval_secs),
            attack_check_task: PeriodicTask::new(scan_interval_secs),
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_disabled(&self) -> bool {
        self.state == AgentState::None
    }

    /// Смена состояния: флаг старого состояния → false, нового → true
    ///
    /// Возвращает true если состояние реально изменилось.
    pub fn change_state(&mut self, new_state: AgentState, animator: &mut AnimatorParams) -> bool {
        if let Some(flag) = self.state.animation_flag() {
            animator.set_bool(flag, false);
        }
        if let Some(flag) = new_state.animation_flag() {
            animator.set_bool(flag, true);
        }

        let changed = self.state != new_state;
        self.state = new_state;
        changed
    }

    /// Агент выключен навсегда (смерть): state None + стоп всех задач
    pub fn disable(&mut self, animator: &mut AnimatorParams) {
        self.change_state(AgentState::None, animator);
        self.scan_task.stop();
        self.attack_check_task.stop();
    }

    /// Нулевая скорость до конца жизни (цель мертва)
    pub fn halt(&mut self) {
        self.config.speed = 0.0;
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.waypoint_index).copied()
    }

    /// Следующий waypoint (циклически)
    pub fn advance_waypoint(&mut self) {
        if self.waypoints.is_empty() {
            return;
        }
        self.waypoint_index = (self.waypoint_index + 1) % self.waypoints.len();
    }
}
