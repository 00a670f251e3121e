//! Strike/cast таймеры игрока
//!
//! Каждое действие: Ready → Active (до cue конца анимации) → Cooldown до `cooldown_expires`.
//! Старт разрешён только при `now > cooldown_expires` (строго).

use bevy::prelude::*;

use super::components::ManaPool;
use crate::clock::PeriodicTask;
use crate::presentation::AnimatorParams;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionTimer {
    /// Some(start time) пока действие активно
    started_at: Option<f64>,
    /// None: ни разу не использовалось
    cooldown_expires: Option<f64>,
}

impl ActionTimer {
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn cooldown_expires(&self) -> Option<f64> {
        self.cooldown_expires
    }

    pub fn can_start(&self, now: f64) -> bool {
        !self.is_active() && self.cooldown_expires.map_or(true, |expires| now > expires)
    }

    fn begin(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    fn end(&mut self, now: f64, cooldown_secs: f32) {
        self.started_at = None;
        self.cooldown_expires = Some(now + f64::from(cooldown_secs));
    }

    fn cancel(&mut self) {
        self.started_at = None;
    }
}

/// Действия игрока: strike, cast, mana regen
#[derive(Component, Debug, Clone)]
pub struct PlayerActions {
    pub strike: ActionTimer,
    pub cast: ActionTimer,
    pub regen_task: PeriodicTask,
    /// После смерти regen не возобновляется
    pub regen_stopped: bool,
    /// false после смерти: input игнорируется
    pub can_move: bool,
}

impl PlayerActions {
    pub fn new(mana_regen_interval_secs: f32) -> Self {
        Self {
            strike: ActionTimer::default(),
            cast: ActionTimer::default(),
            regen_task: PeriodicTask::new(mana_regen_interval_secs),
            regen_stopped: false,
            can_move: true,
        }
    }

    /// Strike: только на земле, не во время strike, после cooldown
    pub fn try_start_strike(&mut self, now: f64, grounded: bool, animator: &mut AnimatorParams) -> bool {
        if !grounded || !self.strike.can_start(now) {
            return false;
        }
        self.strike.begin(now);
        animator.set_bool("Strike", true);
        true
    }

    pub fn end_strike(&mut self, now: f64, cooldown_secs: f32, animator: &mut AnimatorParams) {
        self.strike.end(now, cooldown_secs);
        animator.set_bool("Strike", false);
    }

    /// Cast: на земле, без движения, хватает mana, после cooldown; mana списывается сразу
    pub fn try_start_cast(
        &mut self,
        now: f64,
        grounded: bool,
        stationary: bool,
        cost: i32,
        mana: &mut ManaPool,
        animator: &mut AnimatorParams,
    ) -> bool {
        if !grounded || !stationary || !mana.can_afford(cost) || !self.cast.can_start(now) {
            return false;
        }
        mana.change(-cost);
        self.cast.begin(now);
        animator.set_bool("Casting", true);
        true
    }

    pub fn end_cast(&mut self, now: f64, cooldown_secs: f32, animator: &mut AnimatorParams) {
        self.cast.end(now, cooldown_secs);
        animator.set_bool("Casting", false);
    }

    /// Прервать оба действия без cooldown (смерть)
    pub fn cancel_all(&mut self, animator: &mut AnimatorParams) {
        self.strike.cancel();
        self.cast.cancel();
        animator.set_bool("Strike", false);
        animator.set_bool("Casting", false);
    }
}
