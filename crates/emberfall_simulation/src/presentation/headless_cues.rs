//! Headless animation cues
//!
//! Без движка некому слать animation events. Этот driver эмулирует их:
//! через фиксированные windup'ы после старта strike/cast шлёт AnimationCue,
//! ровно в тот tick, когда порог пересечён.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{AnimationCue, CueKind};
use crate::clock::{SimClock, TIME_EPSILON};
use crate::player::actions::ActionTimer;
use crate::player::PlayerActions;

/// Тайминги анимаций действий (секунды от старта действия)
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionWindups {
    pub strike_hit_secs: f32,
    pub strike_end_secs: f32,
    pub cast_release_secs: f32,
    pub cast_end_secs: f32,
}

impl Default for ActionWindups {
    fn default() -> Self {
        Self {
            strike_hit_secs: 0.2,
            strike_end_secs: 0.4,
            cast_release_secs: 0.3,
            cast_end_secs: 0.5,
        }
    }
}

/// Порог `at_secs` пересечён в текущем tick
fn crossed(timer: &ActionTimer, now: f64, step: f64, at_secs: f32) -> bool {
    let Some(started_at) = timer.started_at() else {
        return false;
    };
    let elapsed = now - started_at;
    let threshold = f64::from(at_secs);

    elapsed + TIME_EPSILON >= threshold && elapsed - step + TIME_EPSILON < threshold
}

/// Система: windup'ы активных действий → AnimationCue
pub fn drive_headless_cues(
    clock: Res<SimClock>,
    players: Query<(Entity, &PlayerActions, &ActionWindups)>,
    mut cue_events: EventWriter<AnimationCue>,
) {
    let now = clock.now();
    let step = clock.step_secs();

    for (entity, actions, windups) in players.iter() {
        let cues = [
            (&actions.strike, windups.strike_hit_secs, CueKind::StrikeHit),
            (&actions.strike, windups.strike_end_secs, CueKind::StrikeEnd),
            (&actions.cast, windups.cast_release_secs, CueKind::CastRelease),
            (&actions.cast, windups.cast_end_secs, CueKind::CastEnd),
        ];

        for (timer, at_secs, cue) in cues {
            if crossed(timer, now, step, at_secs) {
                cue_events.write(AnimationCue { entity, cue });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::AnimatorParams;

    #[test]
    fn test_threshold_crossed_exactly_once() {
        let mut actions = PlayerActions::new(1.0);
        let mut animator = AnimatorParams::default();
        let step = 0.1;
        actions.try_start_strike(1.0, true, &mut animator);

        let fired: Vec<_> = (0..10)
            .map(|i| 1.0 + f64::from(i) * step)
            .filter(|now| crossed(&actions.strike, *now, step, 0.2))
            .collect();

        assert_eq!(fired.len(), 1);
        assert!((fired[0] - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_windup_fires_on_start_tick() {
        let mut actions = PlayerActions::new(1.0);
        let mut animator = AnimatorParams::default();
        actions.try_start_strike(2.0, true, &mut animator);

        assert!(crossed(&actions.strike, 2.0, 1.0 / 60.0, 0.0));
        assert!(!crossed(&actions.strike, 2.0 + 1.0 / 60.0, 1.0 / 60.0, 0.0));
    }

    #[test]
    fn test_inactive_timer_never_fires() {
        let actions = PlayerActions::new(1.0);
        assert!(!crossed(&actions.strike, 5.0, 0.1, 0.0));
    }
}
