//! Tests for Health model.

#[cfg(test)]
mod tests {
    use super::super::model::{Health, HealthObserver, HealthSignal};
    use bevy::prelude::*;
    use std::sync::{Arc, Mutex};

    /// Observer, который пишет все вызовы в общий журнал
    struct Recorder {
        name: &'static str,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl HealthObserver for Recorder {
        fn on_health_changed(&mut self, _owner: Entity, delta: i32, health: i32, armor: i32) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:health({delta},{health},{armor})", self.name));
        }

        fn on_armor_changed(&mut self, _owner: Entity, delta: i32, armor: i32) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:armor({delta},{armor})", self.name));
        }

        fn on_die(&mut self, _owner: Entity) {
            self.journal.lock().unwrap().push(format!("{}:die", self.name));
        }
    }

    fn recorded(health: &mut Health, name: &'static str) -> Arc<Mutex<Vec<String>>> {
        let journal = Arc::new(Mutex::new(Vec::new()));
        health.add_observer(Box::new(Recorder {
            name,
            journal: journal.clone(),
        }));
        journal
    }

    fn deaths(signals: &[HealthSignal]) -> usize {
        signals
            .iter()
            .filter(|signal| matches!(signal, HealthSignal::Died))
            .count()
    }

    #[test]
    fn test_health_created_full() {
        let health = Health::new(100, 30);
        assert_eq!(health.health(), 100);
        assert_eq!(health.armor(), 30);
        assert!(health.is_alive());
    }

    #[test]
    fn test_armor_absorbs_first() {
        let mut health = Health::new(100, 30);
        health.affect_health(-50);

        assert_eq!(health.armor(), 0);
        assert_eq!(health.health(), 80);
    }

    #[test]
    fn test_partial_absorption_keeps_health() {
        let mut health = Health::new(100, 30);
        health.affect_health(-10);

        assert_eq!(health.armor(), 20);
        assert_eq!(health.health(), 100);
    }

    #[test]
    fn test_heal_does_not_touch_armor() {
        let mut health = Health::new(100, 30).with_current(50, 10);
        health.affect_health(20);

        assert_eq!(health.health(), 70);
        assert_eq!(health.armor(), 10);
    }

    #[test]
    fn test_overkill_twice_dies_once() {
        let mut health = Health::new(100, 0);
        let journal = recorded(&mut health, "a");

        health.affect_health(-1000);
        health.affect_health(-1000);

        let deaths = journal
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.ends_with(":die"))
            .count();
        assert_eq!(deaths, 1);
        assert_eq!(health.health(), 0);
    }

    #[test]
    fn test_kill_ignores_armor() {
        let mut health = Health::new(10, 50);
        health.kill();

        assert_eq!(health.health(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_dead_pool_not_revived_by_heal() {
        let mut health = Health::new(100, 0);
        health.kill();
        health.affect_health(50);

        assert_eq!(health.health(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_ignore_hurt_is_noop() {
        let mut health = Health::new(100, 10);
        let journal = recorded(&mut health, "a");
        health.ignore_hurt = true;

        health.affect_health(-50);

        assert_eq!(health.health(), 100);
        assert_eq!(health.armor(), 10);
        assert!(journal.lock().unwrap().is_empty());
        assert!(!health.has_pending_signals());
    }

    #[test]
    fn test_zero_delta_still_notifies() {
        let mut health = Health::new(100, 0);
        health.affect_health(0);

        assert_eq!(
            health.drain_signals(),
            vec![HealthSignal::HealthChanged { delta: 0, health: 100, armor: 0 }]
        );
    }

    #[test]
    fn test_armor_clamped_without_health_interaction() {
        let mut health = Health::new(100, 40).with_current(100, 10);

        health.affect_armor(100);
        assert_eq!(health.armor(), 40);

        health.affect_armor(-500);
        assert_eq!(health.armor(), 0);
        assert_eq!(health.health(), 100);
    }

    #[test]
    fn test_death_signaled_before_health_changed() {
        let mut health = Health::new(10, 0);
        health.affect_health(-10);

        assert_eq!(
            health.drain_signals(),
            vec![
                HealthSignal::Died,
                HealthSignal::HealthChanged { delta: -10, health: 0, armor: 0 },
            ]
        );
    }

    #[test]
    fn test_observers_called_in_registration_order() {
        let mut health = Health::new(100, 0);
        let journal = Arc::new(Mutex::new(Vec::new()));
        for name in ["first", "second"] {
            health.add_observer(Box::new(Recorder {
                name,
                journal: journal.clone(),
            }));
        }

        health.affect_health(-5);

        assert_eq!(
            *journal.lock().unwrap(),
            vec!["first:health(-5,95,0)", "second:health(-5,95,0)"]
        );
    }

    #[test]
    fn test_damage_heal_lethal_scenario() {
        let mut health = Health::new(100, 0);

        health.affect_health(-30);
        assert_eq!(health.health(), 70);

        health.affect_health(20);
        assert_eq!(health.health(), 90);

        health.affect_health(-95);
        assert_eq!(health.health(), 0);
        assert!(health.is_dead());

        let signals = health.drain_signals();
        assert_eq!(deaths(&signals), 1);
        assert_eq!(signals.len(), 4); // 3 × HealthChanged + 1 × Died
    }

    #[test]
    fn test_reset_rearms_death() {
        let mut health = Health::new(20, 5);
        health.kill();
        health.reset();

        assert_eq!(health.health(), 20);
        assert_eq!(health.armor(), 5);

        health.kill();
        assert_eq!(deaths(&health.drain_signals()), 2);
    }

    #[test]
    fn test_pools_stay_in_bounds() {
        let mut health = Health::new(50, 20);
        let deltas = [-7, 300, -13, -1, 0, 45, -999, 12, -3];

        for (i, delta) in deltas.iter().enumerate() {
            if i % 2 == 0 {
                health.affect_health(*delta);
            } else {
                health.affect_armor(*delta);
            }
            assert!((0..=50).contains(&health.health()));
            assert!((0..=20).contains(&health.armor()));
        }
    }
}
