//! Target sensor: чистая геометрия (без ECS)
//!
//! Trigger range: грубое обнаружение (строго <), attack radius: проверка
//! от attack origin (включительно).

use bevy::prelude::*;

pub fn in_trigger_range(agent: Vec2, target: Vec2, trigger_range: f32) -> bool {
    agent.distance(target) < trigger_range
}

pub fn in_attack_radius(attack_origin: Vec2, target: Vec2, attack_radius: f32) -> bool {
    attack_origin.distance(target) <= attack_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_range_is_strict() {
        assert!(in_trigger_range(Vec2::ZERO, Vec2::new(4.99, 0.0), 5.0));
        assert!(!in_trigger_range(Vec2::ZERO, Vec2::new(5.0, 0.0), 5.0));
    }

    #[test]
    fn test_attack_radius_is_inclusive() {
        assert!(in_attack_radius(Vec2::ZERO, Vec2::new(0.0, 1.5), 1.5));
        assert!(!in_attack_radius(Vec2::ZERO, Vec2::new(0.0, 1.6), 1.5));
    }
}
