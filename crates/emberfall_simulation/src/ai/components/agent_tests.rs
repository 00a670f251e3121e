//! Tests for Agent component.

#[cfg(test)]
mod tests {
    use super::super::agent::{Agent, AgentConfig, AgentState, MovementType};
    use crate::presentation::AnimatorParams;
    use bevy::prelude::*;

    fn patrol_agent(waypoints: Vec<Vec2>) -> Agent {
        let config = AgentConfig {
            movement_type: MovementType::Patrol,
            ..default()
        };
        Agent::new(config, waypoints, 1.0)
    }

    #[test]
    fn test_agent_starts_idle() {
        let agent = Agent::new(AgentConfig::default(), Vec::new(), 1.0);
        assert_eq!(agent.state(), AgentState::Idle);
        assert!(agent.target.is_none());
        assert!(!agent.scan_task.is_running());
    }

    #[test]
    fn test_agent_config_default() {
        let config = AgentConfig::default();
        assert_eq!(config.movement_type, MovementType::HoldPosition);
        assert_eq!(config.target_lost_state, AgentState::Idle);
        assert!(config.chase_target);
        assert!(!config.disable_flip);
    }

    #[test]
    fn test_change_state_swaps_animator_flags() {
        let mut agent = Agent::new(AgentConfig::default(), Vec::new(), 1.0);
        let mut animator = AnimatorParams::default();

        assert!(agent.change_state(AgentState::TargetSpotted, &mut animator));
        assert!(!animator.get_bool("Idle"));
        assert!(animator.get_bool("TargetSpotted"));

        assert!(agent.change_state(AgentState::Attack, &mut animator));
        assert!(!animator.get_bool("TargetSpotted"));
        assert!(animator.get_bool("Attack"));

        // Повторный вход в то же состояние: флаг остаётся true
        assert!(!agent.change_state(AgentState::Attack, &mut animator));
        assert!(animator.get_bool("Attack"));
    }

    #[test]
    fn test_waypoints_cycle() {
        let mut agent = patrol_agent(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);

        let mut visited = Vec::new();
        for _ in 0..6 {
            visited.push(agent.waypoint_index());
            agent.advance_waypoint();
        }

        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_no_waypoints_is_safe() {
        let mut agent = patrol_agent(Vec::new());
        agent.advance_waypoint();

        assert_eq!(agent.current_waypoint(), None);
    }

    #[test]
    fn test_disable_stops_tasks() {
        let mut agent = Agent::new(AgentConfig::default(), Vec::new(), 1.0);
        let mut animator = AnimatorParams::default();
        agent.scan_task.start(0.0);
        agent.attack_check_task.start(0.0);

        agent.disable(&mut animator);

        assert!(agent.is_disabled());
        assert!(!agent.scan_task.is_running());
        assert!(!agent.attack_check_task.is_running());
        assert_eq!(animator.active_flags().count(), 0);
    }
}
