//! Agent state machine: один tick агента без ECS
//!
//! Порядок внутри tick:
//! 1. Периодический scan trigger range (idempotent start, первый запуск сразу)
//! 2. Обработчик текущего состояния
//! 3. Периодический attack-range check (сам останавливается вне TargetSpotted)

use super::components::{Agent, AgentState, MovementType};
use super::sensor;
use super::variants::{AgentContext, AttackBehavior, TargetView};

/// Один simulation tick агента
pub fn run_agent_tick(
    agent: &mut Agent,
    variant: &impl AttackBehavior,
    ctx: &mut AgentContext,
    mut target: Option<TargetView>,
) {
    if agent.is_disabled() {
        ctx.intent.stop();
        return;
    }

    agent.scan_task.start(ctx.now);
    if agent.scan_task.poll(ctx.now) {
        scan_for_target(agent, ctx, target.as_mut());
    }

    match agent.state() {
        AgentState::None => {}
        AgentState::Idle => on_idle(agent, ctx),
        AgentState::Move => on_move(agent, ctx),
        AgentState::TargetSpotted => {
            ctx.intent.stop();
            if agent.attack_check_task.start(ctx.now) {
                crate::log(&format!("{:?}: attack-range check started", ctx.entity));
            }
            if let Some(target) = target.as_mut() {
                variant.track_target(agent, ctx, target);
            }
        }
        AgentState::Attack => variant.execute_attack(agent, ctx, target.as_mut()),
    }

    if agent.attack_check_task.poll(ctx.now) {
        if agent.state() != AgentState::TargetSpotted {
            agent.attack_check_task.stop();
        } else if let Some(target) = target.as_mut() {
            variant.test_attack_range(agent, ctx, target);
        }
    }
}

/// Периодический scan: TargetSpotted если цель ближе trigger range, иначе target_lost_state
///
/// Мёртвая цель считается потерянной.
fn scan_for_target(agent: &mut Agent, ctx: &mut AgentContext, target: Option<&mut TargetView>) {
    let Some(target) = target else {
        return;
    };

    let in_range = target.health.is_alive()
        && sensor::in_trigger_range(ctx.position, target.position, agent.config.trigger_range);

    if in_range {
        if agent.change_state(AgentState::TargetSpotted, ctx.animator) {
            crate::log(&format!("👁️ {:?} spotted {:?}", ctx.entity, target.entity));
        }
        ctx.turn_to(target.position.x, agent.config.disable_flip);
    } else {
        let lost_state = agent.config.target_lost_state;
        if agent.change_state(lost_state, ctx.animator) {
            crate::log(&format!(
                "👻 {:?} lost {:?} → {:?}",
                ctx.entity, target.entity, lost_state
            ));
        }
    }
}

fn on_idle(agent: &mut Agent, ctx: &mut AgentContext) {
    ctx.intent.stop();
    if agent.config.movement_type == MovementType::Patrol {
        agent.change_state(AgentState::Move, ctx.animator);
    }
}

/// Patrol: к текущему waypoint, в пределах epsilon → следующий (циклически)
fn on_move(agent: &mut Agent, ctx: &mut AgentContext) {
    if agent.config.movement_type != MovementType::Patrol {
        ctx.intent.stop();
        return;
    }

    let Some(waypoint) = agent.current_waypoint() else {
        ctx.intent.stop();
        return;
    };

    ctx.turn_to(waypoint.x, agent.config.disable_flip);
    if ctx.position.distance(waypoint) > ctx.waypoint_epsilon {
        ctx.move_forward(agent.config.speed);
    } else {
        agent.advance_waypoint();
    }
}
