//! Agent integration tests
//!
//! Полный SimulationPlugin, уровень из blueprint, tick через step_simulation.
//!
//! Проверяем:
//! - Patrol цикл по waypoints
//! - Spotted → Attack → lost
//! - Ranged cooldown: одна стрела на cooldown
//! - Melee: сближение, урон, смерть цели
//! - Смерть агента: None state + despawn после death анимации

use bevy::prelude::*;
use emberfall_simulation::level::{AgentBlueprint, PlayerBlueprint};
use emberfall_simulation::presentation::SpawnKind;
use emberfall_simulation::*;

fn simulation_app() -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app
}

fn player_at(x: f32) -> PlayerBlueprint {
    PlayerBlueprint {
        position: [x, 0.0],
        max_armor: 0,
        ..Default::default()
    }
}

fn ranged_agent(x: f32) -> AgentBlueprint {
    AgentBlueprint {
        name: "Archer".to_string(),
        position: [x, 0.0],
        variant: AgentVariant::Ranged(RangedAttack::default()),
        ..Default::default()
    }
}

fn melee_agent(x: f32, config: AgentConfig) -> AgentBlueprint {
    AgentBlueprint {
        name: "Swordsman".to_string(),
        position: [x, 0.0],
        config,
        variant: AgentVariant::Melee(MeleeAttack::default()),
        ..Default::default()
    }
}

fn agent_state(app: &App, entity: Entity) -> AgentState {
    app.world().get::<Agent>(entity).unwrap().state()
}

fn arrow_requests(app: &mut App) -> usize {
    app.world_mut()
        .resource_mut::<Events<SpawnRequest>>()
        .drain()
        .filter(|request| request.kind == SpawnKind::Arrow)
        .count()
}

#[test]
fn test_patrol_cycles_waypoints() {
    let mut app = simulation_app();
    let level = start_level(
        app.world_mut(),
        LevelBlueprint {
            agents: vec![AgentBlueprint {
                config: AgentConfig {
                    movement_type: MovementType::Patrol,
                    ..Default::default()
                },
                waypoints: vec![[2.0, 0.0], [-2.0, 0.0]],
                ..melee_agent(0.0, AgentConfig::default())
            }],
            ..Default::default()
        },
    );
    let agent = level.agents[0];

    step_simulation(&mut app);
    assert_eq!(agent_state(&app, agent), AgentState::Move);

    let mut visited = vec![0];
    for _ in 0..400 {
        step_simulation(&mut app);
        let index = app.world().get::<Agent>(agent).unwrap().waypoint_index();
        if visited.last() != Some(&index) {
            visited.push(index);
        }

        let x = app.world().get::<Transform>(agent).unwrap().translation.x;
        assert!((-2.1..=2.1).contains(&x), "agent left patrol route: x = {}", x);
    }

    assert!(visited.len() >= 3, "waypoints visited: {:?}", visited);
    assert_eq!(&visited[..3], &[0, 1, 0]);
}

#[test]
fn test_ranged_spots_attacks_and_loses_target() {
    let mut app = simulation_app();
    let level = start_level(
        app.world_mut(),
        LevelBlueprint {
            player: Some(player_at(5.0)),
            agents: vec![ranged_agent(0.0)],
            ..Default::default()
        },
    );
    let agent = level.agents[0];
    let player = level.player.unwrap();

    // Первый scan + attack-range check в том же tick
    step_simulation(&mut app);
    assert_eq!(agent_state(&app, agent), AgentState::Attack);
    assert!(app.world().get::<AnimatorParams>(agent).unwrap().get_bool("Attack"));

    // Игрок убегает за trigger range → следующий scan через 1 сек
    app.world_mut()
        .get_mut::<Transform>(player)
        .unwrap()
        .translation
        .x = 50.0;
    for _ in 0..60 {
        step_simulation(&mut app);
    }

    assert_eq!(agent_state(&app, agent), AgentState::Idle);
    let animator = app.world().get::<AnimatorParams>(agent).unwrap();
    assert!(animator.get_bool("Idle"));
    assert!(!animator.get_bool("Attack"));
}

#[test]
fn test_ranged_fires_once_per_cooldown() {
    let mut app = simulation_app();
    let level = start_level(
        app.world_mut(),
        LevelBlueprint {
            player: Some(player_at(5.0)),
            agents: vec![ranged_agent(0.0)],
            ..Default::default()
        },
    );
    let player = level.player.unwrap();

    step_simulation(&mut app);
    step_simulation(&mut app);
    assert_eq!(arrow_requests(&mut app), 1);

    let mut projectiles = app.world_mut().query::<&Projectile>();
    assert_eq!(projectiles.iter(app.world()).count(), 1);

    // Tick 61: cooldown ещё не истёк, стрела уже попала
    for _ in 0..59 {
        step_simulation(&mut app);
    }
    assert_eq!(arrow_requests(&mut app), 0);
    assert_eq!(app.world().get::<Health>(player).unwrap().health(), 90);

    step_simulation(&mut app);
    assert_eq!(arrow_requests(&mut app), 1);
}

#[test]
fn test_melee_chases_and_hits_until_target_dies() {
    let mut app = simulation_app();
    let level = start_level(
        app.world_mut(),
        LevelBlueprint {
            player: Some(PlayerBlueprint {
                max_health: 30,
                ..player_at(4.0)
            }),
            agents: vec![melee_agent(0.0, AgentConfig::default())],
            ..Default::default()
        },
    );
    let agent = level.agents[0];
    let player = level.player.unwrap();

    for _ in 0..300 {
        step_simulation(&mut app);
    }

    // 15 урона в секунду: 30 health → смерть
    let health = app.world().get::<Health>(player).unwrap();
    assert!(health.is_dead());
    assert!(app.world().get::<Dead>(player).is_some());

    let agent_x = app.world().get::<Transform>(agent).unwrap().translation.x;
    assert!(agent_x > 1.0, "agent did not chase: x = {}", agent_x);

    // Цель мертва → Idle и скорость 0 навсегда
    assert_eq!(agent_state(&app, agent), AgentState::Idle);
    assert_eq!(app.world().get::<Agent>(agent).unwrap().config.speed, 0.0);
    assert_eq!(app.world().get::<MovementIntent>(agent).unwrap().horizontal, 0.0);
}

#[test]
fn test_agent_death_disables_and_despawns_after_linger() {
    let mut app = simulation_app();
    let level = start_level(
        app.world_mut(),
        LevelBlueprint {
            player: Some(player_at(30.0)),
            agents: vec![melee_agent(0.0, AgentConfig::default())],
            ..Default::default()
        },
    );
    let agent = level.agents[0];

    step_simulation(&mut app);
    app.world_mut().get_mut::<Health>(agent).unwrap().kill();
    step_simulation(&mut app);

    assert_eq!(agent_state(&app, agent), AgentState::None);
    assert!(app.world().get::<Dead>(agent).is_some());
    let animator = app.world().get::<AnimatorParams>(agent).unwrap();
    assert_eq!(animator.pending_clip(), Some("Death"));

    let died = app.world_mut().resource_mut::<Events<EntityDied>>().drain().count();
    assert_eq!(died, 1);

    // Melee труп лежит 1.5 сек
    for _ in 0..80 {
        step_simulation(&mut app);
    }
    assert!(app.world().get_entity(agent).is_ok());

    for _ in 0..20 {
        step_simulation(&mut app);
    }
    assert!(app.world().get_entity(agent).is_err());
}

#[test]
fn test_agent_killed_by_strike_does_not_hit_back_same_tick() {
    let mut app = simulation_app();
    let level = start_level(
        app.world_mut(),
        LevelBlueprint {
            player: Some(player_at(0.0)),
            agents: vec![AgentBlueprint {
                name: "Swordsman".to_string(),
                position: [1.5, 0.0],
                max_health: 20,
                config: AgentConfig {
                    speed: 0.0,
                    attack_cooldown_secs: 0.0,
                    ..Default::default()
                },
                variant: AgentVariant::Melee(MeleeAttack {
                    damage: 1,
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        },
    );
    let player = level.player.unwrap();
    let agent = level.agents[0];
    let player_hp = |app: &App| app.world().get::<Health>(player).unwrap().health();

    // Tick 1: strike стартует, агент замечает игрока и входит в Attack
    *app.world_mut().get_mut::<PlayerInput>(player).unwrap() = PlayerInput {
        strike: true,
        ..Default::default()
    };
    step_simulation(&mut app);
    *app.world_mut().get_mut::<PlayerInput>(player).unwrap() = PlayerInput::default();
    assert_eq!(agent_state(&app, agent), AgentState::Attack);

    // Нулевой cooldown: агент бьёт каждый tick, пока жив
    step_simulation_n(&mut app, 10);
    let before_last_hit = player_hp(&app);
    step_simulation(&mut app);
    let before_kill = player_hp(&app);
    assert_eq!(before_kill, before_last_hit - 1);

    // Tick 13: hit cue strike убивает агента раньше его FSM tick
    step_simulation(&mut app);
    assert!(app.world().get::<Health>(agent).unwrap().is_dead());
    assert_eq!(agent_state(&app, agent), AgentState::None);
    assert_eq!(player_hp(&app), before_kill);

    step_simulation_n(&mut app, 30);
    assert_eq!(player_hp(&app), before_kill);
}
