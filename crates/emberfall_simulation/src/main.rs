//! Headless симуляция EMBERFALL
//!
//! Запускает demo уровень без рендера: scripted input игрока из DeterministicRng,
//! restart после смерти игрока.
//!
//! Использование: `emberfall_simulation [seed] [level.ron]`

use bevy::prelude::*;
use emberfall_simulation::*;
use rand::Rng;

const DEMO_LEVEL: &str = include_str!("../assets/levels/demo.ron");
const TICK_COUNT: u64 = 3600;
/// Сколько тиков держим одно направление ввода
const INPUT_HOLD_TICKS: u64 = 30;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let blueprint = match args.next() {
        Some(path) => LevelBlueprint::load(path),
        None => LevelBlueprint::from_ron_str(DEMO_LEVEL),
    };
    let blueprint = match blueprint {
        Ok(blueprint) => blueprint,
        Err(err) => {
            log_error(&format!("Level load failed: {}", err));
            std::process::exit(1);
        }
    };

    log_info(&format!("Starting EMBERFALL headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    start_level(app.world_mut(), blueprint);

    let mut input = PlayerInput::default();
    let mut restart_pending = false;

    for tick in 0..TICK_COUNT {
        if tick % INPUT_HOLD_TICKS == 0 {
            input = scripted_input(&mut app);
        }

        let player = app.world().resource::<SimulationContext>().spawned.player;
        let player_dead = player.is_some_and(|player| app.world().get::<Dead>(player).is_some());

        if let Some(player) = player {
            if let Some(mut current) = app.world_mut().get_mut::<PlayerInput>(player) {
                *current = input;
            }
        }

        // Один restart на смерть (context.spawned обновится в tick restart)
        if player_dead && !restart_pending {
            log_info("Player died, requesting restart");
            app.world_mut().send_event(RestartRequested);
            restart_pending = true;
        } else if !player_dead {
            restart_pending = false;
        }

        app.update();

        if tick % 300 == 0 {
            report(&mut app, tick);
        }
    }

    let restarts = app.world().resource::<SimulationContext>().restarts;
    log_info(&format!("Simulation complete! ({} restarts)", restarts));
}

/// Новое направление + случайные действия (детерминированно от seed)
fn scripted_input(app: &mut App) -> PlayerInput {
    let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
    PlayerInput {
        move_axis: rng.rng.gen_range(-1.0..=1.0),
        jump: rng.rng.gen_bool(0.2),
        crouch: rng.rng.gen_bool(0.1),
        strike: rng.rng.gen_bool(0.5),
        cast: rng.rng.gen_bool(0.2),
    }
}

fn report(app: &mut App, tick: u64) {
    let world = app.world_mut();
    let entity_count = world.entities().len();

    let mut agents = world.query::<(&Name, &Agent, &Health)>();
    let agent_states: Vec<String> = agents
        .iter(world)
        .map(|(name, agent, health)| {
            format!("{} {:?} hp={}", name, agent.state(), health.health())
        })
        .collect();

    let mut players = world.query_filtered::<(&Transform, &Health, &ManaPool), With<Player>>();
    let player_state = players
        .iter(world)
        .next()
        .map(|(transform, health, mana)| {
            format!(
                "x={:.1} hp={} armor={} mana={}",
                transform.translation.x,
                health.health(),
                health.armor(),
                mana.current()
            )
        })
        .unwrap_or_else(|| "none".to_string());

    log_info(&format!(
        "Tick {}: {} entities | player {} | agents [{}]",
        tick,
        entity_count,
        player_state,
        agent_states.join(", ")
    ));
}
