//! lanewar Simulation Core
//!
//! ECS-симуляция боя на линии (Bevy 0.16, headless)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = боевое ядро (Registry, targeting, движение, cooldown, урон, спавн)
//! - Presentation хост = спрайты, анимации, health label, кнопки, камера
//!
//! Ядро только сигналит (events + DisplayIntent), в рендер не вызывает.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod battlefield;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod registry;
pub mod snapshot;
pub mod spawner;

// Re-export базовых типов для удобства
pub use ai::{advance_battle, TickReport, UnitAction};
pub use battlefield::Battlefield;
pub use combat::{Attacker, DamageDealt, EntityDestroyed, HealthChanged, TowerDestroyed};
pub use components::*;
pub use config::{ConfigError, LaneConfig, UnitCatalog, UnitType};
pub use registry::{MatchState, ObjectiveTowers, Registry};
pub use snapshot::{battle_snapshot, BattleSnapshot, CombatantSnapshot};
pub use spawner::{EnemySpawner, SpawnAllyIntent, SpawnError, UnitSpawned};

/// Главный plugin симуляции
///
/// Порядок в FixedUpdate:
/// 1. enemy_spawn_system: вражеский таймер (реальное время)
/// 2. ally_spawn_intent_system: команды UI
/// 3. advance_battle_system: тик боя (delta × time_scale), compaction в конце
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<LaneConfig>()
            .init_resource::<Registry>()
            .init_resource::<ObjectiveTowers>()
            .init_resource::<MatchState>()
            .add_event::<UnitSpawned>()
            .add_event::<SpawnAllyIntent>()
            .add_event::<DamageDealt>()
            .add_event::<HealthChanged>()
            .add_event::<EntityDestroyed>()
            .add_event::<TowerDestroyed>()
            .add_systems(Startup, setup_match)
            .add_systems(
                FixedUpdate,
                (
                    spawner::enemy_spawn_system,
                    spawner::ally_spawn_intent_system,
                    advance_battle_system,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}

/// Startup: таймер спавна по конфигу + башни
///
/// Невалидный конфиг: матч не стартует (ни башен, ни таймера).
fn setup_match(world: &mut World) {
    let config = world.resource::<LaneConfig>();
    if let Err(err) = config.validate() {
        logger::log_error(&format!("Match not started, invalid config: {}", err));
        return;
    }
    let interval = config.enemy_spawn_interval;
    world.insert_resource(EnemySpawner::new(interval));
    spawner::spawn_towers(world);
    logger::log_info("Match started");
}

/// System: тик боя с масштабированным deltaTime
pub fn advance_battle_system(world: &mut World) {
    let real_delta = world.resource::<Time<Fixed>>().delta_secs();
    let delta = real_delta * world.resource::<LaneConfig>().time_scale;
    advance_battle(world, delta);
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без SimulationPlugin)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_rng_same_seed_same_sequence() {
        let mut a = DeterministicRng::new(99);
        let mut b = DeterministicRng::new(99);
        let seq_a: Vec<u32> = (0..16).map(|_| a.rng.gen_range(0..2)).collect();
        let seq_b: Vec<u32> = (0..16).map(|_| b.rng.gen_range(0..2)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_plugin_spawns_towers_on_startup() {
        let mut app = create_headless_app(42);
        app.add_plugins(SimulationPlugin);
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<Registry>().len(), 2);
        let towers = world.resource::<ObjectiveTowers>();
        assert!(towers.ally.is_some() && towers.enemy.is_some());
        assert_eq!(*world.resource::<MatchState>(), MatchState::InProgress);
    }

    #[test]
    fn test_plugin_refuses_invalid_config() {
        let mut app = create_headless_app(42);
        app.insert_resource(LaneConfig {
            enemy_spawn_interval: 0.0,
            ..LaneConfig::default()
        });
        app.add_plugins(SimulationPlugin);
        app.update();
        app.update();

        let world = app.world();
        assert!(world.resource::<Registry>().is_empty());
        assert!(!world.contains_resource::<EnemySpawner>());
    }
}
