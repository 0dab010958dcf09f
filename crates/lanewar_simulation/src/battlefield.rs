//! Battlefield: явный контекст симуляции (без глобального состояния)
//!
//! Владеет Bevy `World` с Registry, башнями, конфигом и RNG.
//! Используется headless runner'ом и тестами; `SimulationPlugin` гоняет
//! те же функции внутри App.

use std::time::Duration;

use bevy::prelude::*;

use crate::ai::{advance_battle, TickReport};
use crate::combat::{self, DamageDealt, EntityDestroyed, HealthChanged, TowerDestroyed};
use crate::components::{CombatantKind, DisplayIntent, Faction, Health, LanePosition};
use crate::config::{ConfigError, LaneConfig};
use crate::registry::{self, MatchState, ObjectiveTowers, Registry};
use crate::snapshot::{battle_snapshot, BattleSnapshot};
use crate::spawner::{self, EnemySpawner, SpawnAllyIntent, SpawnError, UnitSpawned};
use crate::DeterministicRng;

pub struct Battlefield {
    world: World,
}

impl Battlefield {
    /// Новый матч: ресурсы + обе башни
    ///
    /// Конфиг валидируется до создания таймера спавна.
    pub fn new(config: LaneConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        register_events(&mut world);

        world.insert_resource(EnemySpawner::new(config.enemy_spawn_interval));
        world.insert_resource(config);
        world.insert_resource(DeterministicRng::new(seed));
        world.init_resource::<Registry>();
        world.init_resource::<MatchState>();
        world.init_resource::<ObjectiveTowers>();

        spawner::spawn_towers(&mut world);

        Ok(Self { world })
    }

    pub fn from_json(json: &str, seed: u64) -> Result<Self, ConfigError> {
        Self::new(LaneConfig::from_json_str(json)?, seed)
    }

    /// Кадр хоста: вражеский таймер (реальное время) + тик (масштабированное)
    pub fn step(&mut self, real_delta: Duration) -> TickReport {
        spawner::tick_enemy_spawner(&mut self.world, real_delta);
        let delta = real_delta.as_secs_f32() * self.config().time_scale;
        self.tick(delta)
    }

    /// Один тик с уже масштабированным deltaTime
    pub fn tick(&mut self, delta: f32) -> TickReport {
        advance_battle(&mut self.world, delta)
    }

    pub fn spawn_unit(&mut self, faction: Faction, type_id: &str) -> Result<Entity, SpawnError> {
        spawner::spawn_unit(&mut self.world, faction, type_id)
    }

    /// Команда UI (кнопка каталога)
    pub fn spawn_ally(&mut self, type_id: &str) -> Result<Entity, SpawnError> {
        self.spawn_unit(Faction::Ally, type_id)
    }

    pub fn spawn_random_enemy(&mut self) -> Result<Entity, SpawnError> {
        spawner::spawn_random_enemy(&mut self.world)
    }

    /// Спавн с явной позицией (сценарии, отладка)
    pub fn spawn_unit_at(
        &mut self,
        faction: Faction,
        type_id: &str,
        position: Vec2,
    ) -> Result<Entity, SpawnError> {
        spawner::spawn_unit_at(&mut self.world, faction, type_id, position)
    }

    /// Одна команда спавна на запись каталога, в порядке каталога
    pub fn spawn_commands(&self) -> Vec<String> {
        self.config().catalog.ids().map(str::to_string).collect()
    }

    /// Прямой удар (вне тика), те же правила что и в resolver
    pub fn attack(&mut self, attacker: Entity, target: Entity, amount: i32) -> Option<DamageDealt> {
        combat::apply_attack(&mut self.world, attacker, target, amount)
    }

    pub fn destroy(&mut self, entity: Entity) -> bool {
        combat::destroy(&mut self.world, entity)
    }

    pub fn units_of(&self, faction: Faction) -> Vec<Entity> {
        registry::query_by_faction(&self.world, faction, Some(CombatantKind::Unit))
    }

    pub fn tower(&self, faction: Faction) -> Option<Entity> {
        self.world.resource::<ObjectiveTowers>().tower_of(faction)
    }

    pub fn registry(&self) -> &[Entity] {
        self.world.resource::<Registry>().entities()
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        registry::is_active(&self.world, entity)
    }

    pub fn health(&self, entity: Entity) -> Option<i32> {
        self.world.get::<Health>(entity).map(|h| h.current)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<LanePosition>(entity).map(|p| p.0)
    }

    pub fn display_intent(&self, entity: Entity) -> Option<DisplayIntent> {
        self.world.get::<DisplayIntent>(entity).copied()
    }

    pub fn match_state(&self) -> MatchState {
        *self.world.resource::<MatchState>()
    }

    pub fn config(&self) -> &LaneConfig {
        self.world.resource::<LaneConfig>()
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        battle_snapshot(&self.world)
    }

    /// Забрать накопленные события (presentation сигналы)
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        let Some(mut events) = self.world.get_resource_mut::<Events<E>>() else {
            return Vec::new();
        };
        let drained: Vec<E> = events.drain().collect();
        drained
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

fn register_events(world: &mut World) {
    world.init_resource::<Events<UnitSpawned>>();
    world.init_resource::<Events<SpawnAllyIntent>>();
    world.init_resource::<Events<DamageDealt>>();
    world.init_resource::<Events<HealthChanged>>();
    world.init_resource::<Events<EntityDestroyed>>();
    world.init_resource::<Events<TowerDestroyed>>();
}
