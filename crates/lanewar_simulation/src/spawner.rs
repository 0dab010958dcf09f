//! Spawner: башни на старте матча и юниты из каталога
//!
//! Два триггера:
//! - enemy: повторяющийся таймер (реальное время), тип: uniform random из каталога
//! - ally: внешняя команда (кнопка UI → SpawnAllyIntent) с конкретным типом
//!
//! Юнит появляется у своей башни (со смещением внутрь поля), скорость
//! направлена к башне противника, entity добавляется в конец Registry.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::combat::Attacker;
use crate::components::{
    display_intent, Combatant, Faction, Health, LanePosition, Marcher, Tower, UnitProfile,
};
use crate::config::LaneConfig;
use crate::logger;
use crate::registry::{MatchState, ObjectiveTowers, Registry};
use crate::DeterministicRng;

#[derive(Debug, Error, PartialEq)]
pub enum SpawnError {
    #[error("unknown unit type `{0}`")]
    UnknownUnitType(String),

    #[error("match is already finished")]
    MatchFinished,

    #[error("{0:?} tower is missing")]
    MissingTower(Faction),
}

/// Событие: юнит появился (presentation создаёт спрайт и health label)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct UnitSpawned {
    pub entity: Entity,
    pub faction: Faction,
    pub type_id: String,
    pub group: String,
    pub position: Vec2,
    pub health: i32,
}

/// Команда от UI: заспавнить ally юнит типа `type_id`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnAllyIntent {
    pub type_id: String,
}

/// Таймер вражеского спавна
#[derive(Resource, Debug, Clone)]
pub struct EnemySpawner {
    pub timer: Timer,
}

impl EnemySpawner {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
        }
    }
}

/// Создать обе башни и записать их в Registry
pub fn spawn_towers(world: &mut World) -> ObjectiveTowers {
    let (health, ally_pos, enemy_pos) = {
        let config = world.resource::<LaneConfig>();
        (
            config.tower_health,
            config.tower_position(Faction::Ally),
            config.tower_position(Faction::Enemy),
        )
    };

    let ally = spawn_tower(world, Faction::Ally, ally_pos, health);
    let enemy = spawn_tower(world, Faction::Enemy, enemy_pos, health);

    let towers = ObjectiveTowers {
        ally: Some(ally),
        enemy: Some(enemy),
    };
    world.insert_resource(towers);
    towers
}

fn spawn_tower(world: &mut World, faction: Faction, position: Vec2, health: i32) -> Entity {
    let entity = world
        .spawn((
            Combatant::tower(faction),
            Tower,
            Health::new(health),
            LanePosition(position),
        ))
        .id();
    world.resource_mut::<Registry>().push(entity);
    entity
}

/// Заспавнить юнит типа `type_id` за фракцию `faction` у своей башни
pub fn spawn_unit(world: &mut World, faction: Faction, type_id: &str) -> Result<Entity, SpawnError> {
    if world.resource::<MatchState>().is_finished() {
        return Err(SpawnError::MatchFinished);
    }
    let position = spawn_point(world, faction)?;
    spawn_unit_at(world, faction, type_id, position)
}

/// Точка спавна: башня фракции, смещённая внутрь поля на `spawn_offset`
pub fn spawn_point(world: &World, faction: Faction) -> Result<Vec2, SpawnError> {
    let tower_position = world
        .resource::<ObjectiveTowers>()
        .tower_of(faction)
        .and_then(|tower| world.get::<LanePosition>(tower))
        .map(|position| position.0)
        .ok_or(SpawnError::MissingTower(faction))?;

    let offset = faction.advance_sign() * world.resource::<LaneConfig>().spawn_offset;
    Ok(Vec2::new(tower_position.x + offset, tower_position.y))
}

/// Заспавнить юнит в явной позиции (сценарии, отладка)
///
/// `UnitSpawned` несёт именно эту позицию.
pub fn spawn_unit_at(
    world: &mut World,
    faction: Faction,
    type_id: &str,
    position: Vec2,
) -> Result<Entity, SpawnError> {
    if world.resource::<MatchState>().is_finished() {
        return Err(SpawnError::MatchFinished);
    }

    let (unit_type, label_offset, label_step) = {
        let config = world.resource::<LaneConfig>();
        let unit_type = config
            .catalog
            .get(type_id)
            .cloned()
            .ok_or_else(|| SpawnError::UnknownUnitType(type_id.to_string()))?;
        (unit_type, config.health_label_offset, config.stack_label_step)
    };

    let sign = faction.advance_sign();

    let entity = world
        .spawn((
            Combatant::unit(faction),
            Health::new(unit_type.health),
            LanePosition(position),
            Attacker::new(
                unit_type.attack,
                unit_type.attack_range,
                unit_type.stop_distance,
                unit_type.attack_interval,
            ),
            Marcher {
                speed: sign * unit_type.speed,
            },
            UnitProfile {
                type_id: unit_type.id.clone(),
                group: unit_type.image_key.clone(),
            },
            display_intent(false, 0, label_offset, label_step),
        ))
        .id();
    world.resource_mut::<Registry>().push(entity);

    logger::log(&format!(
        "Spawned {} {} at ({:.1}, {:.1})",
        faction.as_str(),
        unit_type.id,
        position.x,
        position.y
    ));

    world.send_event(UnitSpawned {
        entity,
        faction,
        type_id: unit_type.id,
        group: unit_type.image_key,
        position,
        health: unit_type.health,
    });

    Ok(entity)
}

/// Вражеский юнит случайного типа (uniform по каталогу, seeded RNG)
pub fn spawn_random_enemy(world: &mut World) -> Result<Entity, SpawnError> {
    let count = world.resource::<LaneConfig>().catalog.len();
    if count == 0 {
        return Err(SpawnError::UnknownUnitType(String::new()));
    }

    let index = world.resource_mut::<DeterministicRng>().rng.gen_range(0..count);
    let type_id = world
        .resource::<LaneConfig>()
        .catalog
        .get_index(index)
        .map(|unit_type| unit_type.id.clone())
        .ok_or_else(|| SpawnError::UnknownUnitType(index.to_string()))?;

    spawn_unit(world, Faction::Enemy, &type_id)
}

/// Продвинуть таймер вражеского спавна на реальное время `real_delta`
///
/// Каждое срабатывание таймера = один вражеский юнит.
pub fn tick_enemy_spawner(world: &mut World, real_delta: Duration) -> Vec<Entity> {
    if world.resource::<MatchState>().is_finished() {
        return Vec::new();
    }

    let fired = {
        // Нет таймера: матч не стартовал (невалидный конфиг)
        let Some(mut spawner) = world.get_resource_mut::<EnemySpawner>() else {
            return Vec::new();
        };
        spawner.timer.tick(real_delta);
        spawner.timer.times_finished_this_tick()
    };

    let mut spawned = Vec::new();
    for _ in 0..fired {
        match spawn_random_enemy(world) {
            Ok(entity) => spawned.push(entity),
            Err(err) => {
                logger::log_warning(&format!("Enemy spawn skipped: {}", err));
                break;
            }
        }
    }
    spawned
}

/// System: вражеский спавн по таймеру (FixedUpdate)
pub fn enemy_spawn_system(world: &mut World) {
    let real_delta = world.resource::<Time<Fixed>>().delta();
    tick_enemy_spawner(world, real_delta);
}

/// System: обработка SpawnAllyIntent от UI
pub fn ally_spawn_intent_system(world: &mut World) {
    let intents: Vec<SpawnAllyIntent> = {
        let mut events = world.resource_mut::<Events<SpawnAllyIntent>>();
        let drained: Vec<SpawnAllyIntent> = events.drain().collect();
        drained
    };

    for intent in intents {
        if let Err(err) = spawn_unit(world, Faction::Ally, &intent.type_id) {
            logger::log_warning(&format!("Ally spawn rejected: {}", err));
        }
    }
}
