//! Конфигурация матча: размеры поля, башни, спавн, каталог юнитов
//!
//! Data-driven: `LaneConfig` можно загрузить из JSON (serde_json),
//! отсутствующие поля берутся из Default.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Ошибки загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse lane config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unit catalog is empty")]
    EmptyCatalog,

    #[error("duplicate unit type id `{0}` in catalog")]
    DuplicateUnitType(String),

    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: String, value: f32 },
}

/// Запись каталога юнитов (immutable)
///
/// `speed`: модуль скорости, направление задаёт спавнер по фракции.
/// `image_key`: групповой ключ (стакинг/коллизии), а не поведенческий.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    pub id: String,
    pub health: i32,
    pub attack: i32,
    pub speed: f32,
    pub image_key: String,
    pub attack_range: f32,
    pub stop_distance: f32,
    /// Секунды (в масштабированном времени симуляции)
    pub attack_interval: f32,
}

impl UnitType {
    /// Базовый юнит ближнего боя
    pub fn rabbit() -> Self {
        Self {
            id: "tmp_rabbit".to_string(),
            health: 50,
            attack: 10,
            speed: 50.0,
            image_key: "rabbit".to_string(),
            attack_range: 50.0,
            stop_distance: 50.0,
            attack_interval: 3.0,
        }
    }

    pub fn archer() -> Self {
        Self {
            id: "archer".to_string(),
            health: 20,
            attack: 15,
            speed: 30.0,
            image_key: "archer".to_string(),
            attack_range: 90.0,
            stop_distance: 85.0,
            attack_interval: 5.0,
        }
    }
}

/// Упорядоченный каталог типов юнитов
///
/// Порядок значим: по нему идут кнопки спавна и равномерный random выбор.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitCatalog {
    entries: Vec<UnitType>,
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self {
            entries: vec![UnitType::rabbit(), UnitType::archer()],
        }
    }
}

impl UnitCatalog {
    pub fn new(entries: Vec<UnitType>) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&UnitType> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&UnitType> {
        self.entries.get(index)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Параметры матча
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    pub field_width: f32,
    pub field_height: f32,
    /// Отступ башни от края поля по X
    pub tower_inset: f32,
    pub tower_health: i32,
    /// Смещение точки спавна от башни внутрь поля
    pub spawn_offset: f32,
    /// Период вражеского спавна (реальные секунды, без time_scale)
    pub enemy_spawn_interval: f32,
    /// deltaTime симуляции = реальная дельта × time_scale
    pub time_scale: f32,
    /// |Δx| ниже порога → юниты одной группы стакаются (display)
    pub stack_threshold: f32,
    /// |Δx| ниже порога → юнит другой группы своей фракции блокирует движение
    pub collision_threshold: f32,
    pub health_label_offset: f32,
    pub stack_label_step: f32,
    pub catalog: UnitCatalog,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            field_width: 1200.0,
            field_height: 600.0,
            tower_inset: 50.0,
            tower_health: 500,
            spawn_offset: 20.0,
            enemy_spawn_interval: 4.0,
            time_scale: 2.0, // delta_ms / 500
            stack_threshold: 10.0,
            collision_threshold: 20.0,
            health_label_offset: 50.0,
            stack_label_step: 15.0,
            catalog: UnitCatalog::default(),
        }
    }
}

impl LaneConfig {
    /// Загрузить и провалидировать конфиг из JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LaneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for entry in &self.catalog.entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::DuplicateUnitType(entry.id.clone()));
            }
            if entry.health <= 0 {
                return Err(invalid(format!("{}.health", entry.id), entry.health as f32));
            }
            if entry.attack < 0 {
                return Err(invalid(format!("{}.attack", entry.id), entry.attack as f32));
            }
            check_non_negative(&format!("{}.speed", entry.id), entry.speed)?;
            check_non_negative(&format!("{}.attack_range", entry.id), entry.attack_range)?;
            check_non_negative(&format!("{}.stop_distance", entry.id), entry.stop_distance)?;
            check_non_negative(&format!("{}.attack_interval", entry.id), entry.attack_interval)?;
        }

        if self.tower_health <= 0 {
            return Err(invalid("tower_health".to_string(), self.tower_health as f32));
        }
        if !(self.enemy_spawn_interval.is_finite() && self.enemy_spawn_interval > 0.0) {
            return Err(invalid("enemy_spawn_interval".to_string(), self.enemy_spawn_interval));
        }
        check_non_negative("time_scale", self.time_scale)?;
        check_non_negative("stack_threshold", self.stack_threshold)?;
        check_non_negative("collision_threshold", self.collision_threshold)?;

        Ok(())
    }

    /// Позиция башни фракции (ally слева, enemy справа)
    pub fn tower_position(&self, faction: crate::components::Faction) -> Vec2 {
        let y = self.field_height / 2.0;
        match faction {
            crate::components::Faction::Ally => Vec2::new(self.tower_inset, y),
            crate::components::Faction::Enemy => Vec2::new(self.field_width - self.tower_inset, y),
        }
    }
}

fn invalid(field: String, value: f32) -> ConfigError {
    ConfigError::InvalidValue { field, value }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field.to_string(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Faction;

    #[test]
    fn test_default_catalog_order() {
        let config = LaneConfig::default();
        let ids: Vec<_> = config.catalog.ids().collect();
        assert_eq!(ids, vec!["tmp_rabbit", "archer"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tower_positions() {
        let config = LaneConfig::default();
        assert_eq!(config.tower_position(Faction::Ally), Vec2::new(50.0, 300.0));
        assert_eq!(config.tower_position(Faction::Enemy), Vec2::new(1150.0, 300.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LaneConfig::from_json_str(r#"{ "tower_health": 300 }"#).unwrap();
        assert_eq!(config.tower_health, 300);
        assert_eq!(config.enemy_spawn_interval, 4.0);
        assert_eq!(config.catalog.len(), 2);
    }

    #[test]
    fn test_custom_catalog_from_json() {
        let json = r#"{
            "catalog": [
                { "id": "knight", "health": 80, "attack": 12, "speed": 20.0, "image_key": "knight",
                  "attack_range": 40.0, "stop_distance": 40.0, "attack_interval": 2.0 }
            ]
        }"#;
        let config = LaneConfig::from_json_str(json).unwrap();
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog.get("knight").map(|t| t.attack), Some(12));
        assert!(config.catalog.get("archer").is_none());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = LaneConfig::from_json_str(r#"{ "catalog": [] }"#);
        assert!(matches!(result, Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut config = LaneConfig::default();
        config.catalog = UnitCatalog::new(vec![UnitType::archer(), UnitType::archer()]);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateUnitType(id)) if id == "archer"));
    }

    #[test]
    fn test_negative_range_rejected() {
        let mut archer = UnitType::archer();
        archer.attack_range = -1.0;
        let mut config = LaneConfig::default();
        config.catalog = UnitCatalog::new(vec![archer]);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_negative_attack_rejected() {
        let mut rabbit = UnitType::rabbit();
        rabbit.attack = -5;
        let mut config = LaneConfig::default();
        config.catalog = UnitCatalog::new(vec![rabbit, UnitType::archer()]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "tmp_rabbit.attack"
        ));
    }

    #[test]
    fn test_spawn_interval_must_be_positive() {
        for interval in [0.0, -1.0, f32::NAN] {
            let config = LaneConfig {
                enemy_spawn_interval: interval,
                ..LaneConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { field, .. }) if field == "enemy_spawn_interval"
            ));
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(LaneConfig::from_json_str("{ nope"), Err(ConfigError::Parse(_))));
    }
}
