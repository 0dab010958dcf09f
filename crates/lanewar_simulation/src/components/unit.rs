//! Компоненты юнита: профиль (тип + группа) и движение

use bevy::prelude::*;

/// Идентичность юнита из каталога
///
/// `group` (image key): ключ стакинга и коллизий внутри фракции,
/// на выбор целей не влияет.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct UnitProfile {
    pub type_id: String,
    pub group: String,
}

/// Движение вдоль линии
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Marcher {
    /// Знаковая скорость (единиц/сек): знак = направление наступления
    pub speed: f32,
}

impl Marcher {
    pub fn displacement(&self, delta: f32) -> f32 {
        self.speed * delta
    }
}
