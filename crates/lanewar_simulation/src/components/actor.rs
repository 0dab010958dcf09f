//! Базовые компоненты участников боя: Faction, Health, Combatant, LanePosition

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Сторона конфликта
///
/// Определяет валидные цели атаки: юнит бьёт только чужую фракцию.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub enum Faction {
    /// Левая сторона (спавн по команде игрока)
    Ally,
    /// Правая сторона (спавн по таймеру)
    Enemy,
}

impl Faction {
    pub fn opponent(self) -> Self {
        match self {
            Faction::Ally => Faction::Enemy,
            Faction::Enemy => Faction::Ally,
        }
    }

    /// Знак скорости: ally идёт вправо (+x), enemy влево (-x)
    pub fn advance_sign(self) -> f32 {
        match self {
            Faction::Ally => 1.0,
            Faction::Enemy => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Ally => "ally",
            Faction::Enemy => "enemy",
        }
    }
}

/// Вид участника боя (закрытый набор, явный dispatch в тике)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum CombatantKind {
    Unit,
    Tower,
}

/// Участник боя: всё, что есть в Registry
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Combatant {
    pub faction: Faction,
    pub kind: CombatantKind,
}

impl Combatant {
    pub fn unit(faction: Faction) -> Self {
        Self { faction, kind: CombatantKind::Unit }
    }

    pub fn tower(faction: Faction) -> Self {
        Self { faction, kind: CombatantKind::Tower }
    }
}

/// Здоровье
///
/// Инвариант: current монотонно не возрастает (лечения нет).
/// Может уйти в минус: урон вычитается целиком, без clamp.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Возвращает true если после удара health ≤ 0
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current -= amount.max(0);
        self.is_depleted()
    }
}

/// Позиция на линии (x: ось наступления)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct LanePosition(pub Vec2);

impl LanePosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn distance(&self, other: &LanePosition) -> f32 {
        self.0.distance(other.0)
    }
}

/// Маркер: участник уничтожен (active == false)
///
/// Вставляется ровно один раз. Entity исключается из сканов сразу,
/// а из Registry удаляется в конце тика.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Destroyed;

/// Маркер башни (неподвижная цель)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Tower;
