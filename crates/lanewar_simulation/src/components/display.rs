//! Display intent: что показывать, без вызовов в рендер
//!
//! Ядро только вычисляет намерение, presentation слой читает его
//! вместе с LanePosition каждый кадр (анимация, смещение health label).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum Pose {
    #[default]
    Walking,
    Attacking,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct DisplayIntent {
    pub pose: Pose,
    /// Ранг слева направо среди перекрывающихся юнитов своей группы
    pub stack_rank: usize,
    /// Смещение health label по Y от позиции юнита
    pub label_offset_y: f32,
}

/// Чистая функция от боевого состояния
pub fn display_intent(
    in_stop_range: bool,
    stack_rank: usize,
    base_label_offset: f32,
    label_step: f32,
) -> DisplayIntent {
    DisplayIntent {
        pose: if in_stop_range { Pose::Attacking } else { Pose::Walking },
        stack_rank,
        label_offset_y: base_label_offset + stack_rank as f32 * label_step,
    }
}
