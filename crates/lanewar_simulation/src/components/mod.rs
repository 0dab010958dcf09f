//! ECS Components участников боя
//!
//! Организация по доменам:
//! - actor: фракция, здоровье, позиция, маркеры Tower/Destroyed
//! - unit: профиль из каталога (type id + group key), движение
//! - display: display intent для presentation слоя

pub mod actor;
pub mod display;
pub mod unit;

pub use actor::*;
pub use display::*;
pub use unit::*;
