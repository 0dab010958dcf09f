//! Attacker component: боевые характеристики юнита
//!
//! Cooldown копится только пока юнит в stop range (в бою).
//! Движение или блокировка обнуляют накопитель.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    /// Урон за удар (без модификаторов)
    pub attack: i32,

    /// Дистанция (строго меньше) для попадания в список целей
    pub attack_range: f32,

    /// Дистанция (строго меньше) до противника, на которой юнит останавливается
    pub stop_distance: f32,

    /// Секунды боя между ударами
    pub attack_interval: f32,

    /// Накопленное время боя с последнего удара
    pub time_since_last_attack: f32,
}

impl Attacker {
    pub fn new(attack: i32, attack_range: f32, stop_distance: f32, attack_interval: f32) -> Self {
        Self {
            attack,
            attack_range,
            stop_distance,
            attack_interval,
            time_since_last_attack: 0.0,
        }
    }

    /// Копит время боя. true → пора бить (накопитель уже сброшен)
    pub fn accumulate(&mut self, delta: f32) -> bool {
        self.time_since_last_attack += delta;
        if self.time_since_last_attack >= self.attack_interval {
            self.time_since_last_attack = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset_cooldown(&mut self) {
        self.time_since_last_attack = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attacker_cooldown() {
        let mut attacker = Attacker::new(15, 90.0, 85.0, 5.0);

        for _ in 0..4 {
            assert!(!attacker.accumulate(1.0));
        }
        assert_eq!(attacker.time_since_last_attack, 4.0);

        assert!(attacker.accumulate(1.0));
        assert_eq!(attacker.time_since_last_attack, 0.0);
    }

    #[test]
    fn test_reset_discards_progress() {
        let mut attacker = Attacker::new(10, 50.0, 50.0, 3.0);
        attacker.accumulate(2.5);
        attacker.reset_cooldown();

        // После сброса снова нужно полные 3 секунды
        assert!(!attacker.accumulate(2.5));
        assert!(attacker.accumulate(0.5));
    }

    #[test]
    fn test_zero_interval_strikes_every_tick() {
        let mut attacker = Attacker::new(10, 50.0, 50.0, 0.0);
        assert!(attacker.accumulate(0.0));
        assert!(attacker.accumulate(0.016));
    }
}
