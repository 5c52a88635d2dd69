use super::equipment::Equipment;
use crate::core::constants::STRENGTH_DIMINISHING_FACTOR;
use serde::{Deserialize, Serialize};

/// The angler. Strength, experience and coins only grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    strength: f64,
    experience: u64,
    coins: u64,
    equipment: Equipment,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, strength: f64, equipment: Equipment) -> Self {
        Self {
            id,
            name: name.into(),
            strength: strength.max(0.0),
            experience: 0,
            coins: 0,
            equipment,
        }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn equipment_mut(&mut self) -> &mut Equipment {
        &mut self.equipment
    }

    /// Swaps in new gear and returns the old.
    pub fn replace_equipment(&mut self, equipment: Equipment) -> Equipment {
        std::mem::replace(&mut self.equipment, equipment)
    }

    /// Adds strength with diminishing returns: stronger anglers gain less
    /// from the same fish. Returns the amount actually applied.
    pub fn gain_strength(&mut self, amount: f64) -> f64 {
        let gain = amount.max(0.0) / (1.0 + self.strength * STRENGTH_DIMINISHING_FACTOR);
        self.strength += gain;
        gain
    }

    pub fn gain_experience(&mut self, amount: u64) {
        self.experience = self.experience.saturating_add(amount);
    }

    pub fn gain_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_gain_diminishes() {
        let mut weak = Player::new(1, "Weak", 0.0, Equipment::default());
        let mut strong = Player::new(2, "Strong", 40.0, Equipment::default());

        let weak_gain = weak.gain_strength(1.0);
        let strong_gain = strong.gain_strength(1.0);

        assert!((weak_gain - 1.0).abs() < f64::EPSILON);
        assert!((strong_gain - 0.2).abs() < 1e-9); // 1 / (1 + 4)
        assert!((strong.strength() - 40.2).abs() < 1e-9);
    }

    #[test]
    fn test_negative_gain_is_ignored() {
        let mut player = Player::new(1, "Angler", 5.0, Equipment::default());
        assert!(player.gain_strength(-3.0).abs() < f64::EPSILON);
        assert!((player.strength() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_experience_and_coins_accumulate() {
        let mut player = Player::new(1, "Angler", 5.0, Equipment::default());
        player.gain_experience(30);
        player.gain_experience(15);
        player.gain_coins(10);
        assert_eq!(player.experience(), 45);
        assert_eq!(player.coins(), 10);
    }

    #[test]
    fn test_replace_equipment_returns_old_gear() {
        let mut player = Player::new(1, "Angler", 5.0, Equipment::new(0.0, 0.0, 50.0, 1.0));
        let old = player.replace_equipment(Equipment::default());
        assert!(old.is_rod_broken());
        assert!(!player.equipment().is_rod_broken());
    }
}
