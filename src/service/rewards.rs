use crate::core::constants::{COINS_REWARD_PER_KG, EXPERIENCE_REWARD_PER_KG, STRENGTH_REWARD_PER_KG};
use crate::fish::Fish;
use serde::{Deserialize, Serialize};

/// What a landed fish is worth before diminishing returns are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FishingRewards {
    pub strength: f64,
    pub experience: u64,
    pub coins: u64,
}

/// Rewards scale linearly with fish weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCalculator;

impl RewardCalculator {
    pub fn calculate(&self, fish: &Fish) -> FishingRewards {
        let weight = fish.weight();
        FishingRewards {
            strength: weight * STRENGTH_REWARD_PER_KG,
            experience: (weight * EXPERIENCE_REWARD_PER_KG).round() as u64,
            coins: (weight * COINS_REWARD_PER_KG).round() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::Species;

    #[test]
    fn test_two_kilo_carp() {
        let fish = Fish::new(Species::Carp, 2.0, 3.0);
        let rewards = RewardCalculator.calculate(&fish);
        assert!((rewards.strength - 0.2).abs() < 1e-9);
        assert_eq!(rewards.experience, 30);
        assert_eq!(rewards.coins, 10);
    }

    #[test]
    fn test_rounding() {
        let fish = Fish::new(Species::Perch, 0.25, 0.3);
        let rewards = RewardCalculator.calculate(&fish);
        // 3.75 xp and 1.25 coins
        assert_eq!(rewards.experience, 4);
        assert_eq!(rewards.coins, 1);
    }
}
