//! Persistence sinks for catches and player progress.
//!
//! The engine only ever writes through these traits, once per landed fish.
//! The in-memory implementations back the tests, the simulator and the
//! terminal front-end.

use crate::fish::{Fish, Species};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A landed fish, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaughtFishRecord {
    pub id: Uuid,
    pub player_id: u32,
    pub species: Species,
    pub weight: f64,
    pub strength: f64,
    pub caught_at: DateTime<Utc>,
}

impl CaughtFishRecord {
    pub fn new(player_id: u32, fish: &Fish) -> Self {
        Self {
            id: fish.id(),
            player_id,
            species: fish.species(),
            weight: fish.weight(),
            strength: fish.strength(),
            caught_at: Utc::now(),
        }
    }
}

/// Progress granted to a player by one catch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsUpdate {
    pub player_id: u32,
    /// Strength actually gained, after diminishing returns.
    pub strength_gain: f64,
    pub experience_gain: u64,
    pub coins_gain: u64,
}

pub trait FishRepository {
    fn save_caught_fish(&mut self, record: CaughtFishRecord);
    /// Catches for `player_id`, oldest first.
    fn history(&self, player_id: u32) -> Vec<CaughtFishRecord>;
    /// Catch count per species for `player_id`.
    fn statistics(&self, player_id: u32) -> HashMap<Species, u32>;
}

pub trait PlayerRepository {
    fn update_player_stats(&mut self, update: PlayerStatsUpdate);
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFishRepository {
    records: Vec<CaughtFishRecord>,
}

impl InMemoryFishRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CaughtFishRecord] {
        &self.records
    }
}

impl FishRepository for InMemoryFishRepository {
    fn save_caught_fish(&mut self, record: CaughtFishRecord) {
        self.records.push(record);
    }

    fn history(&self, player_id: u32) -> Vec<CaughtFishRecord> {
        self.records
            .iter()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect()
    }

    fn statistics(&self, player_id: u32) -> HashMap<Species, u32> {
        let mut counts = HashMap::new();
        for record in self.records.iter().filter(|r| r.player_id == player_id) {
            *counts.entry(record.species).or_insert(0) += 1;
        }
        counts
    }
}

/// Running totals per player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub catches: u32,
    pub strength_gained: f64,
    pub experience_gained: u64,
    pub coins_gained: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPlayerRepository {
    totals: HashMap<u32, PlayerTotals>,
    updates: usize,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self, player_id: u32) -> PlayerTotals {
        self.totals.get(&player_id).copied().unwrap_or_default()
    }

    /// Number of updates received, across all players.
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl PlayerRepository for InMemoryPlayerRepository {
    fn update_player_stats(&mut self, update: PlayerStatsUpdate) {
        let totals = self.totals.entry(update.player_id).or_default();
        totals.catches += 1;
        totals.strength_gained += update.strength_gain;
        totals.experience_gained = totals.experience_gained.saturating_add(update.experience_gain);
        totals.coins_gained = totals.coins_gained.saturating_add(update.coins_gain);
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_and_statistics_per_player() {
        let mut repo = InMemoryFishRepository::new();
        let carp = Fish::new(Species::Carp, 2.0, 3.0);
        let perch = Fish::new(Species::Perch, 0.5, 0.6);
        repo.save_caught_fish(CaughtFishRecord::new(1, &carp));
        repo.save_caught_fish(CaughtFishRecord::new(1, &perch));
        repo.save_caught_fish(CaughtFishRecord::new(1, &Fish::new(Species::Carp, 1.0, 1.5)));
        repo.save_caught_fish(CaughtFishRecord::new(2, &carp));

        let history = repo.history(1);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, carp.id());

        let stats = repo.statistics(1);
        assert_eq!(stats.get(&Species::Carp), Some(&2));
        assert_eq!(stats.get(&Species::Perch), Some(&1));
        assert!(repo.statistics(3).is_empty());
    }

    #[test]
    fn test_record_serializes() {
        let fish = Fish::new(Species::Perch, 0.5, 0.6);
        let record = CaughtFishRecord::new(7, &fish);
        let json = serde_json::to_string(&record).unwrap();
        let back: CaughtFishRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_player_totals_accumulate() {
        let mut repo = InMemoryPlayerRepository::new();
        for _ in 0..2 {
            repo.update_player_stats(PlayerStatsUpdate {
                player_id: 4,
                strength_gain: 0.1,
                experience_gain: 30,
                coins_gain: 10,
            });
        }
        let totals = repo.totals(4);
        assert_eq!(totals.catches, 2);
        assert_eq!(totals.experience_gained, 60);
        assert_eq!(totals.coins_gained, 20);
        assert_eq!(repo.totals(5), PlayerTotals::default());
        assert_eq!(repo.update_count(), 2);
    }
}
