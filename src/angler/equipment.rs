use crate::core::constants::MAX_DURABILITY;
use serde::{Deserialize, Serialize};

/// Rod, line and luck carried by a player.
///
/// Durability only ever goes down: the damage mutators are the sole writers
/// and they clamp at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    rod_durability: f64,
    line_durability: f64,
    line_length: f64,
    fishing_luck: f64,
}

impl Equipment {
    /// Builds equipment, clamping durability to `[0, 100]` and luck to `>= 0`.
    pub fn new(rod_durability: f64, line_durability: f64, line_length: f64, fishing_luck: f64) -> Self {
        Self {
            rod_durability: rod_durability.clamp(0.0, MAX_DURABILITY),
            line_durability: line_durability.clamp(0.0, MAX_DURABILITY),
            line_length: line_length.max(0.0),
            fishing_luck: fishing_luck.max(0.0),
        }
    }

    pub fn rod_durability(&self) -> f64 {
        self.rod_durability
    }

    pub fn line_durability(&self) -> f64 {
        self.line_durability
    }

    pub fn line_length(&self) -> f64 {
        self.line_length
    }

    pub fn fishing_luck(&self) -> f64 {
        self.fishing_luck
    }

    pub fn damage_rod(&mut self, damage: f64) {
        self.rod_durability = (self.rod_durability - damage.max(0.0)).max(0.0);
    }

    pub fn damage_line(&mut self, damage: f64) {
        self.line_durability = (self.line_durability - damage.max(0.0)).max(0.0);
    }

    /// Snaps the line outright.
    pub fn break_line(&mut self) {
        self.damage_line(self.line_durability);
    }

    /// Snaps the rod outright.
    pub fn break_rod(&mut self) {
        self.damage_rod(self.rod_durability);
    }

    pub fn is_line_broken(&self) -> bool {
        self.line_durability <= 0.0
    }

    pub fn is_rod_broken(&self) -> bool {
        self.rod_durability <= 0.0
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::new(MAX_DURABILITY, MAX_DURABILITY, 50.0, 1.0)
    }
}
