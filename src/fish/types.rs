//! Fish species and the immutable fish value.

use super::behavior::{BiteBehavior, FightBehavior, CARP_BITE, CARP_FIGHT, PERCH_BITE, PERCH_FIGHT};
use crate::core::constants::{MIN_FISH_STRENGTH, MIN_FISH_WEIGHT_KG};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Catchable species. Behaviour policies are looked up from the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Carp,
    Perch,
}

impl Species {
    pub const ALL: [Species; 2] = [Species::Carp, Species::Perch];

    pub fn name(&self) -> &'static str {
        match self {
            Species::Carp => "Carp",
            Species::Perch => "Perch",
        }
    }

    /// Base chance for a hooked fish to shake loose.
    pub fn escape_chance(&self) -> f64 {
        match self {
            Species::Carp => 0.15,
            Species::Perch => 0.25,
        }
    }

    pub fn bite_behavior(&self) -> &'static BiteBehavior {
        match self {
            Species::Carp => &CARP_BITE,
            Species::Perch => &PERCH_BITE,
        }
    }

    pub fn fight_behavior(&self) -> &'static FightBehavior {
        match self {
            Species::Carp => &CARP_FIGHT,
            Species::Perch => &PERCH_FIGHT,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One fish on the end of the line. Immutable once built; the id survives
/// rebites so callers can tell the same fish from a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    id: Uuid,
    species: Species,
    weight: f64,
    strength: f64,
    escape_chance: f64,
}

impl Fish {
    /// Weight and strength are floored at a small positive value.
    pub fn new(species: Species, weight: f64, strength: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            species,
            weight: weight.max(MIN_FISH_WEIGHT_KG),
            strength: strength.max(MIN_FISH_STRENGTH),
            escape_chance: species.escape_chance(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn escape_chance(&self) -> f64 {
        self.escape_chance
    }

    pub fn bite_behavior(&self) -> &'static BiteBehavior {
        self.species.bite_behavior()
    }

    pub fn fight_behavior(&self) -> &'static FightBehavior {
        self.species.fight_behavior()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fish_takes_species_escape_chance() {
        let carp = Fish::new(Species::Carp, 2.0, 3.0);
        let perch = Fish::new(Species::Perch, 0.5, 0.6);
        assert!((carp.escape_chance() - 0.15).abs() < f64::EPSILON);
        assert!((perch.escape_chance() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weight_and_strength_stay_positive() {
        let fish = Fish::new(Species::Carp, 0.0, -4.0);
        assert!(fish.weight() > 0.0);
        assert!(fish.strength() > 0.0);
    }

    #[test]
    fn test_each_fish_gets_unique_id() {
        let a = Fish::new(Species::Perch, 1.0, 1.0);
        let b = Fish::new(Species::Perch, 1.0, 1.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clone_keeps_identity() {
        let fish = Fish::new(Species::Carp, 1.0, 1.5);
        assert_eq!(fish.clone().id(), fish.id());
    }

    #[test]
    fn test_species_names() {
        assert_eq!(Species::Carp.to_string(), "Carp");
        assert_eq!(Species::Perch.name(), "Perch");
        assert_eq!(Species::ALL.len(), 2);
    }
}
