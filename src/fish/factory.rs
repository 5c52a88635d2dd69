//! Fish factories and the provider the spawner looks them up from.

use super::behavior::roll_between;
use super::types::{Fish, Species};
use rand::Rng;
use std::collections::HashMap;

/// Builds random fish of one species.
///
/// Weight is uniform in the species range, then scaled by
/// `luck_modifier * jitter`. Strength is weight times a second random
/// multiplier, so two fish of equal weight can fight very differently.
#[derive(Debug, Clone, PartialEq)]
pub struct FishFactory {
    species: Species,
    weight_range: (f64, f64),
    jitter: (f64, f64),
    strength_multiplier: (f64, f64),
    luck_modifier: f64,
}

impl FishFactory {
    /// Factory with the built-in tuning for `species` and neutral luck.
    pub fn for_species(species: Species) -> Self {
        let (weight_range, jitter, strength_multiplier) = match species {
            Species::Carp => ((0.5, 5.0), (0.8, 1.2), (1.2, 1.8)),
            Species::Perch => ((0.1, 1.5), (0.9, 1.1), (0.8, 1.4)),
        };
        Self {
            species,
            weight_range,
            jitter,
            strength_multiplier,
            luck_modifier: 1.0,
        }
    }

    pub fn with_luck(mut self, luck: f64) -> Self {
        self.set_luck_modifier(luck);
        self
    }

    pub fn set_luck_modifier(&mut self, luck: f64) {
        self.luck_modifier = luck.max(0.0);
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn luck_modifier(&self) -> f64 {
        self.luck_modifier
    }

    pub fn weight_range(&self) -> (f64, f64) {
        self.weight_range
    }

    pub fn create_fish(&self, rng: &mut impl Rng) -> Fish {
        let base_weight = roll_between(rng, self.weight_range);
        let weight = base_weight * self.luck_modifier * roll_between(rng, self.jitter);
        let strength = weight * roll_between(rng, self.strength_multiplier);
        Fish::new(self.species, weight, strength)
    }
}

/// Source of factories, keyed by species. New species plug in here without
/// touching spawn scheduling.
pub trait FishFactoryProvider {
    fn factory(&self, species: Species) -> Option<FishFactory>;
}

/// Map-backed provider.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<Species, FishFactory>,
}

impl FactoryRegistry {
    /// Empty registry; every lookup fails until factories are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in factory for every species.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for species in Species::ALL {
            registry.register(FishFactory::for_species(species));
        }
        registry
    }

    /// Adds or replaces the factory for its species.
    pub fn register(&mut self, factory: FishFactory) {
        self.factories.insert(factory.species(), factory);
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl FishFactoryProvider for FactoryRegistry {
    fn factory(&self, species: Species) -> Option<FishFactory> {
        self.factories.get(&species).cloned()
    }
}
