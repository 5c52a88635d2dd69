//! Decides when the next fish turns up and which one it is.

use crate::core::config::{FishingConfig, SecondsRange, SpawnDelays, SpeciesWeight};
use crate::core::error::FishingError;
use crate::fish::behavior::roll_between;
use crate::fish::{FactoryRegistry, Fish, FishFactoryProvider, Species};
use crate::session::FishingResult;
use rand::Rng;
use tracing::{debug, warn};

/// How the previous encounter ended, as far as spawn pacing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviousOutcome {
    /// First fish of the session.
    #[default]
    None,
    Success,
    /// Escape, snapped line, broken rod or lost rod.
    Failure,
    /// The player never reacted to a bite.
    MissedBite,
    /// The player struck with no fish on the line.
    PrematureHook,
}

impl PreviousOutcome {
    pub fn from_result(result: FishingResult) -> Self {
        match result {
            FishingResult::Success => PreviousOutcome::Success,
            FishingResult::MissedBite => PreviousOutcome::MissedBite,
            FishingResult::FishEscaped
            | FishingResult::LineBroken
            | FishingResult::RodBroken
            | FishingResult::RodPulledAway => PreviousOutcome::Failure,
        }
    }
}

/// Spawn pacing plus species selection over a pluggable factory source.
pub struct FishSpawner {
    provider: Box<dyn FishFactoryProvider>,
    delays: SpawnDelays,
    weights: Vec<SpeciesWeight>,
}

impl FishSpawner {
    pub fn new(provider: Box<dyn FishFactoryProvider>, config: &FishingConfig) -> Self {
        Self {
            provider,
            delays: config.spawn_delays.clone(),
            weights: config.species_weights.clone(),
        }
    }

    /// Spawner backed by the built-in factories.
    pub fn with_defaults(config: &FishingConfig) -> Self {
        Self::new(Box::new(FactoryRegistry::with_defaults()), config)
    }

    pub fn set_provider(&mut self, provider: Box<dyn FishFactoryProvider>) {
        self.provider = provider;
    }

    pub fn delay_range(&self, previous: PreviousOutcome) -> SecondsRange {
        match previous {
            PreviousOutcome::None | PreviousOutcome::Success => self.delays.default,
            PreviousOutcome::Failure => self.delays.after_failure,
            PreviousOutcome::MissedBite => self.delays.after_missed_bite,
            PreviousOutcome::PrematureHook => self.delays.after_premature_hook,
        }
    }

    /// Seconds until the next fish, rolled from the tier for `previous`.
    pub fn next_delay(&self, previous: PreviousOutcome, rng: &mut impl Rng) -> f64 {
        let delay = roll_between(rng, self.delay_range(previous));
        debug!(?previous, delay, "next spawn scheduled");
        delay
    }

    /// Weighted pick over the species table.
    pub fn select_species(&self, rng: &mut impl Rng) -> Species {
        let total: f64 = self.weights.iter().map(|w| w.weight.max(0.0)).sum();
        let fallback = self.weights.first().map_or(Species::Carp, |w| w.species);
        if total <= 0.0 {
            return fallback;
        }

        let roll = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        for entry in &self.weights {
            cumulative += entry.weight.max(0.0);
            if roll < cumulative {
                return entry.species;
            }
        }
        self.weights
            .iter()
            .rev()
            .find(|w| w.weight > 0.0)
            .map_or(fallback, |w| w.species)
    }

    /// Builds a fish of `species` with the angler's luck applied.
    pub fn spawn_species(&self, species: Species, luck: f64, rng: &mut impl Rng) -> Result<Fish, FishingError> {
        let Some(factory) = self.provider.factory(species) else {
            warn!(%species, "no factory registered for species");
            return Err(FishingError::UnknownSpecies(species));
        };
        Ok(factory.with_luck(luck).create_fish(rng))
    }

    /// Picks a species and builds a fish of it.
    pub fn spawn(&self, luck: f64, rng: &mut impl Rng) -> Result<Fish, FishingError> {
        let species = self.select_species(rng);
        self.spawn_species(species, luck, rng)
    }
}
