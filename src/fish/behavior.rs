//! Per-species bite and fight policies.
//!
//! Species differ only in numbers, so each policy is a plain struct and every
//! species points at a `const` instance of it.

use super::types::Fish;
use crate::core::constants::{LINE_BREAK_DURABILITY_RATIO, PULL_AWAY_STRENGTH_RATIO, ROD_BREAK_DURABILITY_RATIO};
use crate::session::FishingResult;
use rand::Rng;

/// Uniform roll in `[min, max)`; a degenerate range returns `min`.
pub(crate) fn roll_between(rng: &mut impl Rng, (min, max): (f64, f64)) -> f64 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..max)
    }
}

/// True with probability `chance` (values outside `[0, 1]` saturate).
pub(crate) fn roll_chance(rng: &mut impl Rng, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}

/// How a species bites: window length, rebite odds and rebite pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiteBehavior {
    /// Float bobbing speed. Presentation only.
    pub bite_speed: f64,
    /// Seconds the bite window stays open, rolled per bite.
    pub bite_duration: (f64, f64),
    /// Chance the fish comes back after a missed hook.
    pub rebite_chance: f64,
    /// Seconds before the fish bites again, rolled per rebite.
    pub rebite_delay: (f64, f64),
}

impl BiteBehavior {
    pub fn roll_duration(&self, rng: &mut impl Rng) -> f64 {
        roll_between(rng, self.bite_duration)
    }

    pub fn roll_rebite_delay(&self, rng: &mut impl Rng) -> f64 {
        roll_between(rng, self.rebite_delay)
    }
}

/// Slow, patient bites with a long window; rarely comes back.
pub const CARP_BITE: BiteBehavior = BiteBehavior {
    bite_speed: 0.5,
    bite_duration: (2.0, 4.0),
    rebite_chance: 0.2,
    rebite_delay: (3.0, 5.0),
};

/// Quick jabs with a very short window; usually strikes again soon.
pub const PERCH_BITE: BiteBehavior = BiteBehavior {
    bite_speed: 2.0,
    bite_duration: (0.5, 1.0),
    rebite_chance: 0.8,
    rebite_delay: (0.5, 1.5),
};

/// Species-specific fight tuning. The breakaway thresholds themselves are
/// shared by every species and live in `core::constants`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FightBehavior {
    /// Fraction of fish strength reported as the strength needed to hold on.
    pub pull_away_ratio: f64,
    /// Multiplier on the fish's base escape chance.
    pub escape_modifier: f64,
}

/// Verdict of one fight evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FightCheck {
    /// Strength the player needs to keep hold of the rod.
    pub required_strength: f64,
    /// Why the fish got away, if it did.
    pub escape: Option<FishingResult>,
}

impl FightBehavior {
    pub fn required_strength(&self, fish: &Fish) -> f64 {
        fish.strength() * self.pull_away_ratio
    }

    /// Base escape chance after the species modifier.
    pub fn escape_probability(&self, fish: &Fish) -> f64 {
        fish.escape_chance() * self.escape_modifier
    }

    /// Deterministic breakaway checks, in priority order: strength before
    /// line before rod. Equipment damage is only ever blamed once the player
    /// was strong enough to hold on at all. The thresholds are the same for
    /// every species.
    pub fn check_breakaway(
        &self,
        fish: &Fish,
        player_strength: f64,
        rod_durability: f64,
        line_durability: f64,
    ) -> Option<FishingResult> {
        let strength = fish.strength();
        if player_strength < strength * PULL_AWAY_STRENGTH_RATIO {
            Some(FishingResult::RodPulledAway)
        } else if line_durability < strength * LINE_BREAK_DURABILITY_RATIO {
            Some(FishingResult::LineBroken)
        } else if rod_durability < strength * ROD_BREAK_DURABILITY_RATIO {
            Some(FishingResult::RodBroken)
        } else {
            None
        }
    }

    /// Full evaluation: breakaway checks, then a generic escape roll.
    ///
    /// The species escape probability is a per-second hazard, not a per-tick
    /// chance. The roll for this call succeeds with probability
    /// `escape_chance * escape_modifier * exposure`, where the fight engine
    /// passes `exposure = tension * dt`. Halving the tick length halves the
    /// per-tick chance, so the escape rate per second of fight does not
    /// depend on the tick rate. Zero or negative exposure never escapes.
    pub fn evaluate(
        &self,
        fish: &Fish,
        player_strength: f64,
        rod_durability: f64,
        line_durability: f64,
        exposure: f64,
        rng: &mut impl Rng,
    ) -> FightCheck {
        let required_strength = self.required_strength(fish);
        let escape = self
            .check_breakaway(fish, player_strength, rod_durability, line_durability)
            .or_else(|| {
                let chance = self.escape_probability(fish) * exposure.max(0.0);
                roll_chance(rng, chance).then_some(FishingResult::FishEscaped)
            });

        FightCheck {
            required_strength,
            escape,
        }
    }
}

pub const CARP_FIGHT: FightBehavior = FightBehavior {
    pull_away_ratio: 0.5,
    escape_modifier: 1.0,
};

/// Perch report a lower required strength and slip off 30% more often.
/// Whether the rod is pulled away still uses the shared threshold.
pub const PERCH_FIGHT: FightBehavior = FightBehavior {
    pull_away_ratio: 0.4,
    escape_modifier: 1.3,
};
