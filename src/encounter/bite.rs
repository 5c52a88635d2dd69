//! The timed bite window and the rebite decision.

use crate::core::constants::TIME_EPSILON;
use crate::fish::behavior::roll_chance;
use crate::fish::{BiteBehavior, Fish};
use crate::session::{FishingSession, FishingState};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

/// How a bite window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiteOutcome {
    /// Hook input arrived while the window was open.
    Hooked,
    /// The window ran out with no input.
    Missed,
}

/// What happens to a fish after a missed hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RebiteDecision {
    /// The same fish bites again after `delay` seconds.
    Rebite { delay: f64 },
    /// The fish is gone.
    Lost,
}

/// Countdown for one bite of one fish.
///
/// Input is polled every tick before the clock moves, so a hook arriving on
/// the tick the window closes still counts.
#[derive(Debug, Clone)]
pub struct BiteSequence {
    fish_id: Uuid,
    duration: f64,
    remaining: f64,
    bite_speed: f64,
    finished: bool,
}

impl BiteSequence {
    pub fn new(fish: &Fish, duration: f64) -> Self {
        let duration = duration.max(0.0);
        Self {
            fish_id: fish.id(),
            duration,
            remaining: duration,
            bite_speed: fish.bite_behavior().bite_speed,
            finished: false,
        }
    }

    /// Starts a bite with a duration rolled from the fish's behaviour.
    pub fn start(fish: &Fish, rng: &mut impl Rng) -> Self {
        let duration = fish.bite_behavior().roll_duration(rng);
        debug!(species = %fish.species(), duration, "bite window opened");
        Self::new(fish, duration)
    }

    pub fn fish_id(&self) -> Uuid {
        self.fish_id
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn remaining(&self) -> f64 {
        self.remaining.max(0.0)
    }

    pub fn elapsed(&self) -> f64 {
        self.duration - self.remaining()
    }

    /// Float bobbing speed for presentation.
    pub fn bite_speed(&self) -> f64 {
        self.bite_speed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the window by `dt`. `hook_input` is polled only while the
    /// session is Biting on this sequence's fish; otherwise the sequence is
    /// cancelled. Returns the outcome once, then `None` forever.
    pub fn tick(
        &mut self,
        session: &FishingSession,
        dt: f64,
        hook_input: impl FnOnce() -> bool,
    ) -> Option<BiteOutcome> {
        if self.finished {
            return None;
        }

        let on_our_fish = session.state() == FishingState::Biting
            && session.current_fish().map(Fish::id) == Some(self.fish_id);
        if !on_our_fish {
            debug!("bite sequence cancelled, session left Biting");
            self.finished = true;
            return None;
        }

        if hook_input() {
            self.finished = true;
            return Some(BiteOutcome::Hooked);
        }

        self.remaining -= dt.max(0.0);
        if self.remaining <= TIME_EPSILON {
            self.finished = true;
            return Some(BiteOutcome::Missed);
        }

        None
    }
}

/// Rolls whether a missed fish comes back: chance is the species rebite
/// chance scaled by the angler's luck.
pub fn decide_rebite(behavior: &BiteBehavior, luck: f64, rng: &mut impl Rng) -> RebiteDecision {
    let chance = behavior.rebite_chance * luck.max(0.0);
    if roll_chance(rng, chance) {
        RebiteDecision::Rebite {
            delay: behavior.roll_rebite_delay(rng),
        }
    } else {
        RebiteDecision::Lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::Species;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn biting(fish: &Fish) -> FishingSession {
        let mut session = FishingSession::new();
        session.start_session();
        session.set_fish(fish.clone()).unwrap();
        session
    }

    #[test]
    fn test_missed_exactly_at_duration() {
        let fish = Fish::new(Species::Carp, 2.0, 3.0);
        let session = biting(&fish);
        let mut bite = BiteSequence::new(&fish, 2.0);

        for tick in 1..20 {
            assert_eq!(bite.tick(&session, 0.1, || false), None, "tick {tick}");
        }
        assert_eq!(bite.tick(&session, 0.1, || false), Some(BiteOutcome::Missed));
        assert!(bite.is_finished());
    }

    #[test]
    fn test_hook_input_stops_timer() {
        let fish = Fish::new(Species::Perch, 0.5, 0.6);
        let session = biting(&fish);
        let mut bite = BiteSequence::new(&fish, 1.0);

        assert_eq!(bite.tick(&session, 0.1, || false), None);
        assert_eq!(bite.tick(&session, 0.1, || true), Some(BiteOutcome::Hooked));
        assert_eq!(bite.tick(&session, 0.1, || true), None);
        assert!((bite.remaining() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_input_wins_tie_with_expiry() {
        let fish = Fish::new(Species::Perch, 0.5, 0.6);
        let session = biting(&fish);
        let mut bite = BiteSequence::new(&fish, 0.1);
        assert_eq!(bite.tick(&session, 0.1, || true), Some(BiteOutcome::Hooked));
    }

    #[test]
    fn test_not_polled_outside_biting() {
        let fish = Fish::new(Species::Carp, 2.0, 3.0);
        let mut session = biting(&fish);
        let mut bite = BiteSequence::new(&fish, 2.0);
        session.reset_to_waiting();

        let mut polled = false;
        let outcome = bite.tick(&session, 0.1, || {
            polled = true;
            true
        });
        assert_eq!(outcome, None);
        assert!(!polled);
        assert!(bite.is_finished());
    }

    #[test]
    fn test_stale_sequence_ignores_new_fish() {
        let old = Fish::new(Species::Carp, 2.0, 3.0);
        let new = Fish::new(Species::Carp, 2.0, 3.0);
        let session = biting(&new);
        let mut bite = BiteSequence::new(&old, 2.0);
        assert_eq!(bite.tick(&session, 0.1, || true), None);
    }

    #[test]
    fn test_start_rolls_species_duration() {
        let fish = Fish::new(Species::Carp, 2.0, 3.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let bite = BiteSequence::start(&fish, &mut rng);
            assert!((2.0..4.0).contains(&bite.duration()));
        }
    }

    #[test]
    fn test_forced_rebite() {
        let behavior = BiteBehavior {
            rebite_chance: 1.0,
            ..*Species::Carp.bite_behavior()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            match decide_rebite(&behavior, 1.0, &mut rng) {
                RebiteDecision::Rebite { delay } => assert!((3.0..5.0).contains(&delay)),
                RebiteDecision::Lost => panic!("forced rebite was lost"),
            }
        }
    }

    #[test]
    fn test_luck_scales_rebite_chance() {
        // A roll of ~0.5 misses a 0.2 chance but hits it at 3x luck.
        let behavior = *Species::Carp.bite_behavior();
        let mut rng = StepRng::new(1 << 63, 0);
        assert_eq!(decide_rebite(&behavior, 1.0, &mut rng), RebiteDecision::Lost);
        assert!(matches!(
            decide_rebite(&behavior, 3.0, &mut rng),
            RebiteDecision::Rebite { .. }
        ));
    }

    #[test]
    fn test_zero_luck_never_rebites() {
        let behavior = *Species::Perch.bite_behavior();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(decide_rebite(&behavior, 0.0, &mut rng), RebiteDecision::Lost);
    }
}
