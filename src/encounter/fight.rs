//! The pull engine: turns reel input into progress and decides how a fight ends.

use crate::angler::Equipment;
use crate::core::config::FishingConfig;
use crate::core::constants::TIME_EPSILON;
use crate::fish::behavior::roll_chance;
use crate::fish::Fish;
use crate::session::FishingResult;
use rand::Rng;
use tracing::debug;

/// Floor used in place of a zero player strength when computing ratios.
const MIN_PLAYER_STRENGTH: f64 = 1e-6;

/// Per-fight state, created when the fish is hooked and dropped when the
/// encounter ends.
#[derive(Debug, Clone, PartialEq)]
pub struct PullEngine {
    cast_distance: f64,
    distance: f64,
    pulling: bool,
    idle_time: f64,
    elapsed: f64,
    tension: f64,
    resisting: bool,
}

impl PullEngine {
    pub fn new(cast_distance: f64) -> Self {
        let cast_distance = cast_distance.max(0.0);
        Self {
            cast_distance,
            distance: cast_distance,
            pulling: false,
            idle_time: 0.0,
            elapsed: 0.0,
            tension: 0.0,
            resisting: false,
        }
    }

    pub fn from_config(config: &FishingConfig) -> Self {
        Self::new(config.cast_distance)
    }

    /// Begins reeling; resets the idle timer.
    pub fn start_pull(&mut self) {
        self.pulling = true;
        self.idle_time = 0.0;
    }

    pub fn release(&mut self) {
        self.pulling = false;
    }

    pub fn is_pulling(&self) -> bool {
        self.pulling
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn cast_distance(&self) -> f64 {
        self.cast_distance
    }

    /// 0.0 at the cast, 1.0 at the bank.
    pub fn progress(&self) -> f64 {
        if self.cast_distance <= 0.0 {
            1.0
        } else {
            1.0 - self.distance / self.cast_distance
        }
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Whether the fish fought back on the last pulling tick.
    pub fn is_resisting(&self) -> bool {
        self.resisting
    }

    pub fn idle_time(&self) -> f64 {
        self.idle_time
    }

    /// Seconds spent in the Fighting stage.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fish strength relative to the player's.
    pub fn resistance(fish: &Fish, player_strength: f64) -> f64 {
        fish.strength() / player_strength.max(MIN_PLAYER_STRENGTH)
    }

    /// Idle clock for the Hooked stage, before the first pull.
    pub fn tick_idle(&mut self, dt: f64, idle_timeout: f64) -> Option<FishingResult> {
        self.idle_time += dt.max(0.0);
        self.idle_expired(idle_timeout)
    }

    fn idle_expired(&self, idle_timeout: f64) -> Option<FishingResult> {
        if !self.pulling && self.idle_time > idle_timeout + TIME_EPSILON {
            debug!(idle_time = self.idle_time, "fish lost to slack line");
            Some(FishingResult::FishEscaped)
        } else {
            None
        }
    }

    fn reel(&mut self, fish: &Fish, player_strength: f64, dt: f64, config: &FishingConfig, rng: &mut impl Rng) {
        let r = &config.resistance;
        let resistance = Self::resistance(fish, player_strength);
        let adjusted = config.pull_speed * dt / (1.0 + resistance * r.slowdown_factor);

        self.resisting = roll_chance(rng, resistance * r.resist_chance_factor);
        let step = if !self.resisting {
            adjusted
        } else if roll_chance(rng, r.pull_back_chance) {
            -adjusted * r.pull_back_multiplier
        } else {
            adjusted * r.resist_pull_multiplier
        };

        self.distance = (self.distance - step).clamp(0.0, self.cast_distance);
    }

    fn update_tension(&mut self, fish: &Fish, player_strength: f64) {
        let remaining = if self.cast_distance > 0.0 {
            self.distance / self.cast_distance
        } else {
            0.0
        };
        let load = fish.strength() * remaining / player_strength.max(MIN_PLAYER_STRENGTH);
        self.tension = load.clamp(0.0, 1.0);
    }

    /// One Fighting tick. Reels if pulling, then runs the terminal checks:
    /// landed, rod pulled away, line broken, rod broken, generic escape and
    /// finally the idle timeout. A break zeroes the broken item.
    pub fn tick(
        &mut self,
        fish: &Fish,
        player_strength: f64,
        equipment: &mut Equipment,
        dt: f64,
        config: &FishingConfig,
        rng: &mut impl Rng,
    ) -> Option<FishingResult> {
        let dt = dt.max(0.0);
        self.elapsed += dt;

        if self.pulling {
            self.idle_time = 0.0;
            self.reel(fish, player_strength, dt, config, rng);
        } else {
            self.resisting = false;
            self.idle_time += dt;
        }
        self.update_tension(fish, player_strength);

        if self.distance <= config.catch_epsilon {
            return Some(FishingResult::Success);
        }

        let check = fish.fight_behavior().evaluate(
            fish,
            player_strength,
            equipment.rod_durability(),
            equipment.line_durability(),
            self.tension * dt,
            rng,
        );
        match check.escape {
            Some(FishingResult::LineBroken) => equipment.break_line(),
            Some(FishingResult::RodBroken) => equipment.break_rod(),
            _ => {}
        }
        if let Some(result) = check.escape {
            debug!(
                ?result,
                required_strength = check.required_strength,
                player_strength,
                distance = self.distance,
                "fight lost"
            );
            return Some(result);
        }

        self.idle_expired(config.idle_timeout)
    }
}
