// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MAX_TICK_SECONDS: f64 = 0.1;
/// Slack used when comparing accumulated f64 time against a deadline.
pub const TIME_EPSILON: f64 = 1e-6;

// Fight / pull engine
pub const DEFAULT_PULL_SPEED: f64 = 20.0;
pub const DEFAULT_CAST_DISTANCE: f64 = 100.0;
pub const CATCH_DISTANCE_EPSILON: f64 = 0.1;
pub const IDLE_PULL_TIMEOUT_SECONDS: f64 = 3.5;
pub const RESISTANCE_SLOWDOWN_FACTOR: f64 = 0.5;
pub const RESIST_CHANCE_FACTOR: f64 = 0.3;
pub const RESIST_PULL_MULTIPLIER: f64 = 0.2;
pub const PULL_BACK_CHANCE: f64 = 0.1;
pub const PULL_BACK_MULTIPLIER: f64 = 0.5;

// Breakaway thresholds as fractions of fish strength, shared by every species
pub const PULL_AWAY_STRENGTH_RATIO: f64 = 0.5;
pub const LINE_BREAK_DURABILITY_RATIO: f64 = 0.3;
pub const ROD_BREAK_DURABILITY_RATIO: f64 = 0.2;

// Encounter pacing
pub const COMPLETION_COOLDOWN_SECONDS: f64 = 1.5;
pub const UNKNOWN_SPECIES_RETRY_SECONDS: f64 = 1.0;

// Spawn delay tiers (min, max) in seconds
pub const SPAWN_DELAY_DEFAULT: (f64, f64) = (5.0, 15.0);
pub const SPAWN_DELAY_AFTER_FAILURE: (f64, f64) = (15.0, 45.0);
pub const SPAWN_DELAY_AFTER_MISSED_BITE: (f64, f64) = (30.0, 60.0);
pub const SPAWN_DELAY_AFTER_PREMATURE_HOOK: (f64, f64) = (15.0, 30.0);

// Species selection weights
pub const CARP_SPAWN_WEIGHT: f64 = 0.7;
pub const PERCH_SPAWN_WEIGHT: f64 = 0.3;

// Fish bounds
pub const MIN_FISH_WEIGHT_KG: f64 = 0.05;
pub const MIN_FISH_STRENGTH: f64 = 0.01;

// Equipment
pub const MAX_DURABILITY: f64 = 100.0;

// Player progression
pub const STRENGTH_DIMINISHING_FACTOR: f64 = 0.1;

// Rewards per kilogram of fish
pub const STRENGTH_REWARD_PER_KG: f64 = 0.1;
pub const EXPERIENCE_REWARD_PER_KG: f64 = 15.0;
pub const COINS_REWARD_PER_KG: f64 = 5.0;
