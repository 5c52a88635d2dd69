//! Simulation runner.
//!
//! Every run drives a real [`SessionOrchestrator`] with an automated angler,
//! so the numbers come from the same code the game runs. Statistics are
//! gathered from the encounter outcomes the orchestrator returns.

use super::config::SimConfig;
use super::report::SimReport;
use crate::angler::{Equipment, Player};
use crate::core::error::FishingError;
use crate::fish::Species;
use crate::service::{EncounterOutcome, SessionOrchestrator};
use crate::session::{FishingResult, FishingState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, FishingError> {
    config.fishing.validate()?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng)?;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} encounters, {} caught, {:.0}s, strength {:.2}",
                run_idx + 1,
                config.num_runs,
                run.encounters,
                run.count(FishingResult::Success),
                run.seconds,
                run.final_strength
            );
        }
        all_runs.push(run);
    }

    info!(runs = all_runs.len(), "simulation finished");
    Ok(SimReport::from_runs(all_runs))
}

/// What one simulated angler did in one run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub encounters: u32,
    pub results: HashMap<FishingResult, u32>,
    pub encounters_by_species: HashMap<Species, u32>,
    pub caught_by_species: HashMap<Species, u32>,
    pub fight_seconds: Vec<f64>,
    pub gear_replacements: u32,
    pub rebites: u32,
    pub seconds: f64,
    pub final_strength: f64,
    pub experience: u64,
    pub coins: u64,
    pub timed_out: bool,
}

impl RunStats {
    pub fn count(&self, result: FishingResult) -> u32 {
        self.results.get(&result).copied().unwrap_or(0)
    }

    fn record(&mut self, outcome: &EncounterOutcome) {
        self.encounters += 1;
        *self.results.entry(outcome.result).or_insert(0) += 1;
        let species = outcome.fish.species();
        *self.encounters_by_species.entry(species).or_insert(0) += 1;
        if outcome.result.is_success() {
            *self.caught_by_species.entry(species).or_insert(0) += 1;
        }
        if let Some(seconds) = outcome.fight_seconds {
            self.fight_seconds.push(seconds);
        }
    }
}

/// Scripted player: reacts to bites after a jittered delay, then reels
/// without letting go.
struct AutoAngler {
    reaction_time: f64,
    hook_reliability: f64,
    /// Fish currently biting, when to strike, and whether the bite was noticed.
    watching: Option<(Uuid, f64, bool)>,
}

impl AutoAngler {
    fn new(config: &SimConfig) -> Self {
        Self {
            reaction_time: config.reaction_time.max(0.0),
            hook_reliability: config.hook_reliability,
            watching: None,
        }
    }

    fn act(&mut self, orchestrator: &mut SessionOrchestrator, rng: &mut impl Rng) {
        match orchestrator.state() {
            FishingState::Biting => {
                let Some(bite) = orchestrator.bite() else {
                    return;
                };
                let (fish_id, elapsed) = (bite.fish_id(), bite.elapsed());
                if !matches!(self.watching, Some((id, _, _)) if id == fish_id) {
                    let strike_at = self.reaction_time * rng.gen_range(0.75..1.25);
                    let noticed = rng.gen::<f64>() < self.hook_reliability;
                    self.watching = Some((fish_id, strike_at, noticed));
                }
                if let Some((_, strike_at, true)) = self.watching {
                    if elapsed >= strike_at {
                        orchestrator.request_hook(rng);
                        self.watching = None;
                    }
                }
            }
            FishingState::Hooked => {
                orchestrator.request_pull();
            }
            _ => self.watching = None,
        }
    }
}

fn simulate_single_run(config: &SimConfig, rng: &mut StdRng) -> Result<RunStats, FishingError> {
    let mut orchestrator = SessionOrchestrator::in_memory(config.fishing.clone())?;
    let mut angler = AutoAngler::new(config);
    let mut stats = RunStats::default();

    let player = Player::new(
        1,
        "Simulated Angler",
        config.player_strength,
        Equipment::new(100.0, 100.0, 50.0, config.fishing_luck),
    );
    orchestrator.start_fishing(player, rng)?;

    let dt = config.tick_seconds;
    while stats.encounters < config.encounters_per_run {
        if stats.seconds >= config.max_seconds_per_run {
            stats.timed_out = true;
            break;
        }

        angler.act(&mut orchestrator, rng);
        let finished = orchestrator.tick(dt, rng);
        stats.seconds += dt;

        let Some(outcome) = finished else {
            continue;
        };
        stats.record(&outcome);

        // A snapped line or broken rod would end every later fight at once.
        if matches!(outcome.result, FishingResult::LineBroken | FishingResult::RodBroken) {
            stats.rebites += orchestrator.stats().rebites;
            let mut player = orchestrator.stop_fishing()?;
            let luck = player.equipment().fishing_luck();
            player.replace_equipment(Equipment::new(100.0, 100.0, 50.0, luck));
            stats.gear_replacements += 1;
            debug!(result = ?outcome.result, "gear replaced");
            orchestrator.start_fishing(player, rng)?;
        }
    }

    stats.rebites += orchestrator.stats().rebites;
    let player = orchestrator.stop_fishing()?;
    stats.final_strength = player.strength();
    stats.experience = player.experience();
    stats.coins = player.coins();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 2,
            encounters_per_run: 5,
            seed: Some(42),
            verbosity: 0,
            ..SimConfig::default()
        };
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        assert_eq!(a.total_encounters, b.total_encounters);
        assert_eq!(a.result_counts, b.result_counts);
        assert!((a.avg_seconds_per_run - b.avg_seconds_per_run).abs() < 1e-9);
    }

    #[test]
    fn test_each_run_plays_requested_encounters() {
        let config = SimConfig {
            num_runs: 3,
            encounters_per_run: 4,
            seed: Some(7),
            verbosity: 0,
            ..SimConfig::default()
        };
        let report = run_simulation(&config).unwrap();
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.total_encounters, 12);
        assert_eq!(report.runs_timed_out, 0);
    }

    #[test]
    fn test_expert_catches_more_than_novice() {
        let base = |preset: SimConfig| SimConfig {
            num_runs: 5,
            encounters_per_run: 20,
            seed: Some(99),
            verbosity: 0,
            ..preset
        };
        let novice = run_simulation(&base(SimConfig::novice())).unwrap();
        let expert = run_simulation(&base(SimConfig::expert())).unwrap();
        assert!(expert.catch_rate > novice.catch_rate);
    }

    #[test]
    fn test_invalid_fishing_config_is_reported() {
        let mut config = SimConfig::quick();
        config.fishing.cast_distance = -1.0;
        assert!(run_simulation(&config).is_err());
    }
}
