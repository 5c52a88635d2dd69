//! Simulation report generation.

use super::runner::RunStats;
use crate::fish::Species;
use crate::session::FishingResult;
use serde::Serialize;

/// How often one result came up across all runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCount {
    pub result: FishingResult,
    pub count: u32,
    pub rate: f64,
}

/// Per-species encounter and catch figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub species: Species,
    pub encounters: u32,
    pub caught: u32,
    pub catch_rate: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,
    pub total_encounters: u32,

    pub result_counts: Vec<ResultCount>,
    pub species: Vec<SpeciesSummary>,
    pub catch_rate: f64,

    pub avg_fight_seconds: f64,
    pub avg_seconds_per_encounter: f64,
    pub avg_seconds_per_run: f64,
    pub avg_gear_replacements: f64,
    pub avg_rebites: f64,

    pub avg_final_strength: f64,
    pub avg_experience: f64,
    pub avg_coins: f64,
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_f = num_runs as f64;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let total_encounters: u32 = runs.iter().map(|r| r.encounters).sum();
        let encounters_f = total_encounters as f64;

        let result_counts: Vec<ResultCount> = FishingResult::ALL
            .iter()
            .map(|&result| {
                let count: u32 = runs.iter().map(|r| r.count(result)).sum();
                ResultCount {
                    result,
                    count,
                    rate: ratio(count as f64, encounters_f),
                }
            })
            .collect();

        let species = Species::ALL
            .iter()
            .map(|&species| {
                let encounters: u32 = runs
                    .iter()
                    .map(|r| r.encounters_by_species.get(&species).copied().unwrap_or(0))
                    .sum();
                let caught: u32 = runs
                    .iter()
                    .map(|r| r.caught_by_species.get(&species).copied().unwrap_or(0))
                    .sum();
                SpeciesSummary {
                    species,
                    encounters,
                    caught,
                    catch_rate: ratio(caught as f64, encounters as f64),
                }
            })
            .collect();

        let successes: u32 = runs.iter().map(|r| r.count(FishingResult::Success)).sum();
        let fights: Vec<f64> = runs.iter().flat_map(|r| r.fight_seconds.iter().copied()).collect();
        let total_seconds: f64 = runs.iter().map(|r| r.seconds).sum();

        let mean = |f: fn(&RunStats) -> f64| ratio(runs.iter().map(f).sum(), runs_f);

        Self {
            num_runs,
            runs_timed_out,
            total_encounters,
            catch_rate: ratio(successes as f64, encounters_f),
            result_counts,
            species,
            avg_fight_seconds: ratio(fights.iter().sum(), fights.len() as f64),
            avg_seconds_per_encounter: ratio(total_seconds, encounters_f),
            avg_seconds_per_run: ratio(total_seconds, runs_f),
            avg_gear_replacements: mean(|r| r.gear_replacements as f64),
            avg_rebites: mean(|r| r.rebites as f64),
            avg_final_strength: mean(|r| r.final_strength),
            avg_experience: mean(|r| r.experience as f64),
            avg_coins: mean(|r| r.coins as f64),
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out, {} encounters\n\n",
            self.num_runs, self.runs_timed_out, self.total_encounters
        ));

        report.push_str("── RESULTS ──────────────────────────────────────────────────────\n");
        for row in &self.result_counts {
            let pct = row.rate * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:<14} {:>6}  {:>5.1}% {}\n",
                format!("{:?}", row.result),
                row.count,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── SPECIES ──────────────────────────────────────────────────────\n");
        report.push_str("  Species   Encounters   Caught   Catch Rate\n");
        report.push_str("  ───────   ──────────   ──────   ──────────\n");
        for row in &self.species {
            report.push_str(&format!(
                "  {:<7}   {:>10}   {:>6}   {:>9.1}%\n",
                row.species.name(),
                row.encounters,
                row.caught,
                row.catch_rate * 100.0
            ));
        }
        report.push('\n');

        report.push_str("── PACING ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Fight Duration:     {:.1}s\n",
            self.avg_fight_seconds
        ));
        report.push_str(&format!(
            "  Avg Time / Encounter:   {:.1}s\n",
            self.avg_seconds_per_encounter
        ));
        report.push_str(&format!(
            "  Avg Rebites / Run:      {:.1}\n\n",
            self.avg_rebites
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Strength:     {:.2}\n",
            self.avg_final_strength
        ));
        report.push_str(&format!("  Avg Experience:         {:.0}\n", self.avg_experience));
        report.push_str(&format!("  Avg Coins:              {:.0}\n", self.avg_coins));
        report.push_str(&format!(
            "  Avg Gear Replacements:  {:.2}\n\n",
            self.avg_gear_replacements
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.catch_rate > 0.85 {
            "TOO EASY - Almost every fish is landed"
        } else if self.catch_rate > 0.5 {
            "GOOD - Most fish landed, losses still hurt"
        } else if self.catch_rate > 0.25 {
            "HARD - More fish lost than landed"
        } else {
            "TOO HARD - Fish rarely landed"
        };
        report.push_str(&format!("  Catch Rate:  {:.1}%\n", self.catch_rate * 100.0));
        report.push_str(&format!("  Rating:      {}\n", rating));

        for row in &self.species {
            if row.encounters > 0 && row.catch_rate < 0.2 {
                report.push_str(&format!(
                    "  ⚠️  {} are almost never landed ({:.1}%)\n",
                    row.species.name(),
                    row.catch_rate * 100.0
                ));
            }
        }
        if let Some(missed) = self
            .result_counts
            .iter()
            .find(|r| r.result == FishingResult::MissedBite)
        {
            if missed.rate > 0.3 {
                report.push_str("  ⚠️  Many bites missed - bite windows too short?\n");
            }
        }
        if self.avg_gear_replacements > 1.0 {
            report.push_str("  ⚠️  Gear breaks often - break thresholds too low?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn run(successes: u32, escapes: u32) -> RunStats {
        let mut results = HashMap::new();
        results.insert(FishingResult::Success, successes);
        results.insert(FishingResult::FishEscaped, escapes);
        let mut encounters_by_species = HashMap::new();
        encounters_by_species.insert(Species::Carp, successes + escapes);
        let mut caught_by_species = HashMap::new();
        caught_by_species.insert(Species::Carp, successes);

        RunStats {
            encounters: successes + escapes,
            results,
            encounters_by_species,
            caught_by_species,
            fight_seconds: vec![4.0, 6.0],
            seconds: 100.0,
            final_strength: 11.0,
            ..RunStats::default()
        }
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_runs(vec![run(6, 4), run(2, 8)]);

        assert_eq!(report.num_runs, 2);
        assert_eq!(report.total_encounters, 20);
        assert!((report.catch_rate - 0.4).abs() < 1e-9);
        assert!((report.avg_fight_seconds - 5.0).abs() < 1e-9);
        assert!((report.avg_seconds_per_encounter - 10.0).abs() < 1e-9);

        let carp = &report.species[0];
        assert_eq!(carp.species, Species::Carp);
        assert_eq!(carp.caught, 8);
        assert_eq!(report.species[1].encounters, 0);

        let text = report.to_text();
        assert!(text.contains("SIMULATION REPORT"));
        assert!(text.contains("Perch"));
    }

    #[test]
    fn test_empty_report_has_no_nan() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.catch_rate, 0.0);
        assert_eq!(report.avg_seconds_per_run, 0.0);
        assert!(!report.to_text().contains("NaN"));
    }

    #[test]
    fn test_json_report() {
        let report = SimReport::from_runs(vec![run(3, 1)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["total_encounters"], 4);
        assert_eq!(json["result_counts"][0]["result"], "Success");
    }
}
