//! The session orchestrator.
//!
//! Owns the session, the player and every piece of per-encounter state, and
//! drives all of it from a single [`SessionOrchestrator::tick`]. Player
//! commands only record intent or flip flags; the fish does its thing on the
//! next tick.
//!
//! The orchestrator is also a subscriber of its own session: completion
//! events are where rewards are paid, records are written and the next fish
//! is scheduled, so each of those happens exactly once per encounter.

use super::repository::{
    CaughtFishRecord, FishRepository, InMemoryFishRepository, InMemoryPlayerRepository, PlayerRepository,
    PlayerStatsUpdate,
};
use super::rewards::{FishingRewards, RewardCalculator};
use crate::angler::Player;
use crate::core::config::FishingConfig;
use crate::core::constants::UNKNOWN_SPECIES_RETRY_SECONDS;
use crate::core::error::{FishingError, SessionError};
use crate::core::scheduler::{Scheduler, TaskId};
use crate::encounter::{decide_rebite, BiteOutcome, BiteSequence, FishSpawner, PreviousOutcome, PullEngine, RebiteDecision};
use crate::fish::{Fish, FishFactoryProvider};
use crate::session::{FishingResult, FishingSession, FishingState, SessionEvent};
use rand::Rng;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Delayed work owned by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    SpawnFish,
    Rebite,
    ResetToWaiting,
}

/// A finished encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterOutcome {
    pub result: FishingResult,
    pub fish: Fish,
    /// Only present for a landed fish.
    pub rewards: Option<FishingRewards>,
    /// Seconds spent Fighting, if the fight ever started.
    pub fight_seconds: Option<f64>,
}

/// Tallies for the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub results: HashMap<FishingResult, u32>,
    pub bites: u32,
    pub rebites: u32,
    pub premature_hooks: u32,
}

impl SessionStats {
    pub fn count(&self, result: FishingResult) -> u32 {
        self.results.get(&result).copied().unwrap_or(0)
    }

    pub fn encounters(&self) -> u32 {
        self.results.values().sum()
    }
}

pub struct SessionOrchestrator<F = InMemoryFishRepository, P = InMemoryPlayerRepository> {
    config: FishingConfig,
    session: FishingSession,
    events: Receiver<SessionEvent>,
    spawner: FishSpawner,
    scheduler: Scheduler<Task>,
    rewards: RewardCalculator,
    fish_repo: F,
    player_repo: P,
    player: Option<Player>,
    bite: Option<BiteSequence>,
    fight: Option<PullEngine>,
    rebite_fish: Option<Fish>,
    hook_requested: bool,
    spawn_task: Option<TaskId>,
    previous: PreviousOutcome,
    last_outcome: Option<EncounterOutcome>,
    stats: SessionStats,
}

impl SessionOrchestrator {
    /// Orchestrator backed by in-memory repositories.
    pub fn in_memory(config: FishingConfig) -> Result<Self, FishingError> {
        Self::new(config, InMemoryFishRepository::new(), InMemoryPlayerRepository::new())
    }
}

impl<F: FishRepository, P: PlayerRepository> SessionOrchestrator<F, P> {
    pub fn new(config: FishingConfig, fish_repo: F, player_repo: P) -> Result<Self, FishingError> {
        config.validate()?;
        let mut session = FishingSession::new();
        let events = session.subscribe();
        let spawner = FishSpawner::with_defaults(&config);

        Ok(Self {
            config,
            session,
            events,
            spawner,
            scheduler: Scheduler::new(),
            rewards: RewardCalculator,
            fish_repo,
            player_repo,
            player: None,
            bite: None,
            fight: None,
            rebite_fish: None,
            hook_requested: false,
            spawn_task: None,
            previous: PreviousOutcome::None,
            last_outcome: None,
            stats: SessionStats::default(),
        })
    }

    /// Swaps in a different factory source.
    pub fn with_factory_provider(mut self, provider: Box<dyn FishFactoryProvider>) -> Self {
        self.spawner.set_provider(provider);
        self
    }

    pub fn config(&self) -> &FishingConfig {
        &self.config
    }

    pub fn session(&self) -> &FishingSession {
        &self.session
    }

    pub fn state(&self) -> FishingState {
        self.session.state()
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn bite(&self) -> Option<&BiteSequence> {
        self.bite.as_ref()
    }

    pub fn fight(&self) -> Option<&PullEngine> {
        self.fight.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn last_outcome(&self) -> Option<&EncounterOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn fish_repository(&self) -> &F {
        &self.fish_repo
    }

    pub fn player_repository(&self) -> &P {
        &self.player_repo
    }

    /// True while a missed fish is waiting to bite again.
    pub fn awaiting_rebite(&self) -> bool {
        self.rebite_fish.is_some()
    }

    /// Seconds until the next scheduled spawn, if one is pending.
    pub fn next_spawn_in(&self) -> Option<f64> {
        self.spawn_task.and_then(|id| self.scheduler.remaining(id))
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Opens an event channel on the session.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// Takes ownership of `player` and casts in. Rejected while a session is
    /// already running.
    pub fn start_fishing(&mut self, player: Player, rng: &mut impl Rng) -> Result<(), FishingError> {
        if self.session.is_active() {
            let err = SessionError::new(self.session.state(), "start fishing");
            warn!(%err, "start ignored");
            return Err(err.into());
        }

        self.clear_encounter();
        self.scheduler.cancel_all();
        self.previous = PreviousOutcome::None;
        self.last_outcome = None;
        self.stats = SessionStats::default();

        info!(player = %player.name, strength = player.strength(), "start fishing");
        self.player = Some(player);
        self.session.start_session();
        self.drain_events();
        self.schedule_spawn(PreviousOutcome::None, rng);
        Ok(())
    }

    /// Reels in for good and hands the player back.
    pub fn stop_fishing(&mut self) -> Result<Player, FishingError> {
        let player = self.player.take().ok_or(FishingError::NoActiveSession)?;
        self.scheduler.cancel_all();
        self.spawn_task = None;
        self.clear_encounter();
        self.session.end_session();
        self.drain_events();
        info!(player = %player.name, "stop fishing");
        Ok(player)
    }

    /// Strikes. During a bite the hook is set on the next tick; while
    /// Waiting it spooks the fish and pushes the next spawn back.
    pub fn request_hook(&mut self, rng: &mut impl Rng) -> bool {
        match self.session.state() {
            FishingState::Biting => {
                self.hook_requested = true;
                true
            }
            FishingState::Waiting if self.session.is_active() => {
                self.session.try_hook();
                self.stats.premature_hooks += 1;
                self.scheduler
                    .cancel_where(|t| matches!(t, Task::SpawnFish | Task::Rebite));
                self.rebite_fish = None;
                self.previous = PreviousOutcome::PrematureHook;
                self.schedule_spawn(PreviousOutcome::PrematureHook, rng);
                false
            }
            _ => {
                self.session.try_hook();
                false
            }
        }
    }

    /// Reels. The first pull on a hooked fish starts the fight.
    pub fn request_pull(&mut self) -> bool {
        match self.session.state() {
            FishingState::Hooked => {
                if self.session.start_fight().is_err() {
                    return false;
                }
                self.engine().start_pull();
                true
            }
            FishingState::Fighting => {
                self.engine().start_pull();
                true
            }
            state => {
                warn!(?state, "pull ignored");
                false
            }
        }
    }

    /// Stops reeling during a fight. On a hooked fish that has not been
    /// fought yet, lets it go.
    pub fn request_release(&mut self) -> bool {
        match self.session.state() {
            FishingState::Fighting => {
                self.engine().release();
                true
            }
            FishingState::Hooked => {
                self.complete(FishingResult::FishEscaped);
                self.drain_events();
                true
            }
            state => {
                warn!(?state, "release ignored");
                false
            }
        }
    }

    /// Advances everything by `dt` seconds (clamped to the configured max
    /// tick). Returns the encounter that finished during this tick, if any.
    pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) -> Option<EncounterOutcome> {
        if !self.session.is_active() {
            return None;
        }
        let dt = dt.clamp(0.0, self.config.max_tick);
        self.session.update(dt);

        // A phase entered by a scheduled task starts counting next tick.
        let phase = self.session.state();
        for task in self.scheduler.advance(dt) {
            self.run_task(task, rng);
        }

        if self.session.state() == phase {
            match phase {
                FishingState::Biting => self.tick_bite(dt, rng),
                FishingState::Hooked => self.tick_hooked(dt),
                FishingState::Fighting => self.tick_fight(dt, rng),
                _ => {}
            }
        }

        self.drain_events()
    }

    fn engine(&mut self) -> &mut PullEngine {
        let config = &self.config;
        self.fight.get_or_insert_with(|| PullEngine::from_config(config))
    }

    fn luck(&self) -> f64 {
        self.player
            .as_ref()
            .map_or(1.0, |p| p.equipment().fishing_luck())
    }

    fn clear_encounter(&mut self) {
        self.bite = None;
        self.fight = None;
        self.rebite_fish = None;
        self.hook_requested = false;
    }

    fn schedule_spawn(&mut self, previous: PreviousOutcome, rng: &mut impl Rng) {
        let delay = self.spawner.next_delay(previous, rng);
        self.spawn_task = Some(self.scheduler.schedule(delay, Task::SpawnFish));
    }

    fn run_task(&mut self, task: Task, rng: &mut impl Rng) {
        match task {
            Task::SpawnFish => self.spawn_fish(rng),
            Task::Rebite => {
                let Some(fish) = self.rebite_fish.take() else {
                    return;
                };
                if self.session.state() == FishingState::Waiting && self.session.is_active() {
                    info!(species = %fish.species(), "fish is back for another bite");
                    self.begin_bite(fish, rng);
                } else {
                    debug!(state = ?self.session.state(), "rebite dropped");
                }
            }
            Task::ResetToWaiting => {
                if self.session.state().is_terminal() {
                    self.session.reset_to_waiting();
                    self.schedule_spawn(self.previous, rng);
                }
            }
        }
    }

    fn spawn_fish(&mut self, rng: &mut impl Rng) {
        if self.session.state() != FishingState::Waiting {
            debug!(state = ?self.session.state(), "spawn skipped");
            return;
        }
        match self.spawner.spawn(self.luck(), rng) {
            Ok(fish) => self.begin_bite(fish, rng),
            Err(err) => {
                warn!(%err, retry_in = UNKNOWN_SPECIES_RETRY_SECONDS, "spawn failed");
                self.spawn_task = Some(
                    self.scheduler
                        .schedule(UNKNOWN_SPECIES_RETRY_SECONDS, Task::SpawnFish),
                );
            }
        }
    }

    fn begin_bite(&mut self, fish: Fish, rng: &mut impl Rng) {
        let bite = BiteSequence::start(&fish, rng);
        if self.session.set_fish(fish).is_err() {
            return;
        }
        self.bite = Some(bite);
        self.hook_requested = false;
        self.stats.bites += 1;
    }

    fn tick_bite(&mut self, dt: f64, rng: &mut impl Rng) {
        let Some(bite) = self.bite.as_mut() else {
            return;
        };
        let hook_requested = &mut self.hook_requested;
        let outcome = bite.tick(&self.session, dt, || std::mem::take(hook_requested));

        match outcome {
            Some(BiteOutcome::Hooked) => {
                self.bite = None;
                if self.session.try_hook() {
                    self.fight = Some(PullEngine::from_config(&self.config));
                }
            }
            Some(BiteOutcome::Missed) => {
                self.bite = None;
                self.on_missed_bite(rng);
            }
            None => {}
        }
    }

    fn on_missed_bite(&mut self, rng: &mut impl Rng) {
        let Some(fish) = self.session.current_fish().cloned() else {
            return;
        };
        match decide_rebite(fish.bite_behavior(), self.luck(), rng) {
            RebiteDecision::Rebite { delay } => {
                debug!(species = %fish.species(), delay, "missed, fish will bite again");
                self.stats.rebites += 1;
                self.session.reset_to_waiting();
                self.scheduler.cancel_where(|t| *t == Task::SpawnFish);
                self.spawn_task = None;
                self.rebite_fish = Some(fish);
                self.scheduler.schedule(delay, Task::Rebite);
            }
            RebiteDecision::Lost => self.complete(FishingResult::MissedBite),
        }
    }

    fn tick_hooked(&mut self, dt: f64) {
        let timeout = self.config.idle_timeout;
        if let Some(result) = self.engine().tick_idle(dt, timeout) {
            self.complete(result);
        }
    }

    fn tick_fight(&mut self, dt: f64, rng: &mut impl Rng) {
        let (Some(engine), Some(player), Some(fish)) =
            (self.fight.as_mut(), self.player.as_mut(), self.session.current_fish())
        else {
            return;
        };
        let strength = player.strength();
        let result = engine.tick(fish, strength, player.equipment_mut(), dt, &self.config, rng);
        if let Some(result) = result {
            self.complete(result);
        }
    }

    fn complete(&mut self, result: FishingResult) {
        if let Err(err) = self.session.complete_fishing(result) {
            debug!(%err, "completion dropped");
        }
    }

    fn drain_events(&mut self) -> Option<EncounterOutcome> {
        let mut finished = None;
        while let Ok(event) = self.events.try_recv() {
            if let SessionEvent::FishingComplete { result, fish } = event {
                finished = Some(self.on_complete(result, fish));
            }
        }
        finished
    }

    fn on_complete(&mut self, result: FishingResult, fish: Fish) -> EncounterOutcome {
        let fight_seconds = self
            .fight
            .take()
            .map(|f| f.elapsed())
            .filter(|seconds| *seconds > 0.0);
        self.clear_encounter();
        self.scheduler
            .cancel_where(|t| matches!(t, Task::SpawnFish | Task::Rebite));
        self.spawn_task = None;

        let rewards = if result.is_success() {
            self.grant_rewards(&fish)
        } else {
            None
        };
        *self.stats.results.entry(result).or_insert(0) += 1;
        self.previous = PreviousOutcome::from_result(result);
        self.scheduler
            .schedule(self.config.completion_cooldown, Task::ResetToWaiting);

        let outcome = EncounterOutcome {
            result,
            fish,
            rewards,
            fight_seconds,
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    fn grant_rewards(&mut self, fish: &Fish) -> Option<FishingRewards> {
        let player = self.player.as_mut()?;
        let rewards = self.rewards.calculate(fish);
        let strength_gain = player.gain_strength(rewards.strength);
        player.gain_experience(rewards.experience);
        player.gain_coins(rewards.coins);
        info!(
            species = %fish.species(),
            weight = fish.weight(),
            strength_gain,
            experience = rewards.experience,
            coins = rewards.coins,
            "fish landed"
        );

        self.fish_repo
            .save_caught_fish(CaughtFishRecord::new(player.id, fish));
        self.player_repo.update_player_stats(PlayerStatsUpdate {
            player_id: player.id,
            strength_gain,
            experience_gain: rewards.experience,
            coins_gain: rewards.coins,
        });
        Some(rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angler::Equipment;
    use crate::fish::FactoryRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn angler() -> Player {
        Player::new(1, "Tester", 10.0, Equipment::default())
    }

    fn started(seed: u64) -> (SessionOrchestrator, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut orchestrator = SessionOrchestrator::in_memory(FishingConfig::default()).unwrap();
        orchestrator.start_fishing(angler(), &mut rng).unwrap();
        (orchestrator, rng)
    }

    fn tick_until(
        orchestrator: &mut SessionOrchestrator,
        rng: &mut StdRng,
        state: FishingState,
    ) -> bool {
        for _ in 0..2000 {
            orchestrator.tick(0.1, rng);
            if orchestrator.state() == state {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = FishingConfig {
            pull_speed: 0.0,
            ..FishingConfig::default()
        };
        assert!(matches!(
            SessionOrchestrator::in_memory(config),
            Err(FishingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_first_spawn_uses_default_tier() {
        let (orchestrator, _) = started(1);
        assert_eq!(orchestrator.state(), FishingState::Waiting);
        let delay = orchestrator.next_spawn_in().unwrap();
        assert!((5.0..15.0).contains(&delay));
    }

    #[test]
    fn test_double_start_is_rejected() {
        let (mut orchestrator, mut rng) = started(2);
        assert!(orchestrator.start_fishing(angler(), &mut rng).is_err());
        assert_eq!(orchestrator.state(), FishingState::Waiting);
    }

    #[test]
    fn test_fish_bites_within_spawn_window() {
        let (mut orchestrator, mut rng) = started(3);
        assert!(tick_until(&mut orchestrator, &mut rng, FishingState::Biting));
        assert!(orchestrator.session().session_time() <= 15.0 + 0.2);
        assert!(orchestrator.bite().is_some());
        assert_eq!(orchestrator.stats().bites, 1);
    }

    #[test]
    fn test_premature_hook_delays_next_fish() {
        let (mut orchestrator, mut rng) = started(4);
        orchestrator.tick(0.1, &mut rng);

        assert!(!orchestrator.request_hook(&mut rng));
        assert_eq!(orchestrator.state(), FishingState::Waiting);
        assert_eq!(orchestrator.stats().premature_hooks, 1);
        assert_eq!(orchestrator.pending_tasks(), 1);
        let delay = orchestrator.next_spawn_in().unwrap();
        assert!((15.0..30.0).contains(&delay));
    }

    #[test]
    fn test_hook_then_release_lets_fish_go() {
        let (mut orchestrator, mut rng) = started(5);
        assert!(tick_until(&mut orchestrator, &mut rng, FishingState::Biting));
        assert!(orchestrator.request_hook(&mut rng));
        orchestrator.tick(0.1, &mut rng);
        assert_eq!(orchestrator.state(), FishingState::Hooked);

        assert!(orchestrator.request_release());
        assert_eq!(orchestrator.state(), FishingState::Escaped);
        let outcome = orchestrator.last_outcome().unwrap();
        assert_eq!(outcome.result, FishingResult::FishEscaped);
        assert_eq!(outcome.fight_seconds, None);
        assert!(orchestrator.session().is_consistent());
    }

    #[test]
    fn test_first_pull_starts_fight() {
        let (mut orchestrator, mut rng) = started(6);
        assert!(tick_until(&mut orchestrator, &mut rng, FishingState::Biting));
        orchestrator.request_hook(&mut rng);
        orchestrator.tick(0.1, &mut rng);

        assert!(orchestrator.request_pull());
        assert_eq!(orchestrator.state(), FishingState::Fighting);
        assert!(orchestrator.fight().unwrap().is_pulling());
        assert!(orchestrator.request_release());
        assert!(!orchestrator.fight().unwrap().is_pulling());
    }

    #[test]
    fn test_hooked_fish_escapes_when_ignored() {
        let (mut orchestrator, mut rng) = started(7);
        assert!(tick_until(&mut orchestrator, &mut rng, FishingState::Biting));
        orchestrator.request_hook(&mut rng);
        orchestrator.tick(0.1, &mut rng);
        assert_eq!(orchestrator.state(), FishingState::Hooked);

        assert!(tick_until(&mut orchestrator, &mut rng, FishingState::Escaped));
        assert_eq!(orchestrator.stats().count(FishingResult::FishEscaped), 1);
    }

    #[test]
    fn test_commands_rejected_when_idle() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut orchestrator = SessionOrchestrator::in_memory(FishingConfig::default()).unwrap();
        assert!(!orchestrator.request_hook(&mut rng));
        assert!(!orchestrator.request_pull());
        assert!(!orchestrator.request_release());
        assert_eq!(orchestrator.tick(0.1, &mut rng), None);
        assert_eq!(orchestrator.state(), FishingState::Ready);
        assert!(matches!(
            orchestrator.stop_fishing(),
            Err(FishingError::NoActiveSession)
        ));
    }

    #[test]
    fn test_stop_returns_player_and_cancels_tasks() {
        let (mut orchestrator, mut rng) = started(9);
        assert!(tick_until(&mut orchestrator, &mut rng, FishingState::Biting));

        let player = orchestrator.stop_fishing().unwrap();
        assert_eq!(player.name, "Tester");
        assert_eq!(orchestrator.state(), FishingState::Ready);
        assert_eq!(orchestrator.pending_tasks(), 0);
        assert!(orchestrator.bite().is_none());
        assert!(orchestrator.session().current_fish().is_none());
    }

    #[test]
    fn test_missing_factories_retry_without_spawning() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut orchestrator = SessionOrchestrator::in_memory(FishingConfig::default())
            .unwrap()
            .with_factory_provider(Box::new(FactoryRegistry::new()));
        orchestrator.start_fishing(angler(), &mut rng).unwrap();

        for _ in 0..200 {
            orchestrator.tick(0.1, &mut rng);
        }
        assert_eq!(orchestrator.state(), FishingState::Waiting);
        assert!(orchestrator.next_spawn_in().unwrap() <= 1.0);
        assert_eq!(orchestrator.stats().bites, 0);
    }

    #[test]
    fn test_oversized_tick_is_clamped() {
        let (mut orchestrator, mut rng) = started(11);
        orchestrator.tick(60.0, &mut rng);
        assert!((orchestrator.session().session_time() - 0.1).abs() < 1e-9);
        assert_eq!(orchestrator.state(), FishingState::Waiting);
    }
}
