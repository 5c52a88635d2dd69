//! Cooperative, tick-driven task scheduler.
//!
//! Tasks are plain values that become due once the scheduler's clock passes
//! their resume time. Nothing runs on its own: the owner calls [`Scheduler::advance`]
//! once per tick and dispatches whatever comes back. Cancellation removes the
//! task outright, so a cancelled continuation can never fire.

use super::constants::TIME_EPSILON;

/// Handle returned by [`Scheduler::schedule`], used to cancel a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: TaskId,
    resume_at: f64,
    task: T,
}

/// Queue of delayed continuations keyed by resume time.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_id: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Current scheduler clock in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Schedules `task` to become due `delay` seconds from now.
    /// Negative delays are treated as zero.
    pub fn schedule(&mut self, delay: f64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            resume_at: self.now + delay.max(0.0),
            task,
        });
        id
    }

    /// Cancels a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancels every task matching the predicate; returns how many were removed.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !predicate(&t.task));
        before - self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Seconds until the task fires, if it is still pending.
    pub fn remaining(&self, id: TaskId) -> Option<f64> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| (t.resume_at - self.now).max(0.0))
    }

    /// Advances the clock and returns every task that became due, earliest
    /// first. Tasks due at the same instant keep their scheduling order.
    pub fn advance(&mut self, dt: f64) -> Vec<T> {
        self.now += dt.max(0.0);
        let now = self.now;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].resume_at <= now + TIME_EPSILON {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by(|a, b| {
            a.resume_at
                .total_cmp(&b.resume_at)
                .then(a.id.0.cmp(&b.id.0))
        });
        due.into_iter().map(|t| t.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, "spawn");

        assert!(scheduler.advance(0.5).is_empty());
        assert_eq!(scheduler.advance(0.5), vec!["spawn"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_accumulated_small_ticks_reach_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, 7u32);

        let mut fired = Vec::new();
        for _ in 0..10 {
            fired.extend(scheduler.advance(0.1));
        }
        assert_eq!(fired, vec![7]);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(0.5, "rebite");

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(10.0).is_empty());
    }

    #[test]
    fn test_due_tasks_ordered_by_time_then_fifo() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2.0, "late");
        scheduler.schedule(1.0, "first");
        scheduler.schedule(1.0, "second");

        assert_eq!(scheduler.advance(5.0), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancel_where_filters_by_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, 1);
        scheduler.schedule(1.0, 2);
        scheduler.schedule(1.0, 3);

        assert_eq!(scheduler.cancel_where(|t| *t % 2 == 1), 2);
        assert_eq!(scheduler.advance(1.0), vec![2]);
    }

    #[test]
    fn test_remaining_tracks_clock() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(3.0, ());
        scheduler.advance(1.0);

        let remaining = scheduler.remaining(id).unwrap();
        assert!((remaining - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_delay_fires_next_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(-5.0, "now");
        assert_eq!(scheduler.advance(0.0), vec!["now"]);
    }
}
