//! Cancellable deferred work owned by the page.
//!
//! Deadlines are explicit `Instant`s supplied by the caller, so the controller
//! can be driven by a real clock or stepped deterministically.

use std::time::{Duration, Instant};

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    FadeNotification(NodeId),
    RemoveNotification(NodeId),
    Navigate(String),
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    handle: TaskHandle,
    deadline: Instant,
    action: TimerAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_handle: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, after: Duration, action: TimerAction) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            deadline: now + after,
            action,
        });
        handle
    }

    /// Returns false when the task already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.tasks.len();
        self.tasks.clear();
        cancelled
    }

    /// Removes and returns every action due at `now`, earliest deadline first;
    /// ties keep scheduling order.
    pub fn due(&mut self, now: Instant) -> Vec<TimerAction> {
        let (mut ready, pending): (Vec<_>, Vec<_>) = self
            .tasks
            .drain(..)
            .partition(|task| task.deadline <= now);
        self.tasks = pending;
        ready.sort_by_key(|task| (task.deadline, task.handle));
        ready.into_iter().map(|task| task.action).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.deadline).min()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn has_pending(&self, predicate: impl Fn(&TimerAction) -> bool) -> bool {
        self.tasks.iter().any(|task| predicate(&task.action))
    }
}
