use crate::domain::{Collection, TodoId};
use crate::notifications::Notifier;
use crate::ticker;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// A reminder the scheduler should have armed: a future, not-done, timed todo
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAlert {
    pub id: TodoId,
    pub fire_at: DateTime<Local>,
    pub text: String,
}

/// Scan the whole collection for reminders that still need an alert.
///
/// A todo qualifies when it is not done, carries a notification time, and its
/// fire instant is strictly in the future. Past-due reminders get nothing.
pub fn plan_alerts(collection: &Collection, now: DateTime<Local>) -> Vec<PlannedAlert> {
    let mut planned = Vec::new();
    for (key, todos) in collection.iter() {
        for todo in todos {
            if todo.done {
                continue;
            }
            let Some(time) = todo.notification_time else {
                continue;
            };
            let Some(fire_at) = key.fire_instant(time) else {
                continue;
            };
            if fire_at > now {
                planned.push(PlannedAlert {
                    id: todo.id,
                    fire_at,
                    text: todo.text.clone(),
                });
            }
        }
    }
    planned
}

/// An alert currently armed: the registered fire instant plus the flag that
/// tells its timer thread to stand down
struct ArmedAlert {
    fire_at: DateTime<Local>,
    cancel: Arc<AtomicBool>,
}

impl ArmedAlert {
    fn withdraw(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Arms one-shot deferred alerts for pending reminders.
///
/// Keeps a registry keyed by todo id so re-invocation after every mutation
/// diffs against what is already armed instead of stacking duplicate timers:
/// a completed or deleted todo has its pending alert cancelled, an unchanged
/// one keeps its single timer, and only genuinely new reminders spawn threads.
pub struct AlertScheduler {
    notifier: Arc<dyn Notifier>,
    armed: HashMap<TodoId, ArmedAlert>,
}

impl AlertScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            armed: HashMap::new(),
        }
    }

    /// Bring the armed set in line with the collection as of `now`.
    ///
    /// Call after every mutation (and once at startup when alerting was
    /// already granted). Entries whose fire instant has passed are dropped
    /// from the registry; their threads have already fired and exited.
    pub fn resync(&mut self, collection: &Collection, now: DateTime<Local>) {
        let desired: HashMap<TodoId, PlannedAlert> = plan_alerts(collection, now)
            .into_iter()
            .map(|plan| (plan.id, plan))
            .collect();

        let before = self.armed.len();
        self.armed.retain(|id, armed| {
            let keep = armed.fire_at > now
                && desired
                    .get(id)
                    .is_some_and(|plan| plan.fire_at == armed.fire_at);
            if !keep {
                armed.withdraw();
            }
            keep
        });
        let cancelled = before - self.armed.len();

        let mut spawned = 0;
        for (id, plan) in desired {
            if self.armed.contains_key(&id) {
                continue;
            }
            let armed = self.arm(plan);
            self.armed.insert(id, armed);
            spawned += 1;
        }

        debug!(spawned, cancelled, armed = self.armed.len(), "resynced alerts");
    }

    fn arm(&self, plan: PlannedAlert) -> ArmedAlert {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let notifier = Arc::clone(&self.notifier);
        let fire_at = plan.fire_at;
        let text = plan.text;

        // Detached one-shot timer. It polls the cancellation flag while
        // waiting so a cancelled alert stands down within one poll interval.
        thread::spawn(move || {
            loop {
                if flag.load(Ordering::Relaxed) {
                    return;
                }
                let remaining = fire_at.signed_duration_since(Local::now());
                if remaining <= chrono::Duration::zero() {
                    break;
                }
                let nap = remaining
                    .to_std()
                    .unwrap_or_default()
                    .min(ticker::timer_poll_interval());
                thread::sleep(nap);
            }
            notifier.alert(&text);
        });

        ArmedAlert { fire_at, cancel }
    }

    /// Cancel every outstanding alert
    pub fn disarm_all(&mut self) {
        for armed in self.armed.values() {
            armed.withdraw();
        }
        self.armed.clear();
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    pub fn is_armed(&self, id: TodoId) -> bool {
        self.armed.contains_key(&id)
    }
}

impl Drop for AlertScheduler {
    fn drop(&mut self) {
        self.disarm_all();
    }
}
