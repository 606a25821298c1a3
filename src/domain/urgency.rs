use super::collection::Collection;
use super::datekey::DateKey;
use super::item::{NotificationTime, TodoId, TodoItem};
use chrono::{DateTime, Duration, Local};

/// How close a reminder has to be before it counts as urgent
pub const URGENT_HORIZON_MINUTES: i64 = 30;

/// A not-yet-done todo for today, carrying enough context for the display
/// layer to re-open its day and show a time badge
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTask {
    pub id: TodoId,
    pub key: DateKey,
    pub text: String,
    pub time: Option<NotificationTime>,
    /// Absolute due instant; None for todos without an alert time
    pub fire_at: Option<DateTime<Local>>,
}

impl PendingTask {
    fn new(key: DateKey, todo: &TodoItem, fire_at: Option<DateTime<Local>>) -> Self {
        Self {
            id: todo.id,
            key,
            text: todo.text.clone(),
            time: todo.notification_time,
            fire_at,
        }
    }
}

/// Today's pending todos split by urgency, each list in collection order.
/// The banner shows the urgent count; the pending panel lists urgent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrgencyReport {
    pub urgent: Vec<PendingTask>,
    pub upcoming: Vec<PendingTask>,
}

impl UrgencyReport {
    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.upcoming.is_empty()
    }

    pub fn urgent_count(&self) -> usize {
        self.urgent.len()
    }
}

/// Classify today's not-done todos relative to `now`.
///
/// A timed todo due strictly within the next 30 minutes is urgent; one due at
/// or beyond the horizon is upcoming; an untimed todo is always upcoming. A
/// timed todo whose instant has already passed drops out of both lists.
pub fn check_urgent_tasks(collection: &Collection, now: DateTime<Local>) -> UrgencyReport {
    let today = DateKey::today(now);
    let horizon = Duration::minutes(URGENT_HORIZON_MINUTES);
    let mut report = UrgencyReport::default();

    for todo in collection.todos(&today) {
        if todo.done {
            continue;
        }
        match todo.notification_time {
            Some(time) => {
                let Some(fire_at) = today.fire_instant(time) else {
                    continue;
                };
                if fire_at <= now {
                    continue;
                }
                let task = PendingTask::new(today, todo, Some(fire_at));
                if fire_at - now < horizon {
                    report.urgent.push(task);
                } else {
                    report.upcoming.push(task);
                }
            }
            None => report.upcoming.push(PendingTask::new(today, todo, None)),
        }
    }

    report
}

/// Whether any of a day's todos is currently urgent, using that day's own
/// date rather than today's. Drives the highlighted cell in both grid views.
pub fn day_has_urgent(collection: &Collection, key: &DateKey, now: DateTime<Local>) -> bool {
    let horizon = Duration::minutes(URGENT_HORIZON_MINUTES);
    collection.todos(key).iter().any(|todo| {
        if todo.done {
            return false;
        }
        todo.notification_time
            .and_then(|time| key.fire_instant(time))
            .is_some_and(|fire_at| fire_at > now && fire_at - now < horizon)
    })
}
