//! Core engine for a local calendar/todo widget: a persisted mapping of
//! calendar days to todo lists, one-shot alert scheduling for timed
//! reminders, and urgency classification for the due-soon banner.
//!
//! Rendering, theming, and navigation widgets are the embedder's concern;
//! this crate exposes the state, mutations, and view models they draw from.

pub mod app;
pub mod domain;
pub mod notifications;
pub mod persistence;
pub mod scheduler;
pub mod ticker;

pub use app::App;
pub use domain::{
    check_urgent_tasks, day_has_urgent, month_cells, week_cells, Collection, DateKey, DayCell,
    NotificationTime, PendingTask, TodoError, TodoId, TodoItem, UrgencyReport, ViewMode,
    URGENT_HORIZON_MINUTES,
};
pub use notifications::{DesktopNotifier, Notifier, PermissionGate};
pub use scheduler::{plan_alerts, AlertScheduler, PlannedAlert};
