pub mod collection;
pub mod datekey;
pub mod item;
pub mod urgency;
pub mod views;

pub use collection::{Collection, TodoError};
pub use datekey::{DateKey, ParseDateKeyError};
pub use item::{NotificationTime, ParseNotificationTimeError, TodoId, TodoItem};
pub use urgency::{
    check_urgent_tasks, day_has_urgent, PendingTask, UrgencyReport, URGENT_HORIZON_MINUTES,
};
pub use views::{month_cells, step, week_cells, DayCell, ViewMode};
