use crate::domain::{
    check_urgent_tasks, month_cells, step, week_cells, Collection, DateKey, DayCell,
    NotificationTime, TodoId, UrgencyReport, ViewMode,
};
use crate::notifications::{Notifier, PermissionGate};
use crate::persistence;
use crate::scheduler::AlertScheduler;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;

/// Application state: the loaded collection plus view and alerting status.
///
/// Mutations go through here so that every change follows the same contract:
/// update the in-memory collection, persist it, resync the alert scheduler
/// when alerting is enabled, and flag the display layer to re-render.
pub struct App {
    pub collection: Collection,
    /// Date the grids are anchored on
    pub cursor: NaiveDate,
    pub view: ViewMode,
    /// Day whose todo panel is open, if any
    pub selected: Option<DateKey>,
    pub alerts_enabled: bool,
    /// Render trigger: set after every mutation, cleared by the embedder
    /// once it has re-rendered
    pub dirty: bool,
    scheduler: AlertScheduler,
    store_path: PathBuf,
}

impl App {
    /// Load the collection from the store and start with alerting disabled
    pub fn open(store_path: PathBuf, notifier: Arc<dyn Notifier>) -> Self {
        let collection = persistence::load_collection(&store_path);
        Self {
            collection,
            cursor: Local::now().date_naive(),
            view: ViewMode::Month,
            selected: None,
            alerts_enabled: false,
            dirty: true,
            scheduler: AlertScheduler::new(notifier),
            store_path,
        }
    }

    /// Like `open`, for the case where the user granted alert permission in a
    /// previous session: alerting starts enabled and pending reminders are
    /// armed immediately.
    pub fn open_with_alerts(store_path: PathBuf, notifier: Arc<dyn Notifier>) -> Self {
        let mut app = Self::open(store_path, notifier);
        app.alerts_enabled = true;
        app.scheduler.resync(&app.collection, Local::now());
        app
    }

    /// Ask the permission gate once; on grant, enable alerting and arm
    /// pending reminders. Returns whether alerting is now enabled.
    pub fn enable_alerts(&mut self, gate: &dyn PermissionGate) -> bool {
        if self.alerts_enabled {
            return true;
        }
        if gate.request() {
            self.alerts_enabled = true;
            self.scheduler.resync(&self.collection, Local::now());
            self.dirty = true;
        }
        self.alerts_enabled
    }

    /// Add a todo to a day, with an optional alert time
    pub fn add_todo(
        &mut self,
        key: DateKey,
        text: &str,
        notification_time: Option<NotificationTime>,
    ) -> Result<TodoId> {
        let id = self
            .collection
            .add(key, text, notification_time, Local::now())?;
        self.after_mutation()?;
        Ok(id)
    }

    /// Flip a todo's done flag, returning the new value
    pub fn toggle_todo(&mut self, key: DateKey, id: TodoId) -> Result<bool> {
        let done = self.collection.toggle(&key, id)?;
        self.after_mutation()?;
        Ok(done)
    }

    /// Delete a todo; a missing id is a no-op and returns false
    pub fn delete_todo(&mut self, key: DateKey, id: TodoId) -> Result<bool> {
        if !self.collection.delete(&key, id) {
            return Ok(false);
        }
        self.after_mutation()?;
        Ok(true)
    }

    fn after_mutation(&mut self) -> Result<()> {
        self.save()?;
        if self.alerts_enabled {
            self.scheduler.resync(&self.collection, Local::now());
        }
        self.dirty = true;
        Ok(())
    }

    /// Persist the collection to the store
    pub fn save(&self) -> Result<()> {
        persistence::save_collection(&self.store_path, &self.collection)
    }

    /// Open the todo panel for a day
    pub fn select_day(&mut self, key: DateKey) {
        self.selected = Some(key);
        self.dirty = true;
    }

    /// Close the todo panel
    pub fn close_panel(&mut self) {
        self.selected = None;
        self.dirty = true;
    }

    /// The todos of the currently open day, in display order
    pub fn selected_todos(&self) -> &[crate::domain::TodoItem] {
        match &self.selected {
            Some(key) => self.collection.todos(key),
            None => &[],
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        self.dirty = true;
    }

    /// Move the cursor one step backward or forward in the current view
    pub fn step_view(&mut self, forward: bool) {
        self.cursor = step(self.cursor, self.view, forward);
        self.dirty = true;
    }

    /// Cells for the current view, anchored on the cursor
    pub fn cells(&self, now: DateTime<Local>) -> Vec<DayCell> {
        match self.view {
            ViewMode::Month => month_cells(self.cursor, &self.collection, now),
            ViewMode::Week => week_cells(self.cursor, &self.collection, now),
        }
    }

    /// Today's pending todos for the banner and pending panel
    pub fn pending(&self, now: DateTime<Local>) -> UrgencyReport {
        check_urgent_tasks(&self.collection, now)
    }

    /// Periodic tick entry point (every `ticker::recheck_interval()`):
    /// re-evaluates urgency and asks the embedder to re-render
    pub fn tick(&mut self) -> UrgencyReport {
        self.dirty = true;
        self.pending(Local::now())
    }
}
