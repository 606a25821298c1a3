use super::datekey::DateKey;
use super::item::{NotificationTime, TodoId, TodoItem};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Failures a mutation can report to its caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    /// Add was called with text that trims to nothing; no item is created
    #[error("todo text is empty")]
    EmptyText,
    /// Toggle target does not exist under the given day
    #[error("no todo with id {id} under {key}")]
    NotFound { key: DateKey, id: TodoId },
}

/// The full persisted mapping of calendar days to their todo lists.
///
/// Mutations operate on the in-memory value and return; persisting the result
/// is the caller's explicit side effect (see `persistence::store`). Within a
/// day the `Vec` preserves insertion order, which is also display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    entries: BTreeMap<DateKey, Vec<TodoItem>>,
}

impl Collection {
    /// Append a new todo to a day's list, creating the list if absent.
    ///
    /// The id is the creation time in milliseconds, bumped until unique across
    /// the whole collection so two adds within the same millisecond still get
    /// distinct identities.
    pub fn add(
        &mut self,
        key: DateKey,
        text: &str,
        notification_time: Option<NotificationTime>,
        now: DateTime<Local>,
    ) -> Result<TodoId, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }

        let mut id = now.timestamp_millis();
        while self.contains_id(id) {
            id += 1;
        }

        self.entries.entry(key).or_default().push(TodoItem {
            id,
            text: text.to_string(),
            done: false,
            notification_time,
        });
        Ok(id)
    }

    /// Flip the done flag on the matching item, returning the new value
    pub fn toggle(&mut self, key: &DateKey, id: TodoId) -> Result<bool, TodoError> {
        let item = self
            .entries
            .get_mut(key)
            .and_then(|items| items.iter_mut().find(|t| t.id == id))
            .ok_or(TodoError::NotFound { key: *key, id })?;
        item.done = !item.done;
        Ok(item.done)
    }

    /// Remove the matching item, preserving the order of the rest.
    ///
    /// Returns whether anything was removed; a missing id is a no-op. A day
    /// whose list becomes empty is pruned from the mapping.
    pub fn delete(&mut self, key: &DateKey, id: TodoId) -> bool {
        let Some(items) = self.entries.get_mut(key) else {
            return false;
        };
        let before = items.len();
        items.retain(|t| t.id != id);
        let removed = items.len() != before;
        if items.is_empty() {
            self.entries.remove(key);
        }
        removed
    }

    /// The todos attached to a day, in display order (empty if none)
    pub fn todos(&self, key: &DateKey) -> &[TodoItem] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all days with todos, in chronological key order
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[TodoItem])> {
        self.entries.iter().map(|(key, items)| (key, items.as_slice()))
    }

    /// Whether any todo anywhere in the collection carries this id
    pub fn contains_id(&self, id: TodoId) -> bool {
        self.entries.values().flatten().any(|t| t.id == id)
    }

    /// Total number of todos across all days
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
