use crate::domain::Collection;
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Load the persisted collection from todos.json.
///
/// Never surfaces an error: a missing file is simply an empty collection, and
/// an unreadable or unparsable one degrades to empty as well. The recovery is
/// deliberate (the store is the only copy, and refusing to start over a bad
/// record would brick the whole widget) but it is logged so corruption does
/// not vanish without a trace.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Collection {
    let path = path.as_ref();

    if !path.exists() {
        return Collection::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read todo store, starting empty");
            return Collection::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(collection) => collection,
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding unparsable todo store");
            Collection::default()
        }
    }
}

/// Serialize and persist the full collection, overwriting prior state
pub fn save_collection<P: AsRef<Path>>(path: P, collection: &Collection) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateKey, NotificationTime};
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn now() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_load_nonexistent_store_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = temp_dir.path().join("todos.json");

        let collection = load_collection(&store);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let store = temp_dir.path().join("todos.json");

        let mut collection = Collection::default();
        let key = DateKey::new(2024, 4, 5);
        collection
            .add(key, "Buy milk", NotificationTime::new(9, 30), now())
            .unwrap();
        collection.add(key, "Walk", None, now()).unwrap();

        save_collection(&store, &collection).unwrap();
        let loaded = load_collection(&store);

        assert_eq!(loaded, collection);
        assert_eq!(loaded.todos(&key).len(), 2);
        assert_eq!(loaded.todos(&key)[0].text, "Buy milk");
        assert!(!loaded.todos(&key)[0].done);
    }

    #[test]
    fn test_load_garbage_is_empty_not_an_error() {
        let temp_dir = tempdir().unwrap();
        let store = temp_dir.path().join("todos.json");
        fs::write(&store, "{not json at all").unwrap();

        let collection = load_collection(&store);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_load_legacy_record_without_notification_times() {
        let temp_dir = tempdir().unwrap();
        let store = temp_dir.path().join("todos.json");
        fs::write(
            &store,
            r#"{"2024-4-5":[{"id":1714000000000,"text":"Walk","done":true}]}"#,
        )
        .unwrap();

        let collection = load_collection(&store);
        let todos = collection.todos(&DateKey::new(2024, 4, 5));
        assert_eq!(todos.len(), 1);
        assert!(todos[0].done);
        assert_eq!(todos[0].notification_time, None);
    }

    #[test]
    fn test_save_overwrites_prior_state() {
        let temp_dir = tempdir().unwrap();
        let store = temp_dir.path().join("todos.json");

        let mut collection = Collection::default();
        let key = DateKey::new(2024, 4, 5);
        let id = collection.add(key, "gone soon", None, now()).unwrap();
        save_collection(&store, &collection).unwrap();

        collection.delete(&key, id);
        save_collection(&store, &collection).unwrap();

        assert!(load_collection(&store).is_empty());
    }
}
