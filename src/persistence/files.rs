use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the agenda directory - checks for local .agenda first, then falls back to global ~/.agenda
pub fn get_agenda_dir() -> Result<PathBuf> {
    // Check for local .agenda directory
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_agenda(&current_dir) {
        return Ok(local_dir);
    }

    // Fall back to global ~/.agenda
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".agenda"))
}

/// Find local .agenda directory by walking up the directory tree
fn find_local_agenda(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let agenda_dir = current.join(".agenda");
        if agenda_dir.exists() && agenda_dir.is_dir() {
            return Some(agenda_dir);
        }

        // Move up to parent directory
        current = current.parent()?;
    }
}

/// Ensure the agenda directory exists
pub fn ensure_agenda_dir() -> Result<PathBuf> {
    let dir = get_agenda_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Get path to todos.json, the single persisted record holding the whole
/// collection
pub fn todos_file() -> Result<PathBuf> {
    Ok(ensure_agenda_dir()?.join("todos.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    // Write content
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    // Sync to disk
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_agenda_dir() {
        let dir = get_agenda_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".agenda"));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        let content = "Hello, world!";
        atomic_write(&test_file, content).unwrap();

        assert_eq!(fs::read_to_string(&test_file).unwrap(), content);
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "first").unwrap();
        atomic_write(&test_file, "second").unwrap();

        assert_eq!(fs::read_to_string(&test_file).unwrap(), "second");
    }
}
