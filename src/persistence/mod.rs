pub mod files;
pub mod store;

pub use files::{atomic_write, ensure_agenda_dir, get_agenda_dir, todos_file};
pub use store::{load_collection, save_collection};
