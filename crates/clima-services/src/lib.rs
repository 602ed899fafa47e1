pub mod error;
pub mod preferences;
pub mod recent;
pub mod storage;

pub use error::StorageError;
pub use preferences::{Preferences, Theme, RECENT_KEY, THEME_KEY};
pub use recent::{RecentSearches, MAX_RECENT};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
