//! Persistence for RAMPARTS: save blobs, key-value blob stores and the
//! leaderboard.

pub mod leaderboard;
pub mod save_load;
pub mod store;

pub use leaderboard::Leaderboard;
pub use save_load::{restore_or_fresh, JsonPersistence, SaveSlots};
pub use store::{BlobStore, FileStore, MemoryStore};
