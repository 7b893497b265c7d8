//! Best-scores table persisted as one JSON blob.

use ramparts_core::constants::LEADERBOARD_CAPACITY;
use ramparts_core::errors::PersistError;
use ramparts_core::hooks::LeaderboardHook;
use ramparts_core::save::LeaderboardEntry;

use crate::store::BlobStore;

pub const LEADERBOARD_KEY: &str = "leaderboard";

/// Shown until the first real score is stored.
fn seed_entries() -> Vec<LeaderboardEntry> {
    [("Admin", 5000, 8), ("Pro Player", 3500, 6), ("Rookie", 1200, 4)]
        .into_iter()
        .map(|(player, score, wave)| LeaderboardEntry {
            player: player.to_string(),
            score,
            wave,
        })
        .collect()
}

/// Scores ranked descending; equal scores keep submission order. Holds at
/// most `capacity` entries.
pub struct Leaderboard<S: BlobStore> {
    store: S,
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl<S: BlobStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, LEADERBOARD_CAPACITY)
    }

    /// Load the stored table. A missing or unreadable table starts from
    /// the seed entries.
    pub fn with_capacity(store: S, capacity: usize) -> Self {
        let entries = match store.get(LEADERBOARD_KEY) {
            Ok(blob) => serde_json::from_str(&blob).unwrap_or_else(|error| {
                tracing::warn!(%error, "leaderboard unreadable, using seed entries");
                seed_entries()
            }),
            Err(_) => seed_entries(),
        };
        let mut board = Self {
            store,
            capacity,
            entries,
        };
        board.rank();
        board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn rank(&mut self) {
        // Stable sort keeps earlier submissions ahead on ties.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}

impl<S: BlobStore> LeaderboardHook for Leaderboard<S> {
    fn submit_score(&mut self, player: &str, score: u32, wave: u32) -> Result<(), PersistError> {
        self.entries.push(LeaderboardEntry {
            player: player.to_string(),
            score,
            wave,
        });
        self.rank();
        let blob = serde_json::to_string(&self.entries)?;
        self.store.put(LEADERBOARD_KEY, &blob)?;
        tracing::info!(player, score, wave, "score_submitted");
        Ok(())
    }

    fn fetch_top(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.entries.iter().take(n).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};

    fn names(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.player.as_str()).collect()
    }

    #[test]
    fn test_empty_store_shows_seed_entries() {
        let board = Leaderboard::new(MemoryStore::new());
        assert_eq!(names(&board.fetch_top(10)), vec!["Admin", "Pro Player", "Rookie"]);
        assert_eq!(board.fetch_top(1)[0].score, 5000);
    }

    #[test]
    fn test_ranks_descending_with_ties_in_submission_order() {
        let mut board = Leaderboard::new(MemoryStore::new());
        board.submit_score("first", 3500, 5).unwrap();
        board.submit_score("second", 3500, 6).unwrap();
        board.submit_score("top", 9000, 8).unwrap();
        assert_eq!(
            names(&board.fetch_top(4)),
            vec!["top", "Admin", "Pro Player", "first"]
        );
        assert_eq!(names(&board.fetch_top(10))[4], "second");
    }

    #[test]
    fn test_capped_at_capacity() {
        let mut board = Leaderboard::with_capacity(MemoryStore::new(), 5);
        for score in 0..10 {
            board.submit_score(&format!("p{score}"), score * 100, 1).unwrap();
        }
        let top = board.fetch_top(100);
        assert_eq!(top.len(), 5);
        assert_eq!(names(&top), vec!["Admin", "Pro Player", "Rookie", "p9", "p8"]);
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = Leaderboard::new(FileStore::new(dir.path()));
        board.submit_score("ana", 6000, 7).unwrap();

        let reopened = Leaderboard::new(FileStore::new(dir.path()));
        assert_eq!(reopened.fetch_top(1)[0].player, "ana");
        assert_eq!(reopened.entries().len(), 4);
    }

    #[test]
    fn test_corrupt_table_falls_back_to_seed() {
        let mut store = MemoryStore::new();
        store.put(LEADERBOARD_KEY, "not json").unwrap();
        let board = Leaderboard::new(store);
        assert_eq!(board.entries().len(), 3);
    }
}
