//! Save blobs: JSON encoding, soft-fail restore and named save slots.

use serde::{Deserialize, Serialize};

use ramparts_core::enums::AlertLevel;
use ramparts_core::errors::PersistError;
use ramparts_core::hooks::PersistenceHook;
use ramparts_core::save::SaveData;
use ramparts_sim::{SimConfig, SimulationEngine};

use crate::store::BlobStore;

/// Slot written after every completed wave and at the end of a run.
pub const AUTOSAVE_SLOT: &str = "autosave";

/// JSON blob codec. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPersistence {
    pub pretty: bool,
}

impl PersistenceHook for JsonPersistence {
    fn serialize(&self, data: &SaveData) -> Result<String, PersistError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    fn deserialize(&self, blob: &str) -> Result<SaveData, PersistError> {
        Ok(serde_json::from_str(blob)?)
    }
}

/// Engine restored from `blob`, or a fresh run carrying an informational
/// alert when the blob cannot be decoded.
pub fn restore_or_fresh(hook: &impl PersistenceHook, blob: &str, config: SimConfig) -> SimulationEngine {
    match hook.deserialize(blob) {
        Ok(data) => SimulationEngine::from_save_data(config, &data),
        Err(error) => {
            tracing::warn!(%error, "discarding unreadable save data");
            let mut engine = SimulationEngine::new(config);
            engine.push_alert(
                AlertLevel::Info,
                "Saved game could not be read; a new game was started",
            );
            engine
        }
    }
}

/// Listing entry for a save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot: String,
    pub wave: u32,
    pub gold: u32,
    pub timestamp: u64,
}

/// Named saves on top of a blob store.
pub struct SaveSlots<S: BlobStore> {
    store: S,
    codec: JsonPersistence,
}

impl<S: BlobStore> SaveSlots<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            codec: JsonPersistence { pretty: true },
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self, slot: &str, engine: &SimulationEngine) -> Result<(), PersistError> {
        let data = engine.to_save_data();
        let blob = self.codec.serialize(&data)?;
        self.store.put(slot, &blob)?;
        tracing::info!(slot, wave = data.run.current_wave, "game_saved");
        Ok(())
    }

    /// Load a slot. A corrupt blob is deleted and replaced by a fresh run;
    /// a missing slot is an error.
    pub fn load(&mut self, slot: &str, config: SimConfig) -> Result<SimulationEngine, PersistError> {
        let blob = self.store.get(slot)?;
        if self.codec.deserialize(&blob).is_err() {
            self.store.delete(slot)?;
        }
        let engine = restore_or_fresh(&self.codec, &blob, config);
        tracing::info!(slot, wave = engine.run_state().current_wave, "game_loaded");
        Ok(engine)
    }

    /// Readable slots, newest first. Unreadable blobs are skipped.
    pub fn list(&self) -> Vec<SaveMetadata> {
        let mut saves: Vec<SaveMetadata> = self
            .store
            .keys()
            .into_iter()
            .filter_map(|slot| {
                let data = self.codec.deserialize(&self.store.get(&slot).ok()?).ok()?;
                Some(SaveMetadata {
                    wave: data.run.current_wave,
                    gold: data.run.gold,
                    timestamp: data.timestamp,
                    slot,
                })
            })
            .collect();
        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        saves
    }

    pub fn delete(&mut self, slot: &str) -> Result<(), PersistError> {
        self.store.delete(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use ramparts_core::enums::{EnemyKind, GamePhase, TowerKind, WaveStatus};
    use ramparts_core::save::{EnemyRecord, TowerRecord};
    use ramparts_core::types::Point;

    #[test]
    fn test_codec_round_trip_keeps_save_fields() {
        let data = SaveData {
            version: 1,
            seed: 9,
            timestamp: 1_000,
            wave_status: WaveStatus::Clearing,
            towers: vec![TowerRecord {
                x: 100.0,
                y: 200.0,
                kind: TowerKind::Sniper,
                level: 3,
                total_invested: 215,
            }],
            enemies: vec![EnemyRecord {
                kind: EnemyKind::Troll,
                segment: 2,
                progress: 0.25,
                health: Some(120),
            }],
            ..Default::default()
        };
        let codec = JsonPersistence::default();
        let blob = codec.serialize(&data).unwrap();
        assert_eq!(codec.deserialize(&blob).unwrap(), data);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let codec = JsonPersistence::default();
        let data = codec
            .deserialize(r#"{"towers": [{"x": 100.0, "y": 200.0, "kind": "fast"}], "enemies": [{"kind": "orc"}]}"#)
            .unwrap();
        assert_eq!(data.run.gold, 100);
        assert_eq!(data.towers[0].level, 1);
        assert_eq!(data.enemies[0].health, None);

        let mut engine = SimulationEngine::from_save_data(SimConfig::default(), &data);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.towers[0].sell_value, 21);
        assert_eq!(snapshot.enemies[0].health, 100);
    }

    #[test]
    fn test_corrupt_blob_starts_fresh_with_info_alert() {
        let mut engine = restore_or_fresh(&JsonPersistence::default(), "{not json", SimConfig::default());
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.run_state().gold, 100);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.alerts.len(), 1);
        assert_eq!(snapshot.alerts[0].level, AlertLevel::Info);
    }

    #[test]
    fn test_wrongly_typed_blob_is_corrupt() {
        let codec = JsonPersistence::default();
        assert!(matches!(
            codec.deserialize(r#"{"run": {"gold": "lots"}}"#),
            Err(PersistError::Corrupted(_))
        ));
    }

    #[test]
    fn test_slots_save_load_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut slots = SaveSlots::new(FileStore::new(dir.path()));

        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.place_tower(TowerKind::Basic, Point::new(100.0, 200.0)).unwrap();
        slots.save("slot1", &engine).unwrap();
        slots.save(AUTOSAVE_SLOT, &engine).unwrap();

        let listed = slots.list();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|meta| meta.gold == 80));

        let mut loaded = slots.load("slot1", SimConfig::default()).unwrap();
        assert_eq!(loaded.snapshot().towers.len(), 1);

        slots.delete("slot1").unwrap();
        assert!(matches!(
            slots.load("slot1", SimConfig::default()),
            Err(PersistError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_slot_is_discarded_on_load() {
        let mut store = MemoryStore::new();
        store.put("broken", "[1, 2").unwrap();
        let mut slots = SaveSlots::new(store);
        assert!(slots.list().is_empty());

        let mut engine = slots.load("broken", SimConfig::default()).unwrap();
        assert_eq!(engine.snapshot().alerts[0].level, AlertLevel::Info);
        assert!(slots.store().keys().is_empty());
    }
}
