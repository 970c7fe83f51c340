use thiserror::Error;
use twostars_core::BoardLayout;

use crate::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Saved game data is corrupted: {0}")]
    CorruptedData(String),
    #[error("Saved game data has unsupported version {0}")]
    UnsupportedVersion(u32),
    #[error("Saved game data does not match the board dimensions")]
    DimensionMismatch,
}

/// Per-board game records plus the index of board statuses, on top of any
/// [`Storage`] backend.
///
/// Nothing here panics on bad data: unreadable records are deleted and
/// reported as absent.
#[derive(Debug)]
pub struct GameStateStore<S> {
    storage: S,
}

impl<S: Storage> GameStateStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_available(&self) -> bool {
        self.storage.probe().is_ok()
    }

    /// Writes the board record, then upserts its entry in the status index.
    ///
    /// Only the record write is reported; a failed index update is logged.
    pub fn save(&self, board_id: &str, snapshot: &GameSnapshot) -> Result<(), StorageError> {
        self.storage.probe()?;

        let now = now_millis();
        let record = PersistedGame::new(snapshot, now);
        let json =
            serde_json::to_string(&record).map_err(|err| StorageError::Failed(err.to_string()))?;
        self.storage.set(&board_state_key(board_id), &json)?;
        log::trace!("saved {board_id} ({})", snapshot.status);

        if let Err(err) = self.set_board_status(board_id, snapshot.status.into(), now) {
            log::warn!("could not update status of {board_id}: {err}");
        }
        Ok(())
    }

    /// Like [`Self::try_load`], with every failure folded into `None`.
    pub fn load(&self, board_id: &str, layout: Option<&BoardLayout>) -> Option<GameSnapshot> {
        self.try_load(board_id, layout).unwrap_or_else(|err| {
            log::debug!("no saved game for {board_id}: {err}");
            None
        })
    }

    /// Reads and validates the record of `board_id`, checking its dimensions
    /// against `layout` when given.
    ///
    /// Records that fail validation are deleted before the error is returned;
    /// a dimension mismatch also resets the board's index entry.
    pub fn try_load(
        &self,
        board_id: &str,
        layout: Option<&BoardLayout>,
    ) -> Result<Option<GameSnapshot>, StoreError> {
        let key = board_state_key(board_id);
        let Some(raw) = self.storage.get(&key)? else {
            return Ok(None);
        };

        let decoded = serde_json::from_str::<PersistedGame>(&raw)
            .map_err(|err| StoreError::CorruptedData(err.to_string()))
            .and_then(PersistedGame::into_snapshot)
            .and_then(|snapshot| match layout {
                Some(layout) if !layout.matches_shape(&snapshot.stars) => {
                    Err(StoreError::DimensionMismatch)
                }
                _ => Ok(snapshot),
            });

        match decoded {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                log::warn!("discarding saved game of {board_id}: {err}");
                let cleanup = match err {
                    StoreError::DimensionMismatch => self.clear(board_id),
                    _ => self.storage.remove(&key),
                };
                if let Err(cleanup_err) = cleanup {
                    log::error!("could not discard {key}: {cleanup_err}");
                }
                Err(err)
            }
        }
    }

    /// Deletes the record of `board_id` and marks it not started.
    pub fn clear(&self, board_id: &str) -> Result<(), StorageError> {
        self.storage.remove(&board_state_key(board_id))?;
        self.set_board_status(board_id, BoardStatus::NotStarted, now_millis())
    }

    /// Deletes every board record and the status index.
    pub fn clear_all(&self) -> Result<(), StorageError> {
        for key in self.storage.keys_with_prefix(STORAGE_PREFIX)? {
            self.storage.remove(&key)?;
        }
        self.storage.remove(BOARD_STATUS_KEY)?;
        log::debug!("cleared all saved games");
        Ok(())
    }

    /// Valid entries of the status index, in stored order.
    ///
    /// An index that isn't a JSON list is deleted; malformed entries inside a
    /// list are skipped.
    pub fn list_board_statuses(&self) -> Vec<BoardStatusRecord> {
        let raw = match self.storage.get(BOARD_STATUS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::debug!("status index unreadable: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(entries)) => entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
            Ok(_) | Err(_) => {
                log::warn!("discarding malformed status index");
                if let Err(err) = self.storage.remove(BOARD_STATUS_KEY) {
                    log::error!("could not discard status index: {err}");
                }
                Vec::new()
            }
        }
    }

    pub fn status_of(&self, board_id: &str) -> BoardStatus {
        self.list_board_statuses()
            .into_iter()
            .find(|record| record.board_id == board_id)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    fn set_board_status(
        &self,
        board_id: &str,
        status: BoardStatus,
        last_played: i64,
    ) -> Result<(), StorageError> {
        let mut statuses = self.list_board_statuses();
        let record = BoardStatusRecord {
            board_id: board_id.to_string(),
            status,
            last_played: Some(last_played),
        };
        match statuses.iter_mut().find(|entry| entry.board_id == board_id) {
            Some(entry) => *entry = record,
            None => statuses.push(record),
        }

        let json = serde_json::to_string(&statuses)
            .map_err(|err| StorageError::Failed(err.to_string()))?;
        self.storage.set(BOARD_STATUS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use twostars_core::GameStatus;

    use super::*;

    fn snapshot(rows: usize, cols: usize, status: GameStatus) -> GameSnapshot {
        let mut stars = Array2::from_elem((rows, cols), false);
        stars[[0, 0]] = true;
        GameSnapshot { stars, status }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = GameStateStore::new(MemoryStorage::new());
        let saved = snapshot(2, 3, GameStatus::Playing);

        store.save("b", &saved).unwrap();

        assert_eq!(store.load("b", None), Some(saved));
        assert_eq!(store.status_of("b"), BoardStatus::InProgress);
    }

    #[test]
    fn index_keeps_one_entry_per_board() {
        let store = GameStateStore::new(MemoryStorage::new());

        store.save("a", &snapshot(1, 1, GameStatus::Playing)).unwrap();
        store.save("b", &snapshot(1, 1, GameStatus::Playing)).unwrap();
        store.save("a", &snapshot(1, 1, GameStatus::Won)).unwrap();

        let statuses = store.list_board_statuses();
        let ids: Vec<_> = statuses.iter().map(|r| r.board_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(statuses[0].status, BoardStatus::Won);
        assert!(statuses.iter().all(|r| r.last_played.is_some()));
    }

    #[test]
    fn non_list_index_is_deleted() {
        let storage = MemoryStorage::new();
        storage.set(BOARD_STATUS_KEY, r#"{"boardId":"a"}"#).unwrap();
        let store = GameStateStore::new(&storage);

        assert!(store.list_board_statuses().is_empty());
        assert_eq!(storage.get(BOARD_STATUS_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_index_entries_are_skipped() {
        let storage = MemoryStorage::new();
        storage
            .set(
                BOARD_STATUS_KEY,
                r#"[{"boardId":"a","status":"won"},{"boardId":"b","status":"bogus"},3]"#,
            )
            .unwrap();
        let store = GameStateStore::new(&storage);

        let statuses = store.list_board_statuses();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].board_id, "a");
    }
}
