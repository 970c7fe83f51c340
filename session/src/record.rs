use ndarray::Array2;
use serde::{Deserialize, Serialize};
use twostars_core::GameStatus;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::*;

pub const STORAGE_PREFIX: &str = "two-star-game";
pub const BOARD_STATUS_KEY: &str = "two-star-board-statuses";

/// Newest record layout this build reads and the one it writes.
pub const GAME_STATE_VERSION: u32 = 1;

pub fn board_state_key(board_id: &str) -> String {
    format!("{STORAGE_PREFIX}-board-{board_id}")
}

/// Milliseconds since the Unix epoch, `0` if the clock is before it.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// What a session hands to the store and gets back from it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub stars: Array2<bool>,
    pub status: GameStatus,
}

/// Per-board record as it sits in storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGame {
    pub selected_cells: Vec<Vec<bool>>,
    pub game_status: GameStatus,
    pub timestamp: i64,
    pub version: u32,
}

impl PersistedGame {
    pub fn new(snapshot: &GameSnapshot, timestamp: i64) -> Self {
        Self {
            selected_cells: snapshot
                .stars
                .rows()
                .into_iter()
                .map(|row| row.to_vec())
                .collect(),
            game_status: snapshot.status,
            timestamp,
            version: GAME_STATE_VERSION,
        }
    }

    pub fn into_snapshot(self) -> Result<GameSnapshot, StoreError> {
        if self.version > GAME_STATE_VERSION {
            return Err(StoreError::UnsupportedVersion(self.version));
        }

        let rows = self.selected_cells.len();
        let cols = self.selected_cells.first().map_or(0, Vec::len);
        if self.selected_cells.iter().any(|row| row.len() != cols) {
            return Err(StoreError::CorruptedData("ragged cell rows".into()));
        }

        let cells = self.selected_cells.into_iter().flatten().collect();
        let stars = Array2::from_shape_vec((rows, cols), cells)
            .map_err(|err| StoreError::CorruptedData(err.to_string()))?;
        Ok(GameSnapshot {
            stars,
            status: self.game_status,
        })
    }
}

/// Summary status shown in board listings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardStatus {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl BoardStatus {
    pub const fn as_str(self) -> &'static str {
        use BoardStatus::*;
        match self {
            NotStarted => "not-started",
            InProgress => "in-progress",
            Won => "won",
            Lost => "lost",
        }
    }
}

impl From<GameStatus> for BoardStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::NotStarted => Self::NotStarted,
            GameStatus::Playing => Self::InProgress,
            GameStatus::Won => Self::Won,
            GameStatus::Lost => Self::Lost,
        }
    }
}

impl std::fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the status index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStatusRecord {
    pub board_id: String,
    pub status: BoardStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<i64>,
}
