use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of one play-through of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn as_str(self) -> &'static str {
        use GameStatus::*;
        match self {
            NotStarted => "not-started",
            Playing => "playing",
            Won => "won",
            Lost => "lost",
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl core::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff every region, row, and column holds exactly two stars.
pub fn check_win(stars: &Array2<bool>, regions: &RegionMap) -> bool {
    if regions
        .iter()
        .any(|region| region.star_count(stars) != STARS_PER_UNIT)
    {
        return false;
    }

    let counts = LineCounts::of(stars);
    counts.rows.iter().all(|&count| count == STARS_PER_UNIT)
        && counts.cols.iter().all(|&count| count == STARS_PER_UNIT)
}

/// True when every unstarred cell is shaded on a board that isn't won.
///
/// `shading` must be the result of [`compute_shading`] for `stars`; the check
/// doesn't re-derive any rule on its own.
pub fn check_loss(stars: &Array2<bool>, shading: &Array2<bool>, regions: &RegionMap) -> bool {
    !has_placeable_cell(stars, shading) && !check_win(stars, regions)
}

pub fn derive_status(stars: &Array2<bool>, shading: &Array2<bool>, regions: &RegionMap) -> GameStatus {
    if check_win(stars, regions) {
        GameStatus::Won
    } else if check_loss(stars, shading, regions) {
        GameStatus::Lost
    } else if stars.iter().any(|&star| star) {
        GameStatus::Playing
    } else {
        GameStatus::NotStarted
    }
}

/// Progress marker shown beside a row or column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineMark {
    /// No star yet.
    Blank,
    /// Exactly two stars.
    Complete,
    /// Any other count.
    Off,
}

impl LineMark {
    pub const fn from_count(count: CellCount) -> Self {
        match count {
            0 => Self::Blank,
            STARS_PER_UNIT => Self::Complete,
            _ => Self::Off,
        }
    }
}
