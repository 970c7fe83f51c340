use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of region labels, fixed for the lifetime of a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct BoardLayout {
    labels: Array2<String>,
}

impl BoardLayout {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);

        if row_count == 0
            || col_count == 0
            || row_count > usize::from(Coord::MAX)
            || col_count > usize::from(Coord::MAX)
            || rows.iter().any(|row| row.len() != col_count)
        {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<String> = rows.into_iter().flatten().collect();
        let labels = Array2::from_shape_vec((row_count, col_count), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { labels })
    }

    /// Builds a layout where every character of every row is one label.
    pub fn from_strs(rows: &[&str]) -> Result<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.labels)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn label_at(&self, coords: Coord2) -> &str {
        &self.labels[coords.to_nd_index()]
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_coords(self.size())
    }

    /// Which sides of the cell at `coords` lie on a region boundary.
    pub fn borders(&self, coords: Coord2) -> CellBorders {
        let (row, col) = coords;
        let (rows, cols) = self.size();
        let label = self.label_at(coords);
        let differs = |other: Coord2| self.label_at(other) != label;

        CellBorders {
            top: row == 0 || differs((row - 1, col)),
            right: col + 1 == cols || differs((row, col + 1)),
            bottom: row + 1 == rows || differs((row + 1, col)),
            left: col == 0 || differs((row, col - 1)),
        }
    }

    /// Allocates an all-false grid with the same shape as this layout.
    pub fn empty_grid(&self) -> Array2<bool> {
        Array2::default(self.labels.dim())
    }

    pub fn matches_shape<T>(&self, grid: &Array2<T>) -> bool {
        grid.dim() == self.labels.dim()
    }
}

impl TryFrom<Vec<Vec<String>>> for BoardLayout {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<BoardLayout> for Vec<Vec<String>> {
    fn from(layout: BoardLayout) -> Self {
        layout
            .labels
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Region edges around a single cell, true where a thick border is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBorders {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// One entry of the board catalog handed in by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfo {
    pub id: String,
    pub name: String,
    pub layout: BoardLayout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![
            vec!["A".to_string(), "A".to_string()],
            vec!["B".to_string()],
        ];
        assert_eq!(
            BoardLayout::from_rows(rows),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn empty_layouts_are_rejected() {
        assert_eq!(
            BoardLayout::from_rows(vec![]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            BoardLayout::from_strs(&["", ""]),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn single_cell_layout_is_legal() {
        let layout = BoardLayout::from_strs(&["A"]).unwrap();
        assert_eq!(layout.size(), (1, 1));
        assert_eq!(layout.label_at((0, 0)), "A");
    }

    #[test]
    fn borders_follow_label_changes() {
        let layout = BoardLayout::from_strs(&["AAB", "ABB"]).unwrap();

        assert_eq!(
            layout.borders((0, 0)),
            CellBorders {
                top: true,
                right: false,
                bottom: false,
                left: true,
            }
        );
        assert_eq!(
            layout.borders((0, 1)),
            CellBorders {
                top: true,
                right: true,
                bottom: true,
                left: false,
            }
        );
        assert_eq!(
            layout.borders((1, 1)),
            CellBorders {
                top: true,
                right: false,
                bottom: true,
                left: true,
            }
        );
    }

    #[test]
    fn validate_coords_rejects_out_of_range() {
        let layout = BoardLayout::from_strs(&["AB", "AB"]).unwrap();
        assert_eq!(layout.validate_coords((1, 1)), Ok((1, 1)));
        assert_eq!(layout.validate_coords((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(layout.validate_coords((0, 2)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn layout_round_trips_through_rows() {
        let layout = BoardLayout::from_strs(&["AB", "CD"]).unwrap();
        let rows: Vec<Vec<String>> = layout.clone().into();
        assert_eq!(rows[1], ["C", "D"]);
        assert_eq!(BoardLayout::try_from(rows), Ok(layout));
    }
}
