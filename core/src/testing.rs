//! Shared fixtures for unit tests.

use ndarray::Array2;

use crate::*;

/// First board of the bundled catalog.
pub(crate) const BOARD_ONE: [&str; 10] = [
    "AAAAAAAABB",
    "AAAAAACABB",
    "DEEEACCCBB",
    "DDDDFGGCBB",
    "DDDFFFGGBB",
    "DDHFFFGGBB",
    "DDHHHGGGIB",
    "DDDDDDGGIB",
    "DJJJJJJJII",
    "JJJJJJJJJI",
];

/// The only winning placement of [`BOARD_ONE`].
pub(crate) const BOARD_ONE_SOLUTION: [Coord2; 20] = [
    (0, 1),
    (0, 4),
    (1, 6),
    (1, 8),
    (2, 1),
    (2, 3),
    (3, 7),
    (3, 9),
    (4, 3),
    (4, 5),
    (5, 0),
    (5, 7),
    (6, 2),
    (6, 4),
    (7, 6),
    (7, 8),
    (8, 0),
    (8, 2),
    (9, 5),
    (9, 9),
];

pub(crate) fn board_one() -> BoardLayout {
    BoardLayout::from_strs(&BOARD_ONE).unwrap()
}

pub(crate) fn star_grid(layout: &BoardLayout, stars: &[Coord2]) -> Array2<bool> {
    let mut grid = layout.empty_grid();
    for &coords in stars {
        grid[coords.to_nd_index()] = true;
    }
    grid
}
