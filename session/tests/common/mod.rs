#![allow(dead_code)]

use twostars_core::{BoardLayout, Coord2};

pub const BOARD_ONE: [&str; 10] = [
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

pub const BOARD_ONE_SOLUTION: [Coord2; 20] = [
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

pub fn board_one() -> BoardLayout {
    BoardLayout::from_strs(&BOARD_ONE).unwrap()
}

/// Region "A" is the top half, "B" the bottom half.
pub fn halves() -> BoardLayout {
    BoardLayout::from_strs(&["AAAA", "AAAA", "BBBB", "BBBB"]).unwrap()
}
