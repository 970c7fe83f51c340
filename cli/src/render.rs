use std::fmt;

use twostars_core::{Coord, Game, LineMark};

const STAR: char = '★';
const SHADED: char = '·';
const OPEN: char = ' ';

fn mark_char(mark: LineMark) -> char {
    match mark {
        LineMark::Blank => ' ',
        LineMark::Complete => '✓',
        LineMark::Off => '✗',
    }
}

/// Text rendering of a board: region borders drawn with `|` and `-`, 1-based
/// indices on the top and left, line marks on the right and bottom.
pub struct BoardView<'a> {
    game: &'a Game,
}

impl<'a> BoardView<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }

    fn separator(&self, f: &mut fmt::Formatter<'_>, row: Coord) -> fmt::Result {
        let layout = self.game.layout();
        let rows = layout.rows();
        write!(f, "   ")?;
        for col in 0..layout.cols() {
            let edge = if row == rows {
                layout.borders((row - 1, col)).bottom
            } else {
                layout.borders((row, col)).top
            };
            write!(f, "+{}", if edge { '-' } else { ' ' })?;
        }
        writeln!(f, "+")
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.game;
        let layout = game.layout();
        let row_marks = game.row_marks();
        let col_marks = game.col_marks();

        write!(f, "   ")?;
        for col in 0..layout.cols() {
            write!(f, "{:>2}", u16::from(col) + 1)?;
        }
        writeln!(f)?;

        for row in 0..layout.rows() {
            self.separator(f, row)?;
            write!(f, "{:>2} ", u16::from(row) + 1)?;
            for col in 0..layout.cols() {
                let coords = (row, col);
                let wall = if layout.borders(coords).left { '|' } else { ' ' };
                let glyph = if game.has_star_at(coords) {
                    STAR
                } else if game.is_shaded_at(coords) {
                    SHADED
                } else {
                    OPEN
                };
                write!(f, "{wall}{glyph}")?;
            }
            writeln!(f, "| {}", mark_char(row_marks[usize::from(row)]))?;
        }
        self.separator(f, layout.rows())?;

        write!(f, "   ")?;
        for mark in col_marks {
            write!(f, " {}", mark_char(mark))?;
        }
        writeln!(f)
    }
}
