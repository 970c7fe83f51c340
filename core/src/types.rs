use ndarray::Array2;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for star tallies.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Stars required in every row, column, and region of a solved board.
pub const STARS_PER_UNIT: CellCount = 2;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Size of a grid as `(rows, cols)`, saturating at [`Coord::MAX`].
pub fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

/// Iterates every coordinate of a grid of `size` in row-major order.
pub fn iter_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = size;
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// The up to eight cells touching `center` inside a grid of `bounds`,
/// diagonals included, in row-major order.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let (rows, cols) = bounds;
    let row_span = row.saturating_sub(1)..=row.saturating_add(1);
    let col_span = col.saturating_sub(1)..=col.saturating_add(1);

    row_span
        .flat_map(move |r| col_span.clone().map(move |c| (r, c)))
        .filter(move |&cell| cell != center && cell.0 < rows && cell.1 < cols)
}

pub trait NeighborsExt {
    fn iter_neighbors(&self, index: Coord2) -> impl Iterator<Item = Coord2>;
}

impl<T> NeighborsExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> impl Iterator<Item = Coord2> {
        neighbors(index, grid_size(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let cells: Vec<_> = neighbors((0, 0), (3, 3)).collect();
        assert_eq!(cells, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(neighbors((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn last_cell_of_max_grid_stays_in_bounds() {
        let last = Coord::MAX - 1;
        let cells: Vec<_> = neighbors((last, last), (Coord::MAX, Coord::MAX)).collect();
        assert_eq!(cells, [(last - 1, last - 1), (last - 1, last), (last, last - 1)]);
    }

    #[test]
    fn coords_are_row_major() {
        let coords: Vec<_> = iter_coords((2, 2)).collect();
        assert_eq!(coords, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
