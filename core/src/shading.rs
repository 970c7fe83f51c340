use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Star tallies for every row and column of a placement grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineCounts {
    pub rows: Vec<CellCount>,
    pub cols: Vec<CellCount>,
}

impl LineCounts {
    pub fn of(stars: &Array2<bool>) -> Self {
        let (row_count, col_count) = stars.dim();
        let mut rows = vec![0; row_count];
        let mut cols = vec![0; col_count];

        for ((row, col), &star) in stars.indexed_iter() {
            if star {
                rows[row] += 1;
                cols[col] += 1;
            }
        }

        Self { rows, cols }
    }
}

/// Cells where a new star may not go under the current placements.
///
/// A cell is shaded when it already holds a star, when its region, row, or
/// column already holds [`STARS_PER_UNIT`] stars, or when it touches a star in
/// any of the eight directions. The grid is always rebuilt from scratch since
/// removing a star can lift shading through any of those rules.
pub fn compute_shading(stars: &Array2<bool>, regions: &RegionMap) -> Array2<bool> {
    let mut shaded: Array2<bool> = Array2::default(stars.dim());

    for region in regions {
        if region.star_count(stars) == STARS_PER_UNIT {
            for &coords in &region.cells {
                shaded[coords.to_nd_index()] = true;
            }
        }
    }

    let counts = LineCounts::of(stars);
    for ((row, col), cell) in shaded.indexed_iter_mut() {
        if counts.rows[row] == STARS_PER_UNIT || counts.cols[col] == STARS_PER_UNIT {
            *cell = true;
        }
    }

    for ((row, col), &star) in stars.indexed_iter() {
        if !star {
            continue;
        }
        let coords = match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(row), Ok(col)) => (row, col),
            _ => continue,
        };
        shaded[coords.to_nd_index()] = true;
        for neighbor in stars.iter_neighbors(coords) {
            shaded[neighbor.to_nd_index()] = true;
        }
    }

    shaded
}

/// Whether a star could still be placed somewhere under `shading`.
pub fn has_placeable_cell(stars: &Array2<bool>, shading: &Array2<bool>) -> bool {
    stars
        .iter()
        .zip(shading.iter())
        .any(|(&star, &shaded)| !star && !shaded)
}
