use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    /// The cell was empty and shaded, so nothing moved.
    NoChange,
    Placed,
    Removed,
    Won,
    Lost,
}

impl ToggleOutcome {
    pub const fn has_update(self) -> bool {
        use ToggleOutcome::*;
        match self {
            NoChange => false,
            Placed => true,
            Removed => true,
            Won => true,
            Lost => true,
        }
    }
}

/// Rule state of one board: placements plus everything derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    layout: BoardLayout,
    regions: RegionMap,
    stars: Array2<bool>,
    shading: Array2<bool>,
    status: GameStatus,
}

impl Game {
    pub fn new(layout: BoardLayout) -> Self {
        let regions = extract_regions(&layout);
        let stars = layout.empty_grid();
        let shading = layout.empty_grid();
        Self {
            layout,
            regions,
            stars,
            shading,
            status: Default::default(),
        }
    }

    /// Starts from previously stored placements; the status is re-derived.
    pub fn with_stars(layout: BoardLayout, stars: Array2<bool>) -> Result<Self> {
        let mut game = Self::new(layout);
        game.restore(stars)?;
        Ok(game)
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn stars(&self) -> &Array2<bool> {
        &self.stars
    }

    pub fn shading(&self) -> &Array2<bool> {
        &self.shading
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn has_star_at(&self, coords: Coord2) -> bool {
        self.stars[coords.to_nd_index()]
    }

    pub fn is_shaded_at(&self, coords: Coord2) -> bool {
        self.shading[coords.to_nd_index()]
    }

    pub fn star_count(&self) -> CellCount {
        let count = self.stars.iter().filter(|&&star| star).count();
        count.try_into().unwrap_or(CellCount::MAX)
    }

    /// Whether a toggle at `coords` would change the board right now.
    pub fn can_toggle_at(&self, coords: Coord2) -> bool {
        if self.status.is_finished() || self.layout.validate_coords(coords).is_err() {
            return false;
        }
        self.has_star_at(coords) || !self.is_shaded_at(coords)
    }

    pub fn row_marks(&self) -> Vec<LineMark> {
        LineCounts::of(&self.stars)
            .rows
            .into_iter()
            .map(LineMark::from_count)
            .collect()
    }

    pub fn col_marks(&self) -> Vec<LineMark> {
        LineCounts::of(&self.stars)
            .cols
            .into_iter()
            .map(LineMark::from_count)
            .collect()
    }

    pub fn toggle(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        use ToggleOutcome::*;

        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        let had_star = self.has_star_at(coords);
        if !had_star && self.is_shaded_at(coords) {
            log::trace!("{:?} is shaded, ignoring toggle", coords);
            return Ok(NoChange);
        }

        self.stars[coords.to_nd_index()] = !had_star;
        self.refresh();

        Ok(match self.status {
            GameStatus::Won => Won,
            GameStatus::Lost => Lost,
            _ if had_star => Removed,
            _ => Placed,
        })
    }

    /// Clears every star, from any status.
    pub fn reset(&mut self) {
        self.stars.fill(false);
        self.refresh();
    }

    /// Replaces all placements at once, e.g. after reading them from storage.
    pub fn restore(&mut self, stars: Array2<bool>) -> Result<()> {
        if !self.layout.matches_shape(&stars) {
            return Err(GameError::InvalidBoardShape);
        }
        self.stars = stars;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.shading = compute_shading(&self.stars, &self.regions);
        let status = derive_status(&self.stars, &self.shading, &self.regions);
        if status != self.status {
            log::debug!("status: {} -> {}", self.status, status);
            self.status = status;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
