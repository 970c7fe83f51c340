use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells sharing one label, listed in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub label: String,
    pub cells: Vec<Coord2>,
}

impl Region {
    pub fn star_count(&self, stars: &Array2<bool>) -> CellCount {
        let count = self
            .cells
            .iter()
            .filter(|&&coords| stars[coords.to_nd_index()])
            .count();
        count.try_into().unwrap_or(CellCount::MAX)
    }
}

/// Every region of a board, ordered by the first appearance of its label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionMap {
    regions: Vec<Region>,
    by_label: HashMap<String, usize>,
}

impl RegionMap {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Region> {
        self.by_label.get(label).map(|&index| &self.regions[index])
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.label.as_str())
    }

    fn push_cell(&mut self, label: &str, coords: Coord2) {
        let index = match self.by_label.get(label) {
            Some(&index) => index,
            None => {
                let index = self.regions.len();
                self.regions.push(Region {
                    label: label.to_string(),
                    cells: Vec::new(),
                });
                self.by_label.insert(label.to_string(), index);
                index
            }
        };
        self.regions[index].cells.push(coords);
    }
}

impl<'a> IntoIterator for &'a RegionMap {
    type Item = &'a Region;
    type IntoIter = core::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Groups the cells of `layout` by label in a single row-major pass.
pub fn extract_regions(layout: &BoardLayout) -> RegionMap {
    let mut regions = RegionMap::default();
    for coords in layout.iter_coords() {
        regions.push_cell(layout.label_at(coords), coords);
    }
    log::trace!(
        "extracted {} regions from a {:?} layout",
        regions.len(),
        layout.size()
    );
    regions
}
