//! Rule engine for the "two stars" grid puzzle.
//!
//! A board is a rectangle of labelled cells; each label names a region. A
//! solved board has exactly [`STARS_PER_UNIT`] stars in every row, column,
//! and region, and no two stars touch, not even diagonally.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub use engine::*;
pub use error::*;
pub use layout::*;
pub use regions::*;
pub use shading::*;
pub use types::*;
pub use verdict::*;

mod engine;
mod error;
mod layout;
mod regions;
mod shading;
#[cfg(test)]
mod testing;
mod types;
mod verdict;
