#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod snapshot;
mod types;

/// Board parameters, fixed at session construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the parameters to a playable board: at least one cell, and at
    /// least one safe cell left over for the excluded first click.
    pub fn new(size: Coord, mines: CellCount) -> Self {
        let size = size.max(1);
        let mines = mines.min(cell_area(size, size) - 1);
        Self::new_unchecked(size, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_area(self.size, self.size)
    }

    pub const fn bounds(&self) -> Coord2 {
        (self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(20, 10)
    }
}

/// Square boolean mine mask with a cached mine count. A layout is immutable
/// once built; flagging and revealing never touch it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mask: Array2<bool>,
    mines: CellCount,
}

impl MineLayout {
    /// Layout with no mines at all, used while placement is still deferred.
    pub fn empty(size: Coord) -> Self {
        let size = size.max(1) as usize;
        Self {
            mask: Array2::default([size, size]),
            mines: 0,
        }
    }

    pub fn from_mask(mask: Array2<bool>) -> Self {
        let mines = mask.iter().filter(|&&mine| mine).count() as CellCount;
        Self { mask, mines }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default([size as usize, size as usize]);

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> Coord {
        self.mask.dim().0 as Coord
    }

    pub fn bounds(&self) -> Coord2 {
        let size = self.size();
        (size, size)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len() as CellCount
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mask[coords.to_nd_index()]
    }

    /// Mines in the clamped 3×3 neighborhood of `coords`. Flag state is
    /// irrelevant here, a flagged mine counts like any other.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.bounds())
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Toggled => true,
        }
    }
}

/// Outcome of a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}
