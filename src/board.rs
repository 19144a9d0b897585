use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cell states layered over a mine layout. The board knows nothing
/// about session phases; gating of moves after the game ends is the
/// session's job, so every operation here is phase-free and idempotent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    grid: Array2<CellState>,
    revealed: CellCount,
    flagged: CellCount,
    exploded: Option<Coord2>,
}

impl Board {
    pub fn new(layout: MineLayout) -> Self {
        let size = layout.size() as usize;
        Self {
            layout,
            grid: Array2::default([size, size]),
            revealed: 0,
            flagged: 0,
            exploded: None,
        }
    }

    /// Board with no mines yet, used while placement is deferred until the
    /// first reveal click.
    pub fn unarmed(size: Coord) -> Self {
        Self::new(MineLayout::empty(size))
    }

    /// Installs the deferred mine layout. Reveal states, flags included,
    /// are kept as they are.
    pub(crate) fn place_mines(&mut self, layout: MineLayout) {
        debug_assert_eq!(layout.size(), self.size());
        debug_assert_eq!(self.revealed, 0);
        self.layout = layout;
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    pub fn bounds(&self) -> Coord2 {
        self.layout.bounds()
    }

    pub fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self.grid[coords.to_nd_index()]
    }

    pub fn mine_at(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    /// The single clicked mine that ended the game, if any.
    pub fn exploded(&self) -> Option<Coord2> {
        self.exploded
    }

    /// Whether every safe cell has been revealed. Flagged safe cells do not
    /// count: a wrong flag blocks the win until it is lifted.
    pub fn is_cleared(&self) -> bool {
        self.revealed == self.layout.safe_cells()
    }

    /// Reveals a cell. Flagged and already-revealed cells are silent
    /// no-ops. Revealing a mine records it as the exploded cell; revealing
    /// a safe cell stores its adjacency count and, for a count of zero,
    /// flood-fills the connected zero region with an explicit work list.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if !self.state_at(coords).is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.contains_mine(coords) {
            self.exploded = Some(coords);
            log::info!("mine hit at {coords:?}");
            return Ok(RevealOutcome::Exploded);
        }

        self.flood_reveal(coords);

        Ok(if self.is_cleared() {
            log::info!("board cleared, {} cells revealed", self.revealed);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Work-list flood fill seeded with one hidden safe cell. A cell's own
    /// `Hidden` state doubles as the visited check, which also deduplicates
    /// work-list entries; flagged cells of either kind are barriers. Only
    /// zero-count cells enqueue their neighbors, and the neighbors of a
    /// zero-count cell are safe by definition, so mines are never reached.
    fn flood_reveal(&mut self, start: Coord2) {
        let bounds = self.bounds();
        let mut pending = VecDeque::from([start]);

        while let Some(coords) = pending.pop_front() {
            if !self.state_at(coords).is_hidden() {
                continue;
            }

            let count = self.layout.adjacent_mines(coords);
            self.grid[coords.to_nd_index()] = CellState::Revealed(count);
            self.revealed += 1;
            log::trace!("revealed {coords:?} with {count} adjacent mines");

            if count == 0 {
                pending.extend(
                    neighbors(coords, bounds).filter(|&pos| self.state_at(pos).is_hidden()),
                );
            }
        }
    }

    /// Hidden ↔ Flagged, a pure 2-cycle independent of mine identity.
    /// Revealed cells ignore the toggle.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        Ok(match self.state_at(coords) {
            CellState::Hidden => {
                self.grid[coords.to_nd_index()] = CellState::Flagged;
                self.flagged += 1;
                FlagOutcome::Toggled
            }
            CellState::Flagged => {
                self.grid[coords.to_nd_index()] = CellState::Hidden;
                self.flagged -= 1;
                FlagOutcome::Toggled
            }
            CellState::Revealed(_) => FlagOutcome::NoChange,
        })
    }
}
