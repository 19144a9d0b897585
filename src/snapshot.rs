use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of the whole session for one rendered frame. The
/// collaborator only ever reads this; it never mutates engine state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord,
    pub mines: CellCount,
    pub phase: SessionPhase,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn capture(session: &GameSession) -> Self {
        let config = session.config();
        let board = session.board();
        let phase = session.phase();

        let mut cells = Array2::from_elem([config.size as usize, config.size as usize], CellView::Hidden);
        for x in 0..config.size {
            for y in 0..config.size {
                let coords = (x, y);
                cells[coords.to_nd_index()] = view_of(board, phase, coords);
            }
        }

        Self {
            size: config.size,
            mines: config.mines,
            phase,
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

/// Derives the visual category of one cell from reveal state, mine layout,
/// and phase. Mine display on loss and the auto-flag on win are pure
/// derivations here, the board grid is never rewritten for them, which is
/// also what keeps a pre-win flag on a mine indistinguishable from the
/// auto-flag.
fn view_of(board: &Board, phase: SessionPhase, coords: Coord2) -> CellView {
    let state = board.state_at(coords);

    if board.mine_at(coords) {
        return match phase {
            SessionPhase::Terminal(GameOutcome::Lost) => {
                if board.exploded() == Some(coords) {
                    CellView::ExplodedMine
                } else {
                    CellView::RevealedMine
                }
            }
            SessionPhase::Terminal(GameOutcome::Won) => CellView::FlaggedMine,
            _ if state == CellState::Flagged => CellView::FlaggedMine,
            _ => CellView::Hidden,
        };
    }

    match state {
        CellState::Hidden => CellView::Hidden,
        CellState::Flagged => CellView::FlaggedSafe,
        CellState::Revealed(count) => CellView::RevealedNumber(count),
    }
}
