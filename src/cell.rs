use serde::{Deserialize, Serialize};

/// Reveal state tracked for one cell. Mine identity is not stored here, it
/// lives in the board's `MineLayout`, so a flag can never leak whether the
/// cell underneath is a mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    /// Revealed safe cell carrying its adjacency count (0–8), computed once
    /// at reveal time.
    Revealed(u8),
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Visual category handed to the rendering collaborator. This is the full
/// per-cell tagged variant: the renderer maps each category to a tile color
/// or glyph and needs nothing else.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    FlaggedSafe,
    FlaggedMine,
    ExplodedMine,
    RevealedMine,
    RevealedNumber(u8),
}

impl CellView {
    /// Whether the tile still renders as an unopened square.
    pub const fn is_covered(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            FlaggedSafe => true,
            FlaggedMine => true,
            ExplodedMine => false,
            RevealedMine => false,
            RevealedNumber(_) => false,
        }
    }
}
