use crate::*;
pub use rejection::*;

mod rejection;

/// Produces the mine layout for a board once the first reveal click is
/// known. `exclude` is that click's cell and must never receive a mine.
pub trait LayoutGenerator {
    fn generate(self, config: GameConfig, exclude: Coord2) -> MineLayout;
}
