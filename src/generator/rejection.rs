use ndarray::Array2;

use super::*;

/// Rejection-sampling placement: repeatedly draw a uniform random cell and
/// skip it when it is already a mine or equal to the excluded first-click
/// cell, until the quota is placed. Simple and fast for sparse mine counts.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionGenerator {
    seed: u64,
}

impl RejectionGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RejectionGenerator {
    fn generate(self, config: GameConfig, exclude: Coord2) -> MineLayout {
        use rand::prelude::*;

        let size = config.size.max(1);
        let mut mask: Array2<bool> = Array2::default([size as usize, size as usize]);

        // One cell must stay safe for the excluded click, otherwise the
        // sampling loop would never finish.
        let quota = config.mines.min(cell_area(size, size) - 1);
        if quota < config.mines {
            log::warn!(
                "mine count {} leaves no room for a safe first cell, reduced to {}",
                config.mines,
                quota
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        while placed < quota {
            let coords: Coord2 = (rng.random_range(0..size), rng.random_range(0..size));
            if coords == exclude || mask[coords.to_nd_index()] {
                continue;
            }
            mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        log::debug!("placed {placed} mines, first click {exclude:?} kept clear");
        MineLayout::from_mask(mask)
    }
}
