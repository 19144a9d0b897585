/// Single board axis, used for positions and the board's side length.
pub type Coord = u8;

/// Count type used for cell and mine totals.
pub type CellCount = u16;

/// Grid position `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn cell_area(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the in-bounds cells of the 3×3 neighborhood around `center`,
/// excluding `center` itself, on a board of `bounds` size.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.iter().filter_map(move |&(dx, dy)| {
        let x = center.0.checked_add_signed(dx)?;
        let y = center.1.checked_add_signed(dy)?;
        (x < bounds.0 && y < bounds.1).then_some((x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_of_interior_cell_cover_full_ring() {
        let around: Vec<Coord2> = neighbors((1, 1), (3, 3)).collect();

        assert_eq!(around.len(), 8);
        assert!(!around.contains(&(1, 1)));
    }

    #[test]
    fn neighbors_clamp_at_corners_and_edges() {
        let corner: Vec<Coord2> = neighbors((0, 0), (3, 3)).collect();
        assert_eq!(corner, [(1, 0), (0, 1), (1, 1)]);

        let edge: Vec<Coord2> = neighbors((2, 1), (3, 3)).collect();
        assert_eq!(edge.len(), 5);
    }

    #[test]
    fn cell_area_saturates_instead_of_overflowing() {
        assert_eq!(cell_area(20, 20), 400);
        assert_eq!(cell_area(255, 255), 255 * 255);
    }
}
