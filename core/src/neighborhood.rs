use ndarray::Array2;

use crate::*;

const DISPLACEMENTS: [SignedCoord2; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the eight raw neighbor coordinates of a cell, including ones that fall off the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: SignedCoord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2) -> Self {
        Self {
            center: center.to_signed(),
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = SignedCoord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (dr, dc) = *DISPLACEMENTS.get(usize::from(self.index))?;
        self.index += 1;
        Some((self.center.0 + dr, self.center.1 + dc))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = DISPLACEMENTS.len() - usize::from(self.index);
        (left, Some(left))
    }
}

/// Calls `visit` for each of the eight cells around `coords`.
///
/// Out-of-bounds coordinates are passed through as-is; bounds checking is up to `visit`.
pub fn for_each_neighbor(coords: Coord2, visit: impl FnMut(SignedCoord2)) {
    NeighborIter::new(coords).for_each(visit);
}

/// [`NeighborIter`] restricted to a `size`×`size` board.
#[derive(Debug)]
pub struct BoundedNeighborIter {
    inner: NeighborIter,
    size: Coord,
}

impl Iterator for BoundedNeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.size;
        self.inner.find_map(|pos| within_bounds(pos, size))
    }
}

pub trait NeighborIterExt {
    /// In-bounds neighbors of `coords`.
    fn iter_neighbors(&self, coords: Coord2) -> BoundedNeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, coords: Coord2) -> BoundedNeighborIter {
        BoundedNeighborIter {
            inner: NeighborIter::new(coords),
            size: side_len(self),
        }
    }
}

pub trait SignedIndexExt<T> {
    /// Element at signed coordinates, `None` when they fall off the grid.
    fn get_signed(&self, coords: SignedCoord2) -> Option<&T>;
}

impl<T> SignedIndexExt<T> for Array2<T> {
    fn get_signed(&self, (row, column): SignedCoord2) -> Option<&T> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        self.get([row, column])
    }
}

/// Number of in-bounds `true` neighbors of `coords` in `mask`.
pub fn count_true_neighbors(coords: Coord2, mask: &Mask) -> u8 {
    let mut count = 0;
    for_each_neighbor(coords, |pos| {
        if mask.get_signed(pos).copied().unwrap_or(false) {
            count += 1;
        }
    });
    count
}

/// Adjacent mine count for every cell of `mine`.
pub fn adjacency_grid(mine: &Mask) -> Array2<u8> {
    build_grid(side_len(mine), |coords| count_true_neighbors(coords, mine))
}

fn side_len<T>(grid: &Array2<T>) -> Coord {
    let (rows, columns) = grid.dim();
    rows.min(columns).try_into().unwrap_or(Coord::MAX)
}
