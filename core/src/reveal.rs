use alloc::vec;
use ndarray::Array2;

use crate::*;

/// Computes the revealed mask after clicking `target`.
///
/// The target itself is always revealed, mine or not. When it is a safe cell with no adjacent
/// mines, the zero region around it is opened too, along with its numbered border. Mines are
/// never reached by the expansion. Returns a new mask; `revealed` is left untouched.
pub fn reveal_region(
    revealed: &Mask,
    mine: &Mask,
    adjacency: &Array2<u8>,
    target: Coord2,
) -> Mask {
    let mut working = revealed.clone();
    let index = target.to_nd_index();
    if working[index] {
        return working;
    }
    working[index] = true;

    if mine[index] || adjacency[index] != 0 {
        return working;
    }

    let mut pending: Mask = Array2::default(revealed.dim());
    pending[index] = true;
    let mut to_visit = vec![target];
    let mut opened = 1usize;

    while let Some(coords) = to_visit.pop() {
        for neighbor in working.iter_neighbors(coords) {
            let neighbor_index = neighbor.to_nd_index();
            if mine[neighbor_index] || working[neighbor_index] {
                continue;
            }

            working[neighbor_index] = true;
            opened += 1;

            if adjacency[neighbor_index] == 0 && !pending[neighbor_index] {
                pending[neighbor_index] = true;
                to_visit.push(neighbor);
            }
        }
    }

    log::trace!("flood fill from {target:?} opened {opened} cells");
    working
}
