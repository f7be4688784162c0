//! Square grids and elementwise boolean mask algebra.
//!
//! Every function here allocates a fresh grid and leaves its inputs untouched.

use ndarray::{Array2, Zip};
use rand::Rng;

use crate::*;

/// Square boolean field over board coordinates.
pub type Mask = Array2<bool>;

/// Builds a `size`×`size` grid whose element at `(row, column)` is `generator((row, column))`.
///
/// The generator runs exactly once per coordinate, in row-major order.
pub fn build_grid<T, F>(size: Coord, mut generator: F) -> Array2<T>
where
    F: FnMut(Coord2) -> T,
{
    let side = usize::from(size);
    Array2::from_shape_fn((side, side), |(row, column)| {
        generator((row as Coord, column as Coord))
    })
}

/// Mask where each cell is independently `true` with the given probability.
///
/// Draws one `f64` in `[0, 1)` per cell and compares it against `probability`, so `0.0` never
/// places a mine and `1.0` always does.
pub fn random_mask<R: Rng>(size: Coord, probability: f64, rng: &mut R) -> Result<Mask> {
    check_probability(probability)?;
    Ok(build_grid(size, |_| rng.random::<f64>() < probability))
}

pub(crate) fn check_probability(probability: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(GameError::InvalidProbability)
    }
}

/// Mask with every cell set to `value`.
pub fn filled_mask(size: Coord, value: bool) -> Mask {
    build_grid(size, |_| value)
}

/// Elementwise OR across all `masks`.
pub fn or_masks(masks: &[&Mask]) -> Result<Mask> {
    fold_masks(masks, |a, b| a || b)
}

/// Elementwise AND across all `masks`.
pub fn and_masks(masks: &[&Mask]) -> Result<Mask> {
    fold_masks(masks, |a, b| a && b)
}

fn fold_masks(masks: &[&Mask], op: impl Fn(bool, bool) -> bool) -> Result<Mask> {
    let (first, rest) = masks.split_first().ok_or(GameError::NoMasks)?;
    let mut acc = (*first).clone();
    for &mask in rest {
        check_same_dim(&acc, mask)?;
        Zip::from(&mut acc)
            .and(mask)
            .for_each(|acc, &cell| *acc = op(*acc, cell));
    }
    Ok(acc)
}

pub fn any_true(mask: &Mask) -> bool {
    mask.iter().any(|&cell| cell)
}

pub fn all_true(mask: &Mask) -> bool {
    mask.iter().all(|&cell| cell)
}

/// Whether every corresponding cell of `a` and `b` matches.
pub fn masks_equal(a: &Mask, b: &Mask) -> Result<bool> {
    check_same_dim(a, b)?;
    Ok(a == b)
}

fn check_same_dim(a: &Mask, b: &Mask) -> Result<()> {
    if a.dim() == b.dim() {
        Ok(())
    } else {
        Err(GameError::MaskSizeMismatch)
    }
}

pub(crate) fn count_true(mask: &Mask) -> CellCount {
    mask.iter().filter(|&&cell| cell).count() as CellCount
}
