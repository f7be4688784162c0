/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Signed axis for neighbor coordinates, which may step off the board.
pub type SignedCoord = i16;

/// Signed `(row, column)`, see [`SignedCoord`].
pub type SignedCoord2 = (SignedCoord, SignedCoord);

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

pub trait ToSigned {
    fn to_signed(self) -> SignedCoord2;
}

impl ToSigned for Coord2 {
    fn to_signed(self) -> SignedCoord2 {
        (self.0.into(), self.1.into())
    }
}

/// Converts signed coordinates back into board coordinates when they fall inside a `size`×`size`
/// board.
pub fn within_bounds((row, column): SignedCoord2, size: Coord) -> Option<Coord2> {
    let row = Coord::try_from(row).ok()?;
    let column = Coord::try_from(column).ok()?;
    (row < size && column < size).then_some((row, column))
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
