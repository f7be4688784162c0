use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell should look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Hidden,
    Flag,
    Open(u8),
    Mine,
    TriggeredMine,
    /// Flag on a safe cell, only shown once the game is lost.
    Misflag,
}

impl Glyph {
    pub fn for_cell(cell: &Cell, board: &Board) -> Self {
        let lost = board.outcome() == Outcome::Lost;

        match (cell.is_revealed, cell.is_mine, cell.is_flagged) {
            (_, true, _) if board.triggered_mine() == Some(cell.coords()) => Self::TriggeredMine,
            (true, true, true) if lost => Self::Flag,
            (true, true, _) => Self::Mine,
            (true, false, true) if lost => Self::Misflag,
            (true, false, _) => Self::Open(cell.adjacent_mine_count),
            (false, _, true) => Self::Flag,
            (false, _, false) => Self::Hidden,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flag => 'F',
            Self::Open(0) => '.',
            Self::Open(count) => (b'0' + count) as char,
            Self::Mine => '*',
            Self::TriggeredMine => '!',
            Self::Misflag => 'X',
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Consumer of board snapshots. Presenters get shared access only.
pub trait Presenter {
    fn present(&mut self, board: &Board);
}

/// Plain-text rendering, one line per row.
#[derive(Copy, Clone, Debug)]
pub struct TextView<'a>(pub &'a Board);

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let size = board.size();
        for cell in board.cells() {
            write!(f, "{}", Glyph::for_cell(&cell, board))?;
            if cell.column + 1 == size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
