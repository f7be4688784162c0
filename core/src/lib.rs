#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use grid::*;
pub use neighborhood::*;
pub use outcome::*;
pub use presentation::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod board;
mod error;
mod grid;
mod neighborhood;
mod outcome;
mod presentation;
mod reveal;
mod session;
mod types;

/// Side length of a new board when no config is given.
pub const DEFAULT_SIZE: Coord = 10;
/// Chance that any one cell holds a mine when no config is given.
pub const DEFAULT_MINE_PROBABILITY: f64 = 0.2;

/// Board size and mine density, fixed for the lifetime of one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord,
    mine_probability: f64,
}

impl GameConfig {
    pub fn new(size: Coord, mine_probability: f64) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        let mine_probability = check_probability(mine_probability)?;
        Ok(Self {
            size,
            mine_probability,
        })
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mine_probability(&self) -> f64 {
        self.mine_probability
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            mine_probability: DEFAULT_MINE_PROBABILITY,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
