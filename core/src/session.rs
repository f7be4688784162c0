use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player input, one per cell interaction plus restart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
    Restarted,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
            Self::Restarted => true,
        }
    }
}

/// Runs consecutive games, owning the random source used to lay out mines.
///
/// Each action is applied to completion before returning. A restart drops the current board and
/// nothing from it carries over.
#[derive(Debug)]
pub struct Session<R> {
    config: GameConfig,
    rng: R,
    board: Board,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self> {
        let board = Board::generate(&config, &mut rng)?;
        Ok(Self { config, rng, board })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Config for the next restart; the running game keeps its own.
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn primary_activate(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.board.reveal(coords)?;
        log::trace!("reveal {coords:?}: {outcome:?}");
        Ok(outcome)
    }

    pub fn secondary_activate(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let outcome = self.board.toggle_flag(coords)?;
        log::trace!("flag {coords:?}: {outcome:?}");
        Ok(outcome)
    }

    pub fn restart(&mut self) -> Result<()> {
        self.board = Board::generate(&self.config, &mut self.rng)?;
        log::debug!("Game restarted");
        Ok(())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutcome> {
        Ok(match action {
            Action::Reveal(coords) => ActionOutcome::Reveal(self.primary_activate(coords)?),
            Action::ToggleFlag(coords) => ActionOutcome::Mark(self.secondary_activate(coords)?),
            Action::Restart => {
                self.restart()?;
                ActionOutcome::Restarted
            }
        })
    }

    /// Hands the current board to `presenter`.
    pub fn present<P: Presenter>(&self, presenter: &mut P) {
        presenter.present(&self.board);
    }
}
