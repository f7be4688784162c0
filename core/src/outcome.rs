use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Active,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Next outcome given a freshly evaluated one. Finished games stay finished.
    pub const fn advance(self, evaluated: Outcome) -> Outcome {
        if self.is_finished() { self } else { evaluated }
    }
}

/// Classifies a set of board masks.
///
/// Loss is checked first: any revealed mine loses regardless of coverage. Winning needs every
/// cell revealed or flagged *and* the flags to sit exactly on the mines.
pub fn evaluate(mine: &Mask, revealed: &Mask, flag: &Mask) -> Result<Outcome> {
    if any_true(&and_masks(&[revealed, mine])?) {
        return Ok(Outcome::Lost);
    }

    if all_true(&or_masks(&[revealed, flag])?) && masks_equal(flag, mine)? {
        return Ok(Outcome::Won);
    }

    Ok(Outcome::Active)
}
