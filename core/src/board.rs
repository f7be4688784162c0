use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only projection of one cell, derived from the board masks on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub column: Coord,
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mine_count: u8,
}

impl Cell {
    pub const fn coords(&self) -> Coord2 {
        (self.row, self.column)
    }
}

/// State of one game: the mine, revealed and flag masks, cached adjacency counts and outcome.
///
/// Masks are only ever swapped whole. Every action builds its new masks on the side and commits
/// them together with the re-evaluated outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    mine: Mask,
    adjacency: Array2<u8>,
    revealed: Mask,
    flag: Mask,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Generates a random board from `config`.
    pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        let mine = random_mask(config.size(), config.mine_probability(), rng)?;
        let board = Self::from_mine_mask(mine)?;
        let size = board.size();
        match board.mine_count() {
            0 => log::warn!("Generated {size}x{size} board has no mines"),
            count if count == board.total_cells() => {
                log::warn!("Generated {size}x{size} board is all mines")
            }
            count => log::debug!("Generated {size}x{size} board with {count} mines"),
        }
        Ok(board)
    }

    /// Fresh board over a fixed mine layout, nothing revealed or flagged.
    pub fn from_mine_mask(mine: Mask) -> Result<Self> {
        let size = square_side(&mine)?;
        Ok(Self {
            adjacency: adjacency_grid(&mine),
            mine,
            revealed: filled_mask(size, false),
            flag: filled_mask(size, false),
            outcome: Outcome::Active,
            triggered_mine: None,
        })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        let mut mine = filled_mask(size, false);
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine[coords.to_nd_index()] = true;
        }
        Self::from_mine_mask(mine)
    }

    /// Restores a board mid-game from its three masks, re-deriving adjacency and outcome.
    ///
    /// A restored board that evaluates as lost has every cell revealed, like one lost in play.
    pub fn from_masks(mine: Mask, revealed: Mask, flag: Mask) -> Result<Self> {
        let mut board = Self::from_mine_mask(mine)?;
        if revealed.dim() != board.mine.dim() || flag.dim() != board.mine.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        board.commit(revealed, flag)?;
        Ok(board)
    }

    pub fn size(&self) -> Coord {
        self.mine.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn mine_mask(&self) -> &Mask {
        &self.mine
    }

    pub fn revealed_mask(&self) -> &Mask {
        &self.revealed
    }

    pub fn flag_mask(&self) -> &Mask {
        &self.flag
    }

    pub fn adjacency(&self) -> &Array2<u8> {
        &self.adjacency
    }

    pub fn mine_count(&self) -> CellCount {
        count_true(&self.mine)
    }

    pub fn flag_count(&self) -> CellCount {
        count_true(&self.flag)
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count() as isize) - (self.flag_count() as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cell_unchecked(coords))
    }

    /// Snapshot of every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size();
        (0..size).flat_map(move |row| (0..size).map(move |column| self.cell_unchecked((row, column))))
    }

    fn cell_unchecked(&self, coords: Coord2) -> Cell {
        let index = coords.to_nd_index();
        Cell {
            row: coords.0,
            column: coords.1,
            is_mine: self.mine[index],
            is_revealed: self.revealed[index],
            is_flagged: self.flag[index],
            adjacent_mine_count: self.adjacency[index],
        }
    }

    /// Reveals `coords`, flood-filling zero regions.
    ///
    /// No change when the cell is already revealed or the game is over.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let index = coords.to_nd_index();

        if self.revealed[index] || self.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let revealed = reveal_region(&self.revealed, &self.mine, &self.adjacency, coords);
        let flag = self.flag.clone();

        if self.mine[index] {
            self.triggered_mine = Some(coords);
        }
        self.commit(revealed, flag)?;

        Ok(match self.outcome {
            Outcome::Active => RevealOutcome::Revealed,
            Outcome::Won => RevealOutcome::Won,
            Outcome::Lost => RevealOutcome::HitMine,
        })
    }

    /// Flips the flag on an unrevealed cell.
    ///
    /// No change when the cell is revealed or the game is over.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let index = coords.to_nd_index();

        if self.revealed[index] || self.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let mut flag = self.flag.clone();
        flag[index] = !flag[index];
        let revealed = self.revealed.clone();
        self.commit(revealed, flag)?;

        Ok(match self.outcome {
            Outcome::Won => MarkOutcome::Won,
            _ => MarkOutcome::Changed,
        })
    }

    /// Installs new masks and re-evaluates the outcome.
    fn commit(&mut self, mut revealed: Mask, flag: Mask) -> Result<()> {
        let evaluated = evaluate(&self.mine, &revealed, &flag)?;
        let outcome = self.outcome.advance(evaluated);

        if outcome == Outcome::Lost && self.outcome != Outcome::Lost {
            revealed = filled_mask(self.size(), true);
        }
        if outcome != self.outcome {
            log::debug!("Game outcome {:?} -> {:?}", self.outcome, outcome);
        }

        self.revealed = revealed;
        self.flag = flag;
        self.outcome = outcome;
        Ok(())
    }
}

/// Serialized form accepted when loading a board. Derived state is rebuilt and checked.
#[derive(Deserialize)]
struct BoardRepr {
    mine: Mask,
    revealed: Mask,
    flag: Mask,
    #[serde(default)]
    triggered_mine: Option<Coord2>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let mut board = Board::from_masks(repr.mine, repr.revealed, repr.flag)?;
        if let Some(coords) = repr.triggered_mine {
            let coords = board.validate_coords(coords)?;
            if !board.mine[coords.to_nd_index()] {
                return Err(GameError::InvalidCoords);
            }
            board.triggered_mine = Some(coords);
        }
        Ok(board)
    }
}

fn square_side(mask: &Mask) -> Result<Coord> {
    let (rows, columns) = mask.dim();
    if rows != columns || rows == 0 {
        return Err(GameError::InvalidBoardShape);
    }
    Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn fresh_board_is_active_and_covered() {
        let board = board(3, &[(1, 1)]);

        assert_eq!(board.outcome(), Outcome::Active);
        assert_eq!(board.size(), 3);
        assert_eq!(board.mine_count(), 1);
        assert!(board.cells().all(|cell| !cell.is_revealed && !cell.is_flagged));
        assert_eq!(board.cell((0, 0)).unwrap().adjacent_mine_count, 1);
    }

    #[test]
    fn from_mine_mask_rejects_non_square() {
        let mask: Mask = Array2::default([2, 3]);

        assert_eq!(
            Board::from_mine_mask(mask).unwrap_err(),
            GameError::InvalidBoardShape
        );
        assert_eq!(
            Board::from_mine_coords(0, &[]).unwrap_err(),
            GameError::InvalidSize
        );
        assert_eq!(
            Board::from_mine_coords(2, &[(2, 0)]).unwrap_err(),
            GameError::InvalidCoords
        );
    }

    #[test]
    fn out_of_range_actions_are_errors() {
        let mut board = board(3, &[]);

        assert_eq!(board.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 7)), Err(GameError::InvalidCoords));
        assert_eq!(board.cell((5, 5)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn reveal_already_revealed_cell_is_no_change() {
        let mut board = board(3, &[(1, 1)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        let snapshot = board.clone();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn flagging_revealed_cell_is_no_change() {
        let mut board = board(3, &[(1, 1)]);
        board.reveal((2, 2)).unwrap();

        assert_eq!(board.toggle_flag((2, 2)).unwrap(), MarkOutcome::NoChange);
        assert!(!board.flag_mask()[[2, 2]]);
    }

    #[test]
    fn toggle_flag_flips_and_counts() {
        let mut board = board(3, &[(1, 1)]);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.toggle_flag((0, 1)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flag_count(), 2);
        assert_eq!(board.mines_left(), -1);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flag_count(), 1);
        assert!(board.cell((0, 1)).unwrap().is_flagged);
    }

    #[test]
    fn flood_fill_keeps_flags_on_opened_cells() {
        let mut board = board(4, &[(3, 3)]);
        board.toggle_flag((0, 3)).unwrap();

        board.reveal((0, 0)).unwrap();

        assert!(board.cell((0, 3)).unwrap().is_revealed);
        assert!(board.cell((0, 3)).unwrap().is_flagged);
        assert_eq!(board.flag_count(), 1);
    }

    #[test]
    fn stray_flag_on_revealed_safe_cell_blocks_win() {
        let mut board = board(2, &[(0, 0)]);
        board.toggle_flag((0, 0)).unwrap();
        board.toggle_flag((0, 1)).unwrap();

        assert_eq!(board.reveal((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);

        assert!(board.flag_mask()[[0, 1]]);
        assert_eq!(board.outcome(), Outcome::Active);
        assert_eq!(board.toggle_flag((0, 1)).unwrap(), MarkOutcome::NoChange);
    }

    #[test]
    fn hitting_a_mine_reveals_everything_and_keeps_flags() {
        let mut board = board(3, &[(0, 0), (2, 2)]);
        board.toggle_flag((2, 2)).unwrap();
        board.toggle_flag((1, 2)).unwrap();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(board.outcome(), Outcome::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        assert!(all_true(board.revealed_mask()));
        assert_eq!(board.flag_count(), 2);
    }

    #[test]
    fn finished_board_ignores_actions() {
        let mut board = board(2, &[(0, 0)]);
        board.reveal((0, 0)).unwrap();
        let snapshot = board.clone();

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((0, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn flagging_last_mine_wins() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.outcome(), Outcome::Active);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Won);
        assert_eq!(board.outcome(), Outcome::Won);
        assert_eq!(board.triggered_mine(), None);
    }

    #[test]
    fn from_masks_reevaluates_outcome() {
        let mine = build_grid(2, |coords| coords == (0, 0));
        let revealed = mine.mapv(|is_mine| !is_mine);

        let won = Board::from_masks(mine.clone(), revealed.clone(), mine.clone()).unwrap();
        assert_eq!(won.outcome(), Outcome::Won);

        let lost = Board::from_masks(mine.clone(), mine.clone(), filled_mask(2, false)).unwrap();
        assert_eq!(lost.outcome(), Outcome::Lost);
        assert!(all_true(lost.revealed_mask()));

        assert_eq!(
            Board::from_masks(mine.clone(), filled_mask(3, false), mine).unwrap_err(),
            GameError::InvalidBoardShape
        );
    }

    #[test]
    fn deserialize_restores_a_saved_board() {
        let mut board = board(3, &[(0, 0)]);
        board.toggle_flag((2, 0)).unwrap();
        board.reveal((0, 0)).unwrap();

        let json = serde_json::to_value(&board).unwrap();
        let restored: Board = serde_json::from_value(json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(restored.triggered_mine(), Some((0, 0)));
    }

    #[test]
    fn deserialize_rejects_mismatched_masks() {
        let board = board(3, &[(1, 1)]);
        let mut json = serde_json::to_value(&board).unwrap();
        json["revealed"] = serde_json::to_value(filled_mask(2, false)).unwrap();

        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_triggered_mine_on_safe_cell() {
        let board = board(3, &[(1, 1)]);
        let mut json = serde_json::to_value(&board).unwrap();
        json["triggered_mine"] = serde_json::json!([0, 0]);

        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn cells_iterates_row_major() {
        let board = board(2, &[(1, 0)]);

        let coords: Vec<Coord2> = board.cells().map(|cell| cell.coords()).collect();
        let expected: [Coord2; 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

        assert_eq!(coords, expected);
        assert!(board.cells().nth(2).unwrap().is_mine);
    }
}
