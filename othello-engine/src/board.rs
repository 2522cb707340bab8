//! The 8x8 grid of cells. Holds no rule logic.

use crate::{Location, OutOfRange, EDGE_LENGTH, NUM_SPACES};
use std::fmt::{self, Formatter, Write};

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Default for Player {
    /// Gets the starting player.
    fn default() -> Self {
        Self::One
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => f.write_str("Player 1"),
            Player::Two => f.write_str("Player 2"),
        }
    }
}

/// The contents of a single square.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl Cell {
    /// The player who owns this cell, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }

    /// Numeric tag used by the save format: 0 empty, 1 player one, 2 player two.
    pub fn tag(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Cell::Empty),
            1 => Some(Cell::PlayerOne),
            2 => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// The playing grid, indexed as `cells[row][col]`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BoardState {
    cells: [[Cell; EDGE_LENGTH]; EDGE_LENGTH],
}

impl Default for BoardState {
    /// Gets the standard opening position.
    fn default() -> Self {
        Self::standard_opening()
    }
}

impl BoardState {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; EDGE_LENGTH]; EDGE_LENGTH],
        }
    }

    /// The four-piece starting position: Player 2 on D4 and E5, Player 1 on D5 and E4.
    pub fn standard_opening() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Cell::PlayerTwo;
        board.cells[3][4] = Cell::PlayerOne;
        board.cells[4][3] = Cell::PlayerOne;
        board.cells[4][4] = Cell::PlayerTwo;
        board
    }

    /// Build a board from rows of cells, indexed as `cells[row][col]`.
    pub const fn from_cells(cells: [[Cell; EDGE_LENGTH]; EDGE_LENGTH]) -> Self {
        Self { cells }
    }

    pub fn reset_to_standard_opening(&mut self) {
        *self = Self::standard_opening();
    }

    /// Read the cell at `(col, row)`.
    pub fn get(&self, col: usize, row: usize) -> Result<Cell, OutOfRange> {
        let loc = Location::from_coords(col, row).ok_or(OutOfRange { col, row })?;
        Ok(self.at(loc))
    }

    /// Overwrite the cell at `(col, row)`.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> Result<(), OutOfRange> {
        let loc = Location::from_coords(col, row).ok_or(OutOfRange { col, row })?;
        self.put(loc, cell);
        Ok(())
    }

    /// Read an already-checked location.
    #[inline]
    pub fn at(&self, loc: Location) -> Cell {
        self.cells[loc.row()][loc.col()]
    }

    #[inline]
    pub(crate) fn put(&mut self, loc: Location, cell: Cell) {
        self.cells[loc.row()][loc.col()] = cell;
    }

    /// Count the cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == cell)
            .count()
    }

    /// Count the occupied cells.
    pub fn occupied(&self) -> usize {
        NUM_SPACES - self.count(Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.occupied() >= NUM_SPACES
    }

    /// Iterate over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; EDGE_LENGTH]> {
        self.cells.iter()
    }

    /// Render the board with row and column labels, mapping each cell through `glyph`.
    pub fn render<G: Fn(Cell) -> char>(&self, glyph: G, f: &mut dyn Write) -> fmt::Result {
        write!(f, "   A B C D E F G H")?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "\n {} ", row + 1)?;
            for &cell in cells {
                write!(f, "{} ", glyph(cell))?;
            }
        }
        Ok(())
    }
}

/// The default glyph for each cell.
pub fn default_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::PlayerOne => '#',
        Cell::PlayerTwo => 'O',
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render(default_glyph, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_not() {
        assert_eq!(!Player::One, Player::Two);
        assert_eq!(!Player::Two, Player::One);
        assert_eq!(Player::default(), Player::One);
    }

    #[test]
    fn cell_tags() {
        for cell in [Cell::Empty, Cell::PlayerOne, Cell::PlayerTwo] {
            assert_eq!(Cell::from_tag(cell.tag()), Some(cell));
        }
        assert_eq!(Cell::from_tag(3), None);
        assert_eq!(Cell::from(Player::Two).owner(), Some(Player::Two));
        assert_eq!(Cell::Empty.owner(), None);
    }

    #[test]
    fn standard_opening_layout() {
        let board = BoardState::standard_opening();
        assert_eq!(board.occupied(), 4);
        assert_eq!(board.count(Cell::PlayerOne), 2);
        assert_eq!(board.count(Cell::PlayerTwo), 2);
        assert_eq!(board.get(3, 3), Ok(Cell::PlayerTwo));
        assert_eq!(board.get(4, 4), Ok(Cell::PlayerTwo));
        assert_eq!(board.get(3, 4), Ok(Cell::PlayerOne));
        assert_eq!(board.get(4, 3), Ok(Cell::PlayerOne));
    }

    #[test]
    fn get_set_bounds() {
        let mut board = BoardState::empty();
        assert_eq!(board.get(8, 0), Err(OutOfRange { col: 8, row: 0 }));
        assert_eq!(
            board.set(0, 9, Cell::PlayerOne),
            Err(OutOfRange { col: 0, row: 9 })
        );
        assert_eq!(board.set(7, 0, Cell::PlayerOne), Ok(()));
        assert_eq!(board.get(7, 0), Ok(Cell::PlayerOne));
        assert_eq!(board.get(0, 7), Ok(Cell::Empty));
    }

    #[test]
    fn reset_restores_opening() {
        let mut board = BoardState::empty();
        board.set(0, 0, Cell::PlayerTwo).unwrap();
        board.reset_to_standard_opening();
        assert_eq!(board, BoardState::standard_opening());
    }

    #[test]
    fn display_opening() {
        let expected = "   A B C D E F G H\n \
                        1 . . . . . . . . \n \
                        2 . . . . . . . . \n \
                        3 . . . . . . . . \n \
                        4 . . . O # . . . \n \
                        5 . . . # O . . . \n \
                        6 . . . . . . . . \n \
                        7 . . . . . . . . \n \
                        8 . . . . . . . . ";
        assert_eq!(BoardState::standard_opening().to_string(), expected);
    }
}
