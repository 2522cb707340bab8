//! Implements turn-level Othello logic.
//!
//! [`Game`] owns the board and its metadata exclusively. It is the surface a UI talks to:
//! everything it hands out is a copy, and the board only changes through [`Game::play_turn`],
//! [`Game::load`] and [`Game::reset`].

use crate::{persistence, validator};
use crate::{BoardState, Cell, GameError, Location, LocationSet, OutOfRange, Player};
use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Why a game ended.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum EndReason {
    /// Every cell is occupied.
    PieceExhaustion,
    /// The player due to move next has no legal move.
    NoLegalMoves,
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Won(Player),
    Draw,
}

impl Outcome {
    /// Decide the outcome by piece count alone.
    pub fn from_counts(board: &BoardState) -> Self {
        let one = board.count(Cell::PlayerOne);
        let two = board.count(Cell::PlayerTwo);
        match one.cmp(&two) {
            Ordering::Greater => Outcome::Won(Player::One),
            Ordering::Less => Outcome::Won(Player::Two),
            Ordering::Equal => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(player) => write!(f, "{} wins!", player),
            Outcome::Draw => f.write_str("It's a tie."),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    GameOver { reason: EndReason, outcome: Outcome },
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::GameOver { outcome, .. } => Some(outcome),
        }
    }

    /// The winning player, or None for a draw or an unfinished game.
    pub fn winner(self) -> Option<Player> {
        match self.outcome() {
            Some(Outcome::Won(player)) => Some(player),
            _ => None,
        }
    }
}

/// Evaluate the end-of-game rule after a move, with `upcoming` due to play next.
///
/// The game ends when the board is full or when `upcoming` has no legal move. There is no
/// pass: a player with no move ends the game even if the opponent could still play.
///
/// The move check is made for `upcoming`, not for the player who just moved. A position where
/// only the mover has moves left is therefore over.
pub fn evaluate_status(board: &BoardState, upcoming: Player) -> GameStatus {
    let reason = if board.is_full() {
        EndReason::PieceExhaustion
    } else if !validator::has_any_legal_move(board, upcoming) {
        EndReason::NoLegalMoves
    } else {
        return GameStatus::InProgress;
    };

    GameStatus::GameOver {
        reason,
        outcome: Outcome::from_counts(board),
    }
}

/// Everything about a game besides the grid itself.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Metadata {
    /// Number of moves applied so far. Not used by any rule.
    pub turns: u32,
    pub active_player: Player,
    pub status: GameStatus,
}

/// A single game of Othello.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Game {
    board: BoardState,
    meta: Metadata,
}

impl Game {
    /// Start a new game from the standard opening.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a game from an explicit board and metadata.
    pub fn from_parts(board: BoardState, meta: Metadata) -> Self {
        Self { board, meta }
    }

    /// Throw away the current game and start over from the standard opening.
    pub fn reset(&mut self) {
        self.board.reset_to_standard_opening();
        self.meta = Metadata::default();
        info!("game reset");
    }

    /// Play a piece for the active player at `(col, row)`.
    ///
    /// Returns false, leaving the game untouched, if the game is over, the coordinates are off
    /// the board, or the move captures nothing.
    pub fn play_turn(&mut self, col: usize, row: usize) -> bool {
        match Location::from_coords(col, row) {
            Some(loc) => self.play_at(loc),
            None => false,
        }
    }

    /// Play a piece for the active player at `loc`. See [`Game::play_turn`].
    pub fn play_at(&mut self, loc: Location) -> bool {
        if self.meta.status.is_over() {
            return false;
        }

        let player = self.meta.active_player;
        let captured = validator::captures_at(&self.board, loc, player);
        if captured.is_empty() {
            return false;
        }

        let piece = Cell::from(player);
        self.board.put(loc, piece);
        for flipped in captured {
            self.board.put(flipped, piece);
        }
        self.meta.turns = self.meta.turns.saturating_add(1);
        debug!(%player, location = %loc, captured = captured.len(), "applied move");

        self.meta.status = evaluate_status(&self.board, !player);
        match self.meta.status {
            GameStatus::InProgress => self.meta.active_player = !player,
            GameStatus::GameOver { reason, outcome } => {
                info!(?reason, %outcome, turns = self.meta.turns, "game over")
            }
        }

        true
    }

    /// Read the cell at `(col, row)`.
    pub fn cell(&self, col: usize, row: usize) -> Result<Cell, OutOfRange> {
        self.board.get(col, row)
    }

    #[inline]
    pub fn active_player(&self) -> Player {
        self.meta.active_player
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.meta.status
    }

    #[inline]
    pub fn turns(&self) -> u32 {
        self.meta.turns
    }

    /// A copy of the board.
    #[inline]
    pub fn board(&self) -> BoardState {
        self.board
    }

    /// A copy of the metadata.
    #[inline]
    pub fn metadata(&self) -> Metadata {
        self.meta
    }

    /// Number of pieces `player` has on the board.
    pub fn piece_count(&self, player: Player) -> usize {
        self.board.count(Cell::from(player))
    }

    pub fn has_any_legal_move(&self, player: Player) -> bool {
        validator::has_any_legal_move(&self.board, player)
    }

    /// Legal moves for the active player. Empty once the game is over.
    pub fn legal_moves(&self) -> LocationSet {
        if self.meta.status.is_over() {
            return LocationSet::EMPTY;
        }
        validator::legal_moves(&self.board, self.meta.active_player)
    }

    /// Write the game to `path` in the plain-text save format.
    ///
    /// The save goes to a temporary file next to `path` first and is renamed over it once fully
    /// written, so a failed save never leaves a truncated file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GameError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            persistence::write_state(&mut writer, &self.board, &self.meta)?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|err| err.error)?;
        info!(path = %path.display(), turns = self.meta.turns, "saved game");
        Ok(())
    }

    /// Replace this game with the one saved at `path`.
    ///
    /// On any error the current game is left exactly as it was.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GameError> {
        let path = path.as_ref();
        let loaded = File::open(path)
            .map_err(GameError::from)
            .and_then(|file| persistence::read_state(BufReader::new(file)));

        match loaded {
            Ok((board, meta)) => {
                self.board = board;
                self.meta = meta;
                info!(path = %path.display(), turns = meta.turns, "loaded game");
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "rejected save file");
                Err(err)
            }
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.meta.status {
            GameStatus::InProgress => write!(f, "{}'s turn", self.meta.active_player),
            GameStatus::GameOver { outcome, .. } => write!(f, "{}", outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn board_from(pieces: &[(&str, Cell)]) -> BoardState {
        let mut board = BoardState::empty();
        for &(name, cell) in pieces {
            board.put(Location::from_str(name).unwrap(), cell);
        }
        board
    }

    #[test]
    fn new_game_state() {
        let game = Game::new();
        assert_eq!(game.active_player(), Player::One);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.turns(), 0);
        assert_eq!(game.piece_count(Player::One), 2);
        assert_eq!(game.piece_count(Player::Two), 2);
    }

    #[test]
    fn first_move_flips_one_piece() {
        let mut game = Game::new();
        assert!(game.play_turn(2, 3));
        assert_eq!(game.cell(2, 3), Ok(Cell::PlayerOne));
        assert_eq!(game.cell(3, 3), Ok(Cell::PlayerOne));
        assert_eq!(game.piece_count(Player::One), 4);
        assert_eq!(game.piece_count(Player::Two), 1);
        assert_eq!(game.active_player(), Player::Two);
        assert_eq!(game.turns(), 1);
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut game = Game::new();
        let before = game;

        assert!(!game.play_turn(0, 0));
        assert!(!game.play_turn(3, 3));
        assert!(!game.play_turn(8, 2));
        assert!(!game.play_turn(2, usize::MAX));
        assert_eq!(game, before);
    }

    #[test]
    fn cell_out_of_range() {
        let game = Game::new();
        assert_eq!(game.cell(0, 8), Err(OutOfRange { col: 0, row: 8 }));
    }

    #[test]
    fn piece_counts_follow_captures() {
        let mut game = Game::new();

        while !game.status().is_over() {
            let mover = game.active_player();
            let loc = game.legal_moves().next().expect("in-progress game has a move");
            let captured = validator::captures_at(&game.board(), loc, mover).len();
            let (mine, theirs, total) = (
                game.piece_count(mover),
                game.piece_count(!mover),
                game.board().occupied(),
            );

            assert!(game.play_at(loc));
            assert_eq!(game.piece_count(mover), mine + 1 + captured);
            assert_eq!(game.piece_count(!mover), theirs - captured);
            assert_eq!(game.board().occupied(), total + 1);
        }

        assert!(game.turns() <= 60);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn game_ends_when_next_player_cannot_move() {
        // Player two's only piece is pinned against the edge by A1.
        let board = board_from(&[
            ("A1", Cell::PlayerOne),
            ("B1", Cell::PlayerTwo),
            ("G8", Cell::PlayerTwo),
            ("H8", Cell::PlayerOne),
        ]);
        let mut game = Game::from_parts(board, Metadata::default());

        assert!(game.play_turn(5, 7));
        assert_eq!(
            game.status(),
            GameStatus::GameOver {
                reason: EndReason::NoLegalMoves,
                outcome: Outcome::Won(Player::One),
            }
        );
        // No pass: player one could still play C1, but the game is over.
        assert!(game.has_any_legal_move(Player::One));
        assert!(!game.has_any_legal_move(Player::Two));
        assert_eq!(game.active_player(), Player::One);
        assert!(!game.play_turn(2, 0));
    }

    #[test]
    fn draw_on_equal_counts() {
        let board = board_from(&[
            ("A1", Cell::PlayerOne),
            ("B1", Cell::PlayerTwo),
            ("F8", Cell::PlayerTwo),
            ("G8", Cell::PlayerTwo),
            ("H8", Cell::PlayerTwo),
        ]);
        let mut game = Game::from_parts(board, Metadata::default());

        assert!(game.play_turn(2, 0));
        assert_eq!(game.piece_count(Player::One), 3);
        assert_eq!(game.piece_count(Player::Two), 3);
        assert_eq!(game.status().outcome(), Some(Outcome::Draw));
        assert_eq!(game.status().winner(), None);
    }

    #[test]
    fn full_board_is_scored_by_count() {
        let mut board = BoardState::empty();
        for loc in Location::all() {
            board.put(loc, Cell::PlayerTwo);
        }
        board.put(Location::from_str("A1").unwrap(), Cell::Empty);
        board.put(Location::from_str("C1").unwrap(), Cell::PlayerOne);
        let mut game = Game::from_parts(board, Metadata::default());

        assert!(game.play_turn(0, 0));
        assert!(game.board().is_full());
        assert_eq!(
            game.status(),
            GameStatus::GameOver {
                reason: EndReason::PieceExhaustion,
                outcome: Outcome::Won(Player::Two),
            }
        );
    }

    #[test]
    fn reset_after_game_over() {
        let board = board_from(&[("A1", Cell::PlayerOne), ("B1", Cell::PlayerTwo)]);
        let mut game = Game::from_parts(board, Metadata::default());
        assert!(game.play_turn(2, 0));
        assert!(game.status().is_over());

        game.reset();
        assert_eq!(game, Game::new());
        assert!(game.play_turn(2, 3));
    }

    #[test]
    fn display_shows_status() {
        let mut game = Game::new();
        assert!(game.to_string().ends_with("Player 1's turn"));
        game.play_turn(2, 3);
        assert!(game.to_string().ends_with("Player 2's turn"));
    }
}
