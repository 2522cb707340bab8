//! Move rules as pure functions over a [`BoardState`].
//!
//! Legality and capture computation share one directional walk ([`walk`]), so
//! "is this move legal?" is exactly "does this move capture anything?".

use crate::{BoardState, Cell, Location, LocationSet, Player};

/// The eight compass directions as `(dcol, drow)`, starting south-west and turning clockwise.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
];

/// Walk outward from `origin` in direction `(dc, dr)`, collecting the run of opponent pieces
/// that `player` would capture by playing at `origin`.
///
/// The run only counts if it is closed by one of `player`'s own pieces; if the walk runs off the
/// board or into an empty cell first, or if the adjacent cell is already `player`'s, the result
/// is empty.
pub fn walk(
    board: &BoardState,
    origin: Location,
    (dc, dr): (isize, isize),
    player: Player,
) -> LocationSet {
    let own = Cell::from(player);
    let opponent = Cell::from(!player);
    let mut run = LocationSet::EMPTY;
    let mut cursor = origin.offset(dc, dr);

    while let Some(loc) = cursor {
        match board.at(loc) {
            cell if cell == opponent => run.insert(loc),
            cell if cell == own => return run,
            _ => break,
        }
        cursor = loc.offset(dc, dr);
    }

    LocationSet::EMPTY
}

/// Every cell `player` would capture by playing at `loc`, across all directions.
/// Empty if `loc` is already occupied.
pub fn captures_at(board: &BoardState, loc: Location, player: Player) -> LocationSet {
    if board.at(loc) != Cell::Empty {
        return LocationSet::EMPTY;
    }

    DIRECTIONS
        .iter()
        .fold(LocationSet::EMPTY, |acc, &dir| acc | walk(board, loc, dir, player))
}

/// Every cell `player` would capture by playing at `(col, row)`.
/// Off-board coordinates capture nothing.
pub fn compute_captures(board: &BoardState, col: usize, row: usize, player: Player) -> LocationSet {
    match Location::from_coords(col, row) {
        Some(loc) => captures_at(board, loc, player),
        None => LocationSet::EMPTY,
    }
}

/// Whether `player` may play at `(col, row)`: the cell is empty and captures at least one piece.
pub fn is_legal(board: &BoardState, col: usize, row: usize, player: Player) -> bool {
    !compute_captures(board, col, row, player).is_empty()
}

/// All locations where `player` has a legal move.
pub fn legal_moves(board: &BoardState, player: Player) -> LocationSet {
    Location::all()
        .filter(|&loc| !captures_at(board, loc, player).is_empty())
        .collect()
}

/// Whether `player` has any legal move on the board.
pub fn has_any_legal_move(board: &BoardState, player: Player) -> bool {
    Location::all().any(|loc| !captures_at(board, loc, player).is_empty())
}
