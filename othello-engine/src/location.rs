//! Code for working with [`Location`]s on the Othello board.

use crate::{EDGE_LENGTH, NUM_SPACES};
use derive_more::{BitOr, BitOrAssign, From, Into};
use std::fmt::{self, Display, Formatter, Write};

/// A checked (column, row) location on the board.
/// Both coordinates are always in `0..EDGE_LENGTH`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Location {
    // Row first so the derived ordering is row-major.
    row: u8,
    col: u8,
}

/// A set of locations on the board, one bit per cell in row-major order.
/// Iterating yields the locations in row-major order.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, From, Into, BitOr, BitOrAssign,
)]
pub struct LocationSet(u64);

impl Location {
    /// Build a location from column and row coordinates.
    /// Returns None if either coordinate is off the board.
    pub fn from_coords(col: usize, row: usize) -> Option<Self> {
        if col < EDGE_LENGTH && row < EDGE_LENGTH {
            Some(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// Convert from a row-major square index.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SPACES {
            Self::from_coords(index % EDGE_LENGTH, index / EDGE_LENGTH)
        } else {
            None
        }
    }

    /// Convert into a row-major square index.
    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * EDGE_LENGTH + self.col as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Step one cell by `(dc, dr)`. Returns None when stepping off the board.
    pub fn offset(self, dc: isize, dr: isize) -> Option<Self> {
        let col = self.col as isize + dc;
        let row = self.row as isize + dr;
        if col < 0 || row < 0 {
            return None;
        }
        Self::from_coords(col as usize, row as usize)
    }

    /// Iterate over every location on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..NUM_SPACES).filter_map(Self::from_index)
    }
}

/// Convert this [`Location`] into string notation ("C4": column C, row 4).
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let col_str = "ABCDEFGH".chars().nth(self.col()).ok_or(fmt::Error)?;
        let row_str = "12345678".chars().nth(self.row()).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseLocationError;

impl Display for ParseLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid location string")
    }
}

impl std::error::Error for ParseLocationError {}

/// Build a [`Location`] from a 1-indexed string notation ("A4").
/// The column letter is case-insensitive.
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_str).ok_or(ParseLocationError)?;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if row == 0 || chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Self::from_coords(col, row - 1).ok_or(ParseLocationError)
    }
}

impl LocationSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn insert(&mut self, loc: Location) {
        self.0 |= 1 << loc.to_index();
    }

    /// Returns whether `loc` is in this set.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        self.0 & (1 << loc.to_index()) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Location> for LocationSet {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for loc in iter {
            set.insert(loc);
        }
        set
    }
}

impl ExactSizeIterator for LocationSet {
    fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Iterator for LocationSet {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.is_empty() {
            return None;
        }

        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Location::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl Display for LocationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|loc| loc.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_from_coords() {
        let loc = Location::from_coords(2, 3).unwrap();
        assert_eq!((loc.col(), loc.row()), (2, 3));
        assert_eq!(Location::from_coords(8, 0), None);
        assert_eq!(Location::from_coords(0, 8), None);
    }

    #[test]
    fn location_index() {
        assert_eq!(Location::from_coords(0, 0).unwrap().to_index(), 0);
        assert_eq!(Location::from_coords(7, 7).unwrap().to_index(), 63);
        assert_eq!(Location::from_coords(2, 3).unwrap().to_index(), 26);
        assert_eq!(Location::from_index(26), Location::from_coords(2, 3));
        assert_eq!(Location::from_index(64), None);
    }

    #[test]
    fn location_offset() {
        let corner = Location::from_coords(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Location::from_coords(1, 1));

        let edge = Location::from_coords(7, 4).unwrap();
        assert_eq!(edge.offset(1, 0), None);
        assert_eq!(edge.offset(-1, 1), Location::from_coords(6, 5));
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(Location::from_str("A1"), Ok(Location::from_coords(0, 0).unwrap()));
        assert_eq!(Location::from_str("h8"), Ok(Location::from_coords(7, 7).unwrap()));
        assert_eq!(Location::from_str("C4"), Ok(Location::from_coords(2, 3).unwrap()));
    }

    #[test]
    fn location_from_str_fail() {
        assert_eq!(Location::from_str(""), Err(ParseLocationError));
        assert_eq!(Location::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Location::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Location::from_str("I5"), Err(ParseLocationError));
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location::from_coords(0, 0).unwrap().to_string(), "A1");
        assert_eq!(Location::from_coords(7, 7).unwrap().to_string(), "H8");
        assert_eq!(Location::from_str("F6").unwrap().to_string(), "F6");
    }

    #[test]
    fn location_set_iterates_row_major() {
        let set: LocationSet = ["E3", "C4", "D3"]
            .iter()
            .map(|s| Location::from_str(s).unwrap())
            .collect();

        assert_eq!(set.len(), 3);
        assert!(set.contains(Location::from_str("C4").unwrap()));
        assert!(!set.contains(Location::from_str("C5").unwrap()));
        assert_eq!(set.to_string(), "[D3, E3, C4]");
    }

    #[test]
    fn location_set_union() {
        let mut a: LocationSet = Location::from_coords(0, 0).into_iter().collect();
        let b: LocationSet = Location::from_coords(7, 7).into_iter().collect();
        a |= b;
        assert_eq!(a.len(), 2);
        assert!((LocationSet::EMPTY | b).contains(Location::from_coords(7, 7).unwrap()));
    }
}
