//! The plain-text save format.
//!
//! A save is exactly 11 lines: 8 board rows of cell tags (0 empty, 1 player one, 2 player two),
//! each tag followed by one space, then the turn counter, then `true`/`false` for "player one to
//! move", then `true`/`false` for "game over". There is no header or version field.
//!
//! Reading is strict and all-or-nothing. Tokens must be written exactly as the writer writes
//! them; the only slack is an optional final space on a row, `\r\n` line endings and empty
//! lines after the last field. A [`FormatError`] names the first offending line.

use crate::game::{EndReason, GameStatus, Metadata, Outcome};
use crate::{BoardState, Cell, FormatError, FormatErrorKind, GameError, Player};
use crate::EDGE_LENGTH;
use std::io::{self, Read, Write};

/// Render a board and its metadata in the save format, including the final newline.
pub fn to_string(board: &BoardState, meta: &Metadata) -> String {
    let mut out = String::new();
    for row in board.rows() {
        for cell in row {
            out.push_str(&format!("{} ", cell.tag()));
        }
        out.push('\n');
    }
    out.push_str(&format!("{}\n", meta.turns));
    out.push_str(&format!("{}\n", meta.active_player == Player::One));
    out.push_str(&format!("{}\n", meta.status.is_over()));
    out
}

/// Write a board and its metadata to `writer` in the save format.
pub fn write_state<W: Write>(
    writer: &mut W,
    board: &BoardState,
    meta: &Metadata,
) -> io::Result<()> {
    writer.write_all(to_string(board, meta).as_bytes())
}

/// Read a complete save from `reader`.
///
/// Only a failed read is an I/O error. Bytes that are not UTF-8 are a [`FormatError`] on the
/// line holding the first bad byte.
pub fn read_state<R: Read>(mut reader: R) -> Result<(BoardState, Metadata), GameError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let contents = std::str::from_utf8(&bytes).map_err(|err| {
        let newlines = bytes[..err.valid_up_to()].iter().filter(|&&b| b == b'\n').count();
        FormatError {
            line: newlines + 1,
            kind: FormatErrorKind::BadToken,
        }
    })?;
    Ok(parse_state(contents)?)
}

/// A lone tag digit.
fn cell_token(token: &str) -> Option<Cell> {
    match token.as_bytes() {
        [digit @ b'0'..=b'9'] => Cell::from_tag(digit - b'0'),
        _ => None,
    }
}

/// Plain decimal digits, no sign, no leading zero.
fn counter_token(token: &str) -> Option<u32> {
    let canonical = match token.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if canonical {
        token.parse().ok()
    } else {
        None
    }
}

/// Walks the input one numbered line at a time.
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line: 0,
        }
    }

    fn error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError {
            line: self.line,
            kind,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, FormatError> {
        self.line += 1;
        self.lines
            .next()
            .ok_or_else(|| self.error(FormatErrorKind::MissingLine))
    }

    /// The single-space separated tokens of the next line, which must number exactly `expected`.
    fn tokens(&mut self, expected: usize) -> Result<Vec<&'a str>, FormatError> {
        let line = self.next_line()?;
        let line = line.strip_suffix(' ').unwrap_or(line);

        let tokens: Vec<&str> = line.split(' ').collect();
        if tokens.len() != expected {
            return Err(self.error(FormatErrorKind::WrongTokenCount {
                expected,
                found: tokens.len(),
            }));
        }
        Ok(tokens)
    }

    /// The next line, taken whole as one token.
    fn single(&mut self) -> Result<&'a str, FormatError> {
        self.next_line()
    }

    fn flag(&mut self) -> Result<bool, FormatError> {
        match self.single()? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.error(FormatErrorKind::BadToken)),
        }
    }

    /// Anything left over must be empty lines.
    fn finish(mut self) -> Result<(), FormatError> {
        while let Some(line) = self.lines.next() {
            self.line += 1;
            if !line.is_empty() {
                return Err(self.error(FormatErrorKind::TrailingData));
            }
        }
        Ok(())
    }
}

/// Parse a complete save.
pub fn parse_state(input: &str) -> Result<(BoardState, Metadata), FormatError> {
    let mut reader = LineReader::new(input);
    let mut cells = [[Cell::Empty; EDGE_LENGTH]; EDGE_LENGTH];

    for row in cells.iter_mut() {
        let tokens = reader.tokens(EDGE_LENGTH)?;
        for (slot, token) in row.iter_mut().zip(tokens) {
            *slot = cell_token(token).ok_or_else(|| reader.error(FormatErrorKind::BadToken))?;
        }
    }
    let board = BoardState::from_cells(cells);

    let turns =
        counter_token(reader.single()?).ok_or_else(|| reader.error(FormatErrorKind::BadToken))?;
    let active_player = if reader.flag()? {
        Player::One
    } else {
        Player::Two
    };
    let game_over = reader.flag()?;
    reader.finish()?;

    let status = if game_over {
        GameStatus::GameOver {
            reason: if board.is_full() {
                EndReason::PieceExhaustion
            } else {
                EndReason::NoLegalMoves
            },
            outcome: Outcome::from_counts(&board),
        }
    } else {
        GameStatus::InProgress
    };

    Ok((
        board,
        Metadata {
            turns,
            active_player,
            status,
        },
    ))
}
