//! A line-oriented terminal front end for the engine.
//!
//! The console only talks to the engine through [`Game`]'s public operations and redraws
//! everything from queries after each command.

use crate::config::AppConfig;
use derive_more::{Display, Error};
use othello_engine::{Game, GameError, GameStatus, Location, Player};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const HELP: &str = "\
Commands:
  <move>         place a piece, e.g. d3
  moves          list the legal moves
  save [path]    save the game
  load [path]    load a saved game
  reset          start a new game
  help           show this message
  quit           leave";

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Location),
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Reset,
    Moves,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseCommandError {
    #[display(fmt = "empty command")]
    Empty,
    #[display(fmt = "unrecognized command '{}' (type 'help')", input)]
    Unknown { input: String },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ParseCommandError::Unknown {
            input: s.trim().to_string(),
        };

        let line = s.trim();
        if line.is_empty() {
            return Err(ParseCommandError::Empty);
        }
        // Everything after the command word is a single argument.
        let (head, arg) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, Some(PathBuf::from(rest.trim_start()))),
            None => (line, None),
        };

        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("save", path) => Command::Save(path),
            ("load", path) => Command::Load(path),
            ("reset", None) => Command::Reset,
            ("moves", None) => Command::Moves,
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            (_, None) => Command::Play(head.parse().map_err(|_| unknown())?),
            (_, Some(_)) => return Err(unknown()),
        };
        Ok(command)
    }
}

/// Whether the input loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    game: Game,
    config: AppConfig,
}

impl Console {
    pub fn new(config: AppConfig) -> Self {
        Self::with_game(Game::new(), config)
    }

    pub fn with_game(game: Game, config: AppConfig) -> Self {
        Self { game, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Replace the current game with a saved one.
    pub fn load_game(&mut self, path: &Path) -> Result<(), GameError> {
        self.game.load(path)
    }

    fn status_line(&self) -> String {
        match self.game.status() {
            GameStatus::InProgress => format!("{}'s turn", self.game.active_player()),
            GameStatus::GameOver { outcome, .. } => outcome.to_string(),
        }
    }

    /// Draw the board, piece counts and status.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let glyphs = self.config.glyphs;
        let mut grid = String::new();
        self.game
            .board()
            .render(|cell| glyphs.glyph(cell), &mut grid)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        writeln!(out, "\n{}\n", grid)?;
        writeln!(
            out,
            "{} ({}) pieces: {}",
            Player::One,
            glyphs.player_one,
            self.game.piece_count(Player::One)
        )?;
        writeln!(
            out,
            "{} ({}) pieces: {}",
            Player::Two,
            glyphs.player_two,
            self.game.piece_count(Player::Two)
        )?;
        writeln!(out, "{}", self.status_line())?;

        if self.config.show_hints && !self.game.status().is_over() {
            writeln!(out, "Legal moves: {}", self.game.legal_moves())?;
        }
        Ok(())
    }

    /// Carry out one command, writing any feedback to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "executing command");
        match command {
            Command::Play(loc) => {
                if self.game.play_turn(loc.col(), loc.row()) {
                    self.render(out)?;
                } else if self.game.status().is_over() {
                    writeln!(out, "The game is over. Type 'reset' to play again.")?;
                } else {
                    writeln!(out, "Illegal move: {}", loc)?;
                }
            }
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.config.save_path.clone());
                match self.game.save(&path) {
                    Ok(()) => writeln!(out, "Saved to {}", path.display())?,
                    Err(err) => writeln!(out, "Could not save: {}", err)?,
                }
            }
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| self.config.save_path.clone());
                match self.game.load(&path) {
                    Ok(()) => {
                        writeln!(out, "Loaded {}", path.display())?;
                        self.render(out)?;
                    }
                    Err(err) => writeln!(out, "Could not load: {}", err)?,
                }
            }
            Command::Reset => {
                self.game.reset();
                self.render(out)?;
            }
            Command::Moves => writeln!(out, "Legal moves: {}", self.game.legal_moves())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Read commands from `input` until it ends or the user quits.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        self.render(&mut out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };

            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(ParseCommandError::Empty) => continue,
                Err(err) => writeln!(out, "{}", err)?,
            }
        }

        writeln!(out)?;
        Ok(())
    }
}
