//! A thread-safe handle to a [`Game`].

use crate::{Cell, Game, GameError, GameStatus, OutOfRange, Player};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cloneable handle to one game, shared between threads.
///
/// Moves, loads and resets hold the write lock for their whole duration, so other threads see
/// either the state before or the state after, never a mix. Queries share the read lock.
#[derive(Clone, Debug, Default)]
pub struct SharedGame {
    inner: Arc<RwLock<Game>>,
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        Self {
            inner: Arc::new(RwLock::new(game)),
        }
    }
}

impl SharedGame {
    pub fn new() -> Self {
        Self::default()
    }

    // Game never holds a half-applied mutation, so a poisoned lock still guards a valid state.
    fn read(&self) -> RwLockReadGuard<'_, Game> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Game> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn play_turn(&self, col: usize, row: usize) -> bool {
        self.write().play_turn(col, row)
    }

    pub fn reset(&self) {
        self.write().reset()
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(), GameError> {
        self.write().load(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GameError> {
        self.read().save(path)
    }

    pub fn cell(&self, col: usize, row: usize) -> Result<Cell, OutOfRange> {
        self.read().cell(col, row)
    }

    pub fn active_player(&self) -> Player {
        self.read().active_player()
    }

    pub fn status(&self) -> GameStatus {
        self.read().status()
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.read().piece_count(player)
    }

    pub fn has_any_legal_move(&self, player: Player) -> bool {
        self.read().has_any_legal_move(player)
    }

    /// A consistent copy of the whole game.
    pub fn snapshot(&self) -> Game {
        *self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handles_share_one_game() {
        let game = SharedGame::new();
        let other = game.clone();

        assert!(other.play_turn(2, 3));
        assert_eq!(game.active_player(), Player::Two);
        assert_eq!(game.cell(3, 3), Ok(Cell::PlayerOne));
    }

    #[test]
    fn only_one_thread_wins_a_contested_move() {
        let game = SharedGame::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let game = game.clone();
                thread::spawn(move || game.play_turn(2, 3))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(accepted, 1);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.turns(), 1);
        assert_eq!(snapshot.board().occupied(), 5);
    }

    #[test]
    fn snapshots_are_consistent_during_play() {
        let game = SharedGame::new();
        let writer = {
            let game = game.clone();
            thread::spawn(move || loop {
                let next = game.snapshot().legal_moves().next();
                match next {
                    Some(loc) => {
                        game.play_turn(loc.col(), loc.row());
                    }
                    None => break,
                }
            })
        };

        for _ in 0..100 {
            let snapshot = game.snapshot();
            assert_eq!(snapshot.board().occupied(), 4 + snapshot.turns() as usize);
        }
        writer.join().unwrap();
        assert!(game.status().is_over());
    }
}
