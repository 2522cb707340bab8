//! "Perft" move-tree test: count the positions reachable in exactly `depth` moves.
//! Useful for checking move generation against published Othello counts.
//! See: http://www.aartbik.com/MISC/reversi.html
//!
//! A finished game counts as a single leaf. This engine has no pass move, so the counts only
//! match the published ones up to depth 8, before the first pass can occur.

use crate::Game;

pub fn run_perft(depth: u32) -> u64 {
    leaves_below(Game::new(), depth)
}

fn leaves_below(game: Game, depth: u32) -> u64 {
    if depth == 0 || game.status().is_over() {
        return 1;
    }

    game.legal_moves()
        .map(|loc| {
            let mut next = game;
            next.play_at(loc);
            leaves_below(next, depth - 1)
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}
