//! Rules engine for two players sharing one board.
//!
//! [`Game`](game::Game) is the entry point: it takes square selections or
//! whole move requests, enforces the movement rules including castling, en
//! passant and promotion, and reports check, checkmate and stalemate.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

#[cfg(test)]
macro_rules! coord {
    ($square:literal) => {
        $square.parse::<$crate::coord::Coord>().unwrap()
    };
}

pub mod board;
pub mod board_display;
pub mod castling_right;
pub mod check;
pub mod color;
pub mod coord;
pub mod error;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod game_state;
mod misc;
pub mod movement;
pub mod piece;
pub mod repl;
pub mod rules;
pub mod special_move;
pub mod status;
