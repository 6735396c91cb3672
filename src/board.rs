use std::ops::{Index, IndexMut};

use crate::{
    color::Color,
    coord::Coord,
    piece::{Piece, PieceKind},
};

/// The 8×8 grid of pieces, indexed by [`Coord`].
///
/// The board knows nothing about turns or special moves; see
/// [`GameState`](crate::game_state::GameState) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([[Option<Piece>; 8]; 8]);

impl Board {
    #[must_use]
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }
    #[must_use]
    pub fn starting_position() -> Self {
        let back_rank = |color| {
            PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(color, kind)))
        };
        let pawns = |color| [Some(Piece::new(color, PieceKind::Pawn)); 8];
        Board([
            back_rank(Color::Black),
            pawns(Color::Black),
            [None; 8],
            [None; 8],
            [None; 8],
            [None; 8],
            pawns(Color::White),
            back_rank(Color::White),
        ])
    }
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.0
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> {
        Coord::all().filter_map(|position| self[position].map(|piece| (position, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    /// Scans for the king of `color`. Prefer the cached
    /// [`GameState::king_position`](crate::game_state::GameState::king_position)
    /// once a state exists.
    pub fn find_king(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }
    pub fn is_occupied_by(&self, position: Coord, color: Color) -> bool {
        self[position].is_some_and(|piece| piece.color == color)
    }
    /// Moves whatever stands on `origin` to `destination` and returns what was
    /// captured there.
    pub fn relocate(&mut self, origin: Coord, destination: Coord) -> Option<Piece> {
        let piece = self[origin].take();
        std::mem::replace(&mut self[destination], piece)
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.0[index.y() as usize][index.x() as usize]
    }
}
impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.0[index.y() as usize][index.x() as usize]
    }
}
