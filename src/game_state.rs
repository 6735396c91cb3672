use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    board::Board,
    castling_right::CastlingRight,
    check::is_in_check,
    color::Color,
    coord::{Coord, Vector, home_rank, pawn_home_rank, pawn_promotion_rank},
    fen::Fen,
    movement::Move,
    piece::{Piece, PieceKind},
    special_move::{
        castling_rook_move, castling_side, en_passant_capture, en_passant_target_after,
        is_promotion,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidPosition {
    MissingKing(Color),
    ExceededKings(Color),
    PawnOnBackRank,
    InvalidCastlingRight,
    InvalidEnPassantTarget,
    NonPlayerInCheck,
}
impl Display for InvalidPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPosition::MissingKing(color) => write!(f, "no {color} king found")?,
            InvalidPosition::ExceededKings(color) => write!(f, "found more than 1 {color} kings")?,
            InvalidPosition::PawnOnBackRank => write!(f, "found a pawn on the first or last rank")?,
            InvalidPosition::InvalidCastlingRight => write!(f, "invalid castling right")?,
            InvalidPosition::InvalidEnPassantTarget => write!(f, "invalid en passant target")?,
            InvalidPosition::NonPlayerInCheck => write!(f, "non-player in check")?,
        }
        Ok(())
    }
}
impl Error for InvalidPosition {}

/// Everything needed to judge and apply the next move.
///
/// This is the single mutable root of a game. Simulations work on copies, so
/// the live state only changes through [`GameState::move_piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling_right: CastlingRight,
    en_passant_target: Option<Coord>,
    king_positions: [Coord; 2],
}
impl GameState {
    #[must_use]
    pub fn starting_position() -> Self {
        GameState {
            board: Board::starting_position(),
            side_to_move: Color::White,
            castling_right: CastlingRight::all(),
            en_passant_target: None,
            king_positions: [Coord::new(4, 7), Coord::new(4, 0)],
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling_right(&self) -> CastlingRight {
        self.castling_right
    }
    pub fn en_passant_target(&self) -> Option<Coord> {
        self.en_passant_target
    }
    pub fn king_position(&self, color: Color) -> Coord {
        self.king_positions[color.index()]
    }
    /// A copy where `color` is on the move. Used to ask "could this side
    /// move?" on behalf of the side that is waiting.
    #[must_use]
    pub fn with_side_to_move(mut self, color: Color) -> Self {
        if self.side_to_move != color {
            self.side_to_move = color;
            self.en_passant_target = None;
        }
        self
    }
    /// Applies `movement` without checking its legality and returns the
    /// captured piece, if any.
    ///
    /// Handles castling (king moving two files), en passant, promotion
    /// (defaulting to a queen), castling rights bookkeeping and the king
    /// position cache.
    pub fn move_piece(&mut self, movement: Move) -> Option<Piece> {
        let Move {
            origin,
            destination,
            promotion,
        } = movement;
        let piece = self.board[origin]?;
        let en_passant = en_passant_capture(self, piece, origin, destination);
        let castling = (piece.kind == PieceKind::King)
            .then(|| castling_side(piece.color, origin, destination))
            .flatten();

        let mut captured = self.board.relocate(origin, destination);
        if let Some(position) = en_passant {
            captured = self.board[position].take();
        }
        if let Some(side) = castling {
            let (rook_origin, rook_destination) = castling_rook_move(piece.color, side);
            self.board.relocate(rook_origin, rook_destination);
        }
        if is_promotion(piece, destination.y()) {
            let kind = promotion
                .filter(|kind| kind.is_promotion_choice())
                .unwrap_or(PieceKind::Queen);
            self.board[destination] = Some(Piece::new(piece.color, kind));
        }

        if piece.kind == PieceKind::King {
            self.king_positions[piece.color.index()] = destination;
            self.castling_right.clear(piece.color);
        }
        for position in [origin, destination] {
            for color in Color::ALL {
                if position.y() == home_rank(color) {
                    self.castling_right.remove_for_rook(color, position.x());
                }
            }
        }
        self.en_passant_target = en_passant_target_after(piece, origin, destination);
        self.side_to_move = !self.side_to_move;

        if cfg!(debug_assertions) {
            for color in Color::ALL {
                debug_assert_eq!(self.board.find_king(color), Some(self.king_position(color)));
            }
        }
        captured
    }
    #[must_use]
    pub fn clone_and_move(&self, movement: Move) -> Self {
        let mut new = *self;
        new.move_piece(movement);
        new
    }
    fn validate(&self) -> Result<(), InvalidPosition> {
        for color in Color::ALL {
            let mut kings = self
                .board
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King);
            if kings.next().is_none() {
                return Err(InvalidPosition::MissingKing(color));
            }
            if kings.next().is_some() {
                return Err(InvalidPosition::ExceededKings(color));
            }
        }
        if self.board.pieces().any(|(position, piece)| {
            piece.kind == PieceKind::Pawn
                && Color::ALL
                    .into_iter()
                    .any(|color| position.y() == pawn_promotion_rank(color))
        }) {
            return Err(InvalidPosition::PawnOnBackRank);
        }
        for color in Color::ALL {
            let rank = home_rank(color);
            for side in self.castling_right.sides(color) {
                let king = self.board[Coord::new(4, rank)];
                let rook = self.board[Coord::new(side.rook_origin_x(), rank)];
                if king != Some(Piece::new(color, PieceKind::King))
                    || rook != Some(Piece::new(color, PieceKind::Rook))
                {
                    return Err(InvalidPosition::InvalidCastlingRight);
                }
            }
        }
        if let Some(target) = self.en_passant_target {
            let pusher = !self.side_to_move;
            let single = Vector::pawn_single_move(pusher);
            let pawn = target.move_by(single);
            let origin = target.move_by(-single);
            let valid = self.board[target].is_none()
                && origin.is_some_and(|origin| {
                    self.board[origin].is_none() && origin.y() == pawn_home_rank(pusher)
                })
                && pawn.is_some_and(|pawn| {
                    self.board[pawn] == Some(Piece::new(pusher, PieceKind::Pawn))
                });
            if !valid {
                return Err(InvalidPosition::InvalidEnPassantTarget);
            }
        }
        if is_in_check(self, !self.side_to_move) {
            return Err(InvalidPosition::NonPlayerInCheck);
        }
        Ok(())
    }
}
impl Default for GameState {
    fn default() -> Self {
        GameState::starting_position()
    }
}
impl TryFrom<Fen> for GameState {
    type Error = InvalidPosition;

    fn try_from(value: Fen) -> Result<Self, Self::Error> {
        let king = |color| {
            value
                .board
                .find_king(color)
                .ok_or(InvalidPosition::MissingKing(color))
        };
        let state = GameState {
            board: value.board,
            side_to_move: value.side_to_move,
            castling_right: value.castling_right,
            en_passant_target: value.en_passant_target,
            king_positions: [king(Color::White)?, king(Color::Black)?],
        };
        state.validate()?;
        Ok(state)
    }
}
impl From<GameState> for Fen {
    fn from(value: GameState) -> Self {
        Fen {
            board: value.board,
            side_to_move: value.side_to_move,
            castling_right: value.castling_right,
            en_passant_target: value.en_passant_target,
            half_move: 0,
            full_move: 1,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::CastlingSide,
        color::Color,
        fen::Fen,
        game_state::{GameState, InvalidPosition},
        movement::Move,
        piece::{Piece, PieceKind},
    };

    fn state(fen: &str) -> GameState {
        fen.parse::<Fen>().unwrap().try_into().unwrap()
    }
    fn play(state: &mut GameState, moves: &[&str]) {
        for movement in moves {
            state.move_piece(movement.parse().unwrap());
        }
    }

    #[test]
    fn double_push_sets_and_next_move_clears_en_passant_target() {
        let mut state = GameState::starting_position();
        play(&mut state, &["e2e4"]);
        assert_eq!(state.en_passant_target(), Some(coord!("e3")));
        play(&mut state, &["g8f6"]);
        assert_eq!(state.en_passant_target(), None);
    }
    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let mut state = GameState::starting_position();
        play(&mut state, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(state.en_passant_target(), Some(coord!("d6")));
        let captured = state.move_piece(Move::new(coord!("e5"), coord!("d6")));
        assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(state.board()[coord!("d5")], None);
        assert_eq!(
            state.board()[coord!("d6")],
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }
    #[test]
    fn castling_moves_rook_and_clears_both_rights() {
        let mut state = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        state.move_piece(Move::new(coord!("e1"), coord!("g1")));
        assert_eq!(
            state.board()[coord!("f1")],
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(state.board()[coord!("h1")], None);
        assert_eq!(state.king_position(Color::White), coord!("g1"));
        assert!(!state.castling_right().get(Color::White, CastlingSide::King));
        assert!(!state.castling_right().get(Color::White, CastlingSide::Queen));
        assert!(state.castling_right().get(Color::Black, CastlingSide::Queen));
    }
    #[test]
    fn queen_side_castling_moves_rook_past_king() {
        let mut state = state("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        state.move_piece(Move::new(coord!("e8"), coord!("c8")));
        assert_eq!(
            state.board()[coord!("d8")],
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(state.board()[coord!("a8")], None);
        assert_eq!(state.board()[coord!("e8")], None);
        assert_eq!(state.king_position(Color::Black), coord!("c8"));
        assert_eq!(state.castling_right().to_string(), "KQ");

        state.move_piece(Move::new(coord!("e1"), coord!("c1")));
        assert_eq!(
            state.board()[coord!("d1")],
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(state.board()[coord!("a1")], None);
        assert_eq!(state.king_position(Color::White), coord!("c1"));
        assert_eq!(state.castling_right().to_string(), "-");
    }
    #[test]
    fn rook_moves_and_captures_drop_rights() {
        let mut state = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        play(&mut state, &["a1a8"]);
        assert_eq!(state.castling_right().to_string(), "Kk");
        play(&mut state, &["h8h1"]);
        assert_eq!(state.castling_right().to_string(), "-");
    }
    #[test]
    fn promotion_defaults_to_queen() {
        let mut state = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        state.move_piece(Move::new(coord!("a7"), coord!("a8")));
        assert_eq!(
            state.board()[coord!("a8")],
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
    }
    #[test]
    fn promotion_honors_choice() {
        let mut state = state("4k3/8/8/8/8/8/7p/4K3 b - - 0 1");
        let movement = Move::new(coord!("h2"), coord!("h1")).with_promotion(PieceKind::Knight);
        state.move_piece(movement);
        assert_eq!(
            state.board()[coord!("h1")],
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
    }
    #[test]
    fn simulation_leaves_live_state_untouched() {
        let mut state = GameState::starting_position();
        play(&mut state, &["e2e4", "d7d5"]);
        let before = state;
        let moved = state.clone_and_move(Move::new(coord!("e4"), coord!("d5")));
        assert_ne!(moved.board(), before.board());
        assert_eq!(state, before);
    }
    #[test]
    fn rejects_inconsistent_positions() {
        let parse = |fen: &str| GameState::try_from(fen.parse::<Fen>().unwrap());
        assert_eq!(
            parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(InvalidPosition::MissingKing(Color::Black))
        );
        assert_eq!(
            parse("4k3/8/8/8/8/8/8/4K2K w - - 0 1"),
            Err(InvalidPosition::ExceededKings(Color::White))
        );
        assert_eq!(
            parse("4k3/8/8/8/8/8/8/4K3 w K - 0 1"),
            Err(InvalidPosition::InvalidCastlingRight)
        );
        assert_eq!(
            parse("4k3/8/8/8/8/8/8/4K3 w - e6 0 1"),
            Err(InvalidPosition::InvalidEnPassantTarget)
        );
        assert_eq!(
            parse("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(InvalidPosition::NonPlayerInCheck)
        );
        assert_eq!(
            parse("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(InvalidPosition::PawnOnBackRank)
        );
    }
}
