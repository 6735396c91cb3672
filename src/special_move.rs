use crate::{
    castling_right::CastlingSide,
    check::is_attacked,
    color::Color,
    coord::{Coord, Vector, home_rank, pawn_promotion_rank},
    error::MoveError,
    game_state::GameState,
    piece::{Piece, PieceKind},
};

fn king_origin(color: Color) -> Coord {
    Coord::new(4, home_rank(color))
}
/// The castling side a king move from `origin` to `destination` asks for,
/// judging by shape alone: two files along the home rank from the king's
/// original square.
pub fn castling_side(color: Color, origin: Coord, destination: Coord) -> Option<CastlingSide> {
    if origin != king_origin(color) || destination.y() != origin.y() {
        return None;
    }
    CastlingSide::from_king_destination_x(destination.x())
}
pub fn castling_rook_move(color: Color, side: CastlingSide) -> (Coord, Coord) {
    let rank = home_rank(color);
    (
        Coord::new(side.rook_origin_x(), rank),
        Coord::new(side.rook_destination_x(), rank),
    )
}
/// Whether `color` may castle on `side` right now.
///
/// Besides the right itself, the king and rook must stand on their original
/// squares with nothing between them, the king must not be in check, and
/// neither the square it crosses nor the one it lands on may be attacked.
pub fn can_castle(state: &GameState, color: Color, side: CastlingSide) -> bool {
    let board = state.board();
    let king = king_origin(color);
    let (rook, _) = castling_rook_move(color, side);
    let direction = Vector {
        x: side.direction(),
        y: 0,
    };
    let king_destination = Coord::new(side.king_destination_x(), king.y());

    state.castling_right().get(color, side)
        && board[king] == Some(Piece::new(color, PieceKind::King))
        && board[rook] == Some(Piece::new(color, PieceKind::Rook))
        && king
            .line_exclusive_exclusive(rook, direction)
            .all(|position| board[position].is_none())
        && !is_attacked(board, king, !color)
        && king
            .line_exclusive_exclusive(king_destination, direction)
            .chain([king_destination])
            .all(|position| !is_attacked(board, position, !color))
}
/// The square of the pawn captured en passant, if `piece` moving from
/// `origin` to `destination` is such a capture.
pub fn en_passant_capture(
    state: &GameState,
    piece: Piece,
    origin: Coord,
    destination: Coord,
) -> Option<Coord> {
    if piece.kind == PieceKind::Pawn
        && origin.x() != destination.x()
        && state.en_passant_target() == Some(destination)
        && state.board()[destination].is_none()
    {
        Some(Coord::new(destination.x(), origin.y()))
    } else {
        None
    }
}
/// The en passant target a move leaves behind: the square a pawn skipped on
/// its two-square advance.
pub fn en_passant_target_after(piece: Piece, origin: Coord, destination: Coord) -> Option<Coord> {
    if piece.kind == PieceKind::Pawn
        && destination - origin == Vector::pawn_double_move(piece.color)
    {
        origin.move_by(Vector::pawn_single_move(piece.color))
    } else {
        None
    }
}
pub fn is_promotion(piece: Piece, destination_row: u8) -> bool {
    piece.kind == PieceKind::Pawn && destination_row == pawn_promotion_rank(piece.color)
}
/// Resolves the piece a move promotes to. Queens are chosen when nothing is
/// asked for; a choice on a non-promoting move is an error.
pub fn promotion_kind(
    piece: Piece,
    destination: Coord,
    choice: Option<PieceKind>,
) -> Result<Option<PieceKind>, MoveError> {
    match (is_promotion(piece, destination.y()), choice) {
        (true, None) => Ok(Some(PieceKind::Queen)),
        (true, Some(kind)) if kind.is_promotion_choice() => Ok(Some(kind)),
        (_, Some(kind)) => Err(MoveError::InvalidPromotionChoice(kind)),
        (false, None) => Ok(None),
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::CastlingSide,
        color::Color,
        error::MoveError,
        fen::Fen,
        game_state::GameState,
        piece::{Piece, PieceKind},
        special_move::{can_castle, castling_side, is_promotion, promotion_kind},
    };

    fn state(fen: &str) -> GameState {
        fen.parse::<Fen>().unwrap().try_into().unwrap()
    }

    #[test]
    fn castling_requires_right_and_empty_squares() {
        let open = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(can_castle(&open, Color::White, CastlingSide::King));
        assert!(can_castle(&open, Color::White, CastlingSide::Queen));
        assert!(can_castle(&open, Color::Black, CastlingSide::Queen));

        let no_rights = state("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
        assert!(!can_castle(&no_rights, Color::White, CastlingSide::King));

        let blocked = state("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
        assert!(!can_castle(&blocked, Color::White, CastlingSide::King));
        assert!(!can_castle(&blocked, Color::White, CastlingSide::Queen));
    }
    #[test]
    fn castling_out_of_or_through_check_is_refused() {
        let black_to_move = state("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        assert!(can_castle(&black_to_move, Color::Black, CastlingSide::King));

        let checked = state("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
        assert!(!can_castle(&checked, Color::White, CastlingSide::Queen));

        let crossing = state("3rk3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(!can_castle(&crossing, Color::White, CastlingSide::Queen));

        let landing = state("2r1k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(!can_castle(&landing, Color::White, CastlingSide::Queen));

        // b1 may be attacked, only the king's path matters
        let rook_path = state("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(can_castle(&rook_path, Color::White, CastlingSide::Queen));
    }
    #[test]
    fn castling_shape() {
        assert_eq!(
            castling_side(Color::White, coord!("e1"), coord!("g1")),
            Some(CastlingSide::King)
        );
        assert_eq!(
            castling_side(Color::Black, coord!("e8"), coord!("c8")),
            Some(CastlingSide::Queen)
        );
        assert_eq!(castling_side(Color::Black, coord!("e1"), coord!("g1")), None);
        assert_eq!(castling_side(Color::White, coord!("e1"), coord!("f1")), None);
    }
    #[test]
    fn promotion_rank_depends_on_color() {
        let white = Piece::new(Color::White, PieceKind::Pawn);
        let black = Piece::new(Color::Black, PieceKind::Pawn);
        assert!(is_promotion(white, 0));
        assert!(!is_promotion(white, 7));
        assert!(is_promotion(black, 7));
        assert!(!is_promotion(Piece::new(Color::White, PieceKind::Rook), 0));
    }
    #[test]
    fn promotion_choice_validation() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        assert_eq!(
            promotion_kind(pawn, coord!("a8"), None),
            Ok(Some(PieceKind::Queen))
        );
        assert_eq!(
            promotion_kind(pawn, coord!("a8"), Some(PieceKind::Rook)),
            Ok(Some(PieceKind::Rook))
        );
        assert_eq!(
            promotion_kind(pawn, coord!("a8"), Some(PieceKind::King)),
            Err(MoveError::InvalidPromotionChoice(PieceKind::King))
        );
        assert_eq!(
            promotion_kind(pawn, coord!("a4"), Some(PieceKind::Queen)),
            Err(MoveError::InvalidPromotionChoice(PieceKind::Queen))
        );
        assert_eq!(promotion_kind(pawn, coord!("a4"), None), Ok(None));
    }
}
