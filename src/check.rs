//! Check, checkmate and stalemate detection.

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    game_state::GameState,
    movement::Move,
    piece::PieceKind,
    rules::{attacks, is_fully_legal_move},
    special_move::is_promotion,
    status::Status,
};

/// Whether any piece of color `by` attacks `target`.
pub fn is_attacked(board: &Board, target: Coord, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(origin, _)| attacks(board, origin, target))
}
pub fn is_in_check(state: &GameState, color: Color) -> bool {
    is_attacked(state.board(), state.king_position(color), !color)
}
/// Every fully legal move of the side to move. Promotions are listed once,
/// as the default queen promotion.
pub fn legal_moves(state: &GameState) -> impl Iterator<Item = Move> + '_ {
    let color = state.side_to_move();
    state
        .board()
        .pieces_of(color)
        .flat_map(move |(origin, piece)| {
            Coord::all()
                .filter(move |destination| is_fully_legal_move(state, origin, *destination))
                .map(move |destination| {
                    let movement = Move::new(origin, destination);
                    if is_promotion(piece, destination.y()) {
                        movement.with_promotion(PieceKind::Queen)
                    } else {
                        movement
                    }
                })
        })
}
fn has_legal_move(state: &GameState, color: Color) -> bool {
    legal_moves(&state.with_side_to_move(color)).next().is_some()
}
pub fn is_checkmate(state: &GameState, color: Color) -> bool {
    is_in_check(state, color) && !has_legal_move(state, color)
}
pub fn is_stalemate(state: &GameState, color: Color) -> bool {
    !is_in_check(state, color) && !has_legal_move(state, color)
}
/// The status of the side to move.
pub fn status(state: &GameState) -> Status {
    let color = state.side_to_move();
    match (is_in_check(state, color), has_legal_move(state, color)) {
        (true, false) => Status::Checkmate(color),
        (true, true) => Status::Check(color),
        (false, false) => Status::Stalemate(color),
        (false, true) => Status::Continue,
    }
}
#[cfg(test)]
mod test {
    use crate::{
        check::{is_checkmate, is_in_check, is_stalemate, legal_moves, status},
        color::Color,
        fen::Fen,
        game_state::GameState,
        movement::Move,
        status::Status,
    };

    fn from_fen(fen: &str) -> GameState {
        fen.parse::<Fen>().unwrap().try_into().unwrap()
    }
    fn play(state: &mut GameState, moves: &[&str]) {
        for movement in moves {
            state.move_piece(movement.parse().unwrap());
        }
    }

    #[test]
    fn fools_mate() {
        let mut state = GameState::starting_position();
        play(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(is_in_check(&state, Color::White));
        assert!(is_checkmate(&state, Color::White));
        assert!(!is_checkmate(&state, Color::Black));
        assert_eq!(status(&state), Status::Checkmate(Color::White));
    }
    #[test]
    fn stalemate_is_not_checkmate() {
        let state = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_in_check(&state, Color::Black));
        assert!(!is_checkmate(&state, Color::Black));
        assert!(is_stalemate(&state, Color::Black));
        assert_eq!(status(&state), Status::Stalemate(Color::Black));
    }
    #[test]
    fn check_with_escape_is_not_checkmate() {
        let mut state = GameState::starting_position();
        play(&mut state, &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(status(&state), Status::Check(Color::Black));
        assert!(!is_checkmate(&state, Color::Black));
        let escapes: Vec<_> = legal_moves(&state)
            .map(|movement| movement.to_string())
            .collect();
        assert_eq!(escapes, ["g7g6"]);
    }
    #[test]
    fn detection_leaves_state_untouched() {
        let mut state = GameState::starting_position();
        play(
            &mut state,
            &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
        );
        let before = state;
        assert!(is_checkmate(&state, Color::Black));
        assert!(!is_stalemate(&state, Color::White));
        assert_eq!(state, before);
    }
    #[test]
    fn starting_position_has_twenty_moves() {
        let state = GameState::starting_position();
        assert_eq!(legal_moves(&state).count(), 20);
        assert_eq!(status(&state), Status::Continue);
    }
    #[test]
    fn promotions_are_listed_as_queens() {
        let state = from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1");
        let promotion: Move = "a7a8q".parse().unwrap();
        assert!(legal_moves(&state).any(|movement| movement == promotion));
    }
}
