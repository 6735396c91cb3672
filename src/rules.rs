//! Move legality.
//!
//! Two levels are provided. [`check_move`] applies the per-piece rules:
//! ownership, geometry, path clearance, pawn specifics and castling
//! preconditions. [`check_fully_legal_move`] additionally refuses moves that
//! leave the mover's own king attacked; the game controller and destination
//! highlighting go through it.
//!
//! The same geometry answers [`attacks`], which the check detector uses, so a
//! square counts as attacked exactly when an enemy piece could capture there.

use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    check::is_in_check,
    color::Color,
    coord::{Coord, Vector, pawn_home_rank},
    error::{IllegalMove, MoveError, SelectionError},
    game_state::GameState,
    movement::Move,
    piece::{Piece, PieceKind},
    special_move::{can_castle, castling_side},
};

fn sliding_directions(kind: PieceKind) -> &'static [Vector] {
    match kind {
        PieceKind::Bishop => &Vector::BISHOP_DIRECTIONS,
        PieceKind::Rook => &Vector::ROOK_DIRECTIONS,
        PieceKind::Queen => &Vector::QUEEN_DIRECTIONS,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}
/// Whether `piece` standing on `origin` reaches `target` by capturing.
/// Pawns reach only their forward diagonals and kings never castle here.
fn check_reach(
    board: &Board,
    piece: Piece,
    origin: Coord,
    target: Coord,
) -> Result<(), IllegalMove> {
    let movement = target - origin;
    let fits = match piece.kind {
        PieceKind::Pawn => movement.is_pawn_attack(piece.color),
        PieceKind::Knight => movement.is_knight_move(),
        PieceKind::King => movement.is_king_move(),
        kind @ (PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
            let mut between = origin
                .is_aligned(target, sliding_directions(kind))
                .ok_or(IllegalMove::Geometry(kind))?;
            if between.any(|position| board[position].is_some()) {
                return Err(IllegalMove::PathBlocked);
            }
            true
        }
    };
    if fits {
        Ok(())
    } else {
        Err(IllegalMove::Geometry(piece.kind))
    }
}
/// Whether the piece on `origin` attacks `target`, regardless of whose turn
/// it is or what stands on `target`.
pub fn attacks(board: &Board, origin: Coord, target: Coord) -> bool {
    board[origin].is_some_and(|piece| {
        origin != target && check_reach(board, piece, origin, target).is_ok()
    })
}
fn check_pawn_move(
    state: &GameState,
    color: Color,
    origin: Coord,
    destination: Coord,
) -> Result<(), IllegalMove> {
    let board = state.board();
    let movement = destination - origin;
    if movement == Vector::pawn_single_move(color) {
        if board[destination].is_some() {
            return Err(IllegalMove::PathBlocked);
        }
        Ok(())
    } else if movement == Vector::pawn_double_move(color) && origin.y() == pawn_home_rank(color) {
        let skipped = origin.move_by(Vector::pawn_single_move(color));
        if skipped.is_none_or(|skipped| board[skipped].is_some()) || board[destination].is_some() {
            return Err(IllegalMove::PathBlocked);
        }
        Ok(())
    } else if movement.is_pawn_attack(color)
        && (board[destination].is_some() || state.en_passant_target() == Some(destination))
    {
        Ok(())
    } else {
        Err(IllegalMove::Geometry(PieceKind::Pawn))
    }
}
/// Checks the per-piece movement rules for moving whatever stands on
/// `origin` to `destination`. King safety is not considered, apart from the
/// castling preconditions.
pub fn check_move(state: &GameState, origin: Coord, destination: Coord) -> Result<(), MoveError> {
    let board = state.board();
    let piece = board[origin].ok_or(SelectionError::EmptySquare)?;
    if piece.color != state.side_to_move() {
        return Err(SelectionError::WrongTurn(state.side_to_move()).into());
    }
    if origin == destination {
        return Err(IllegalMove::SameSquare.into());
    }
    if board.is_occupied_by(destination, piece.color) {
        return Err(IllegalMove::OwnPieceCapture.into());
    }
    match piece.kind {
        PieceKind::Pawn => check_pawn_move(state, piece.color, origin, destination)?,
        PieceKind::King => {
            if let Some(side) = castling_side(piece.color, origin, destination) {
                if !can_castle(state, piece.color, side) {
                    return Err(IllegalMove::CastlingNotAllowed.into());
                }
            } else {
                check_reach(board, piece, origin, destination)?;
            }
        }
        _ => check_reach(board, piece, origin, destination)?,
    }
    Ok(())
}
pub fn is_legal_move(state: &GameState, origin: Coord, destination: Coord) -> bool {
    check_move(state, origin, destination).is_ok()
}
/// [`check_move`], plus refusing moves after which the mover is in check.
/// The move is tried on a copy; `state` is never touched.
pub fn check_fully_legal_move(
    state: &GameState,
    origin: Coord,
    destination: Coord,
) -> Result<(), MoveError> {
    check_move(state, origin, destination)?;
    let color = state.side_to_move();
    let moved = state.clone_and_move(Move::new(origin, destination));
    if is_in_check(&moved, color) {
        return Err(IllegalMove::LeavesKingInCheck.into());
    }
    Ok(())
}
pub fn is_fully_legal_move(state: &GameState, origin: Coord, destination: Coord) -> bool {
    check_fully_legal_move(state, origin, destination).is_ok()
}
/// Every square the piece on `origin` may move to. Empty when `origin` holds
/// no piece of the side to move.
pub fn legal_destinations(state: &GameState, origin: Coord) -> FxHashSet<Coord> {
    if !state.board().is_occupied_by(origin, state.side_to_move()) {
        return FxHashSet::default();
    }
    Coord::all()
        .filter(|destination| is_fully_legal_move(state, origin, *destination))
        .collect()
}
