use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{color::Color, piece::PieceKind, status::Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionError {
    EmptySquare,
    /// The selected piece belongs to the player who is not on the move.
    WrongTurn(Color),
}
impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::EmptySquare => write!(f, "no piece found on the square")?,
            SelectionError::WrongTurn(color) => write!(f, "it is {color}'s turn")?,
        }
        Ok(())
    }
}
impl Error for SelectionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    SameSquare,
    OwnPieceCapture,
    Geometry(PieceKind),
    PathBlocked,
    CastlingNotAllowed,
    LeavesKingInCheck,
}
impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::SameSquare => write!(f, "a piece can't move to its own square")?,
            IllegalMove::OwnPieceCapture => write!(f, "a piece can't capture its own side")?,
            IllegalMove::Geometry(kind) => write!(f, "a {kind} doesn't move that way")?,
            IllegalMove::PathBlocked => write!(f, "the path is blocked")?,
            IllegalMove::CastlingNotAllowed => write!(f, "castling is not allowed")?,
            IllegalMove::LeavesKingInCheck => write!(f, "the king would be left in check")?,
        }
        Ok(())
    }
}
impl Error for IllegalMove {}

/// Why a move request was rejected. The game is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    InvalidSelection(SelectionError),
    IllegalMove(IllegalMove),
    InvalidPromotionChoice(PieceKind),
    GameOver(Status),
}
impl From<SelectionError> for MoveError {
    fn from(value: SelectionError) -> Self {
        MoveError::InvalidSelection(value)
    }
}
impl From<IllegalMove> for MoveError {
    fn from(value: IllegalMove) -> Self {
        MoveError::IllegalMove(value)
    }
}
impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidSelection(err) => write!(f, "invalid selection: {err}")?,
            MoveError::IllegalMove(err) => write!(f, "illegal move: {err}")?,
            MoveError::InvalidPromotionChoice(kind) => {
                write!(f, "can't promote to {kind} here")?;
            }
            MoveError::GameOver(status) => write!(f, "the game is over: {status}")?,
        }
        Ok(())
    }
}
impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::InvalidSelection(err) => Some(err),
            MoveError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}
