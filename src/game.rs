//! The game controller: turn order, selection and move requests.

use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    check::status,
    coord::Coord,
    error::{MoveError, SelectionError},
    game_state::GameState,
    movement::Move,
    piece::{Piece, PieceKind},
    rules::{check_fully_legal_move, legal_destinations},
    special_move::promotion_kind,
    status::Status,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingSelection,
    PieceSelected(Coord),
    Over(Status),
}
/// An applied move and what it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveResult {
    /// The move as applied, with the promotion filled in when one happened.
    pub movement: Move,
    pub captured: Option<Piece>,
    /// Status of the side now to move.
    pub status: Status,
}
/// Outcome of a [`Game::select`] click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Click {
    Selected(Coord),
    Deselected,
    Moved(MoveResult),
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
    phase: Phase,
    last_move: Option<Move>,
}
impl Game {
    #[must_use]
    pub fn new() -> Self {
        Game::from_state(GameState::starting_position())
    }
    /// Starts from an already validated position. The game is over right away
    /// if the side to move has no legal move.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        let current = status(&state);
        let phase = if current.is_terminal() {
            Phase::Over(current)
        } else {
            Phase::AwaitingSelection
        };
        Game {
            state,
            phase,
            last_move: None,
        }
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }
    pub fn selected(&self) -> Option<Coord> {
        match self.phase {
            Phase::PieceSelected(position) => Some(position),
            Phase::AwaitingSelection | Phase::Over(_) => None,
        }
    }
    pub fn board_snapshot(&self) -> Board {
        *self.state.board()
    }
    pub fn reset(&mut self) {
        log::debug!("game reset");
        *self = Game::new();
    }
    fn check_not_over(&self) -> Result<(), MoveError> {
        match self.phase {
            Phase::Over(status) => Err(MoveError::GameOver(status)),
            Phase::AwaitingSelection | Phase::PieceSelected(_) => Ok(()),
        }
    }
    /// Where the piece on `origin` may go. Empty when `origin` isn't a piece
    /// of the side to move or the game is over.
    pub fn legal_destinations(&self, origin: Coord) -> FxHashSet<Coord> {
        if self.check_not_over().is_err() {
            return FxHashSet::default();
        }
        legal_destinations(&self.state, origin)
    }
    /// Handles a click on `position`.
    pub fn select(&mut self, position: Coord) -> Result<Click, MoveError> {
        let color = self.state.side_to_move();
        match self.phase {
            Phase::Over(status) => Err(MoveError::GameOver(status)),
            Phase::PieceSelected(selected) if selected == position => {
                self.phase = Phase::AwaitingSelection;
                Ok(Click::Deselected)
            }
            Phase::PieceSelected(_) | Phase::AwaitingSelection
                if self.state.board().is_occupied_by(position, color) =>
            {
                self.phase = Phase::PieceSelected(position);
                Ok(Click::Selected(position))
            }
            Phase::PieceSelected(selected) => {
                self.request_move(selected, position, None).map(Click::Moved)
            }
            Phase::AwaitingSelection => {
                let err = match self.state.board()[position] {
                    None => SelectionError::EmptySquare,
                    Some(_) => SelectionError::WrongTurn(color),
                };
                log::debug!("rejected selection of {position}: {err}");
                Err(err.into())
            }
        }
    }
    /// Validates and applies a move of the side to move. The game is left
    /// untouched when the move is rejected, apart from dropping the current
    /// selection.
    pub fn request_move(
        &mut self,
        origin: Coord,
        destination: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<MoveResult, MoveError> {
        self.check_not_over()?;
        match self.try_move(origin, destination, promotion) {
            Ok(result) => {
                log::debug!("accepted {}: {}", result.movement, result.status);
                Ok(result)
            }
            Err(err) => {
                if matches!(self.phase, Phase::PieceSelected(_)) {
                    self.phase = Phase::AwaitingSelection;
                }
                log::debug!("rejected {origin}{destination}: {err}");
                Err(err)
            }
        }
    }
    fn try_move(
        &mut self,
        origin: Coord,
        destination: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<MoveResult, MoveError> {
        check_fully_legal_move(&self.state, origin, destination)?;
        let piece = self.state.board()[origin].ok_or(SelectionError::EmptySquare)?;
        let promotion = promotion_kind(piece, destination, promotion)?;
        let movement = Move {
            origin,
            destination,
            promotion,
        };
        let captured = self.state.move_piece(movement);
        let status = status(&self.state);
        self.last_move = Some(movement);
        self.phase = if status.is_terminal() {
            log::info!("game over: {status}");
            Phase::Over(status)
        } else {
            Phase::AwaitingSelection
        };
        Ok(MoveResult {
            movement,
            captured,
            status,
        })
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
