use std::fmt::{self, Display, Formatter};

use crate::color::Color;

/// Position status of the side to move, reported after every applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Continue,
    Check(Color),
    Checkmate(Color),
    Stalemate(Color),
}
impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate(_) | Status::Stalemate(_))
    }
}
impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Status::Continue => write!(f, "game continues")?,
            Status::Check(color) => write!(f, "{color} is in check")?,
            Status::Checkmate(color) => write!(f, "{color} is checkmated, {} wins", !*color)?,
            Status::Stalemate(color) => write!(f, "{color} is stalemated, draw")?,
        }
        Ok(())
    }
}
