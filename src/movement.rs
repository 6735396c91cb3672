use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    coord::{Coord, ParseCoordError},
    piece::{InvalidFenPiece, PieceKind},
};

/// A move request: origin, destination and an optional promotion choice.
///
/// Castling is written as the king moving two squares, as in `e1g1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Coord,
    pub destination: Coord,
    pub promotion: Option<PieceKind>,
}
impl Move {
    #[must_use]
    pub fn new(origin: Coord, destination: Coord) -> Self {
        Move {
            origin,
            destination,
            promotion: None,
        }
    }
    #[must_use]
    pub fn with_promotion(self, promotion: PieceKind) -> Self {
        Move {
            promotion: Some(promotion),
            ..self
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMoveError {
    InvalidChar,
    ParseCoordError(ParseCoordError),
    InvalidFenPiece(InvalidFenPiece),
    Unexpected(char),
}
impl From<ParseCoordError> for ParseMoveError {
    fn from(value: ParseCoordError) -> Self {
        ParseMoveError::ParseCoordError(value)
    }
}
impl From<InvalidFenPiece> for ParseMoveError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseMoveError::InvalidFenPiece(value)
    }
}
impl Display for ParseMoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::InvalidChar => write!(f, "provided string contains invalid character")?,
            ParseMoveError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseMoveError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseMoveError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseMoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseMoveError::ParseCoordError(err) => Some(err),
            ParseMoveError::InvalidFenPiece(err) => Some(err),
            _ => None,
        }
    }
}
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origin = s.get(0..2).ok_or(ParseMoveError::InvalidChar)?.parse()?;
        let destination = s.get(2..4).ok_or(ParseMoveError::InvalidChar)?.parse()?;
        let mut rest = s.get(4..).ok_or(ParseMoveError::InvalidChar)?.chars().fuse();
        let promotion = rest.next().map(PieceKind::from_fen).transpose()?;

        if let Some(c) = rest.next() {
            return Err(ParseMoveError::Unexpected(c));
        }
        Ok(Move {
            origin,
            destination,
            promotion,
        })
    }
}
#[cfg(test)]
mod test {
    use crate::{
        movement::{Move, ParseMoveError},
        piece::PieceKind,
    };

    #[test]
    fn parses_long_algebraic_notation() {
        let movement: Move = "e7e8n".parse().unwrap();
        assert_eq!(
            movement,
            Move::new(coord!("e7"), coord!("e8")).with_promotion(PieceKind::Knight)
        );
        assert_eq!(movement.to_string(), "e7e8n");
        assert_eq!(
            "e2e4".parse::<Move>(),
            Ok(Move::new(coord!("e2"), coord!("e4")))
        );
    }
    #[test]
    fn rejects_trailing_characters() {
        assert_eq!(
            "e7e8qq".parse::<Move>(),
            Err(ParseMoveError::Unexpected('q'))
        );
        assert_eq!("e7".parse::<Move>(), Err(ParseMoveError::InvalidChar));
    }
}
