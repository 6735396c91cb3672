use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::Peekable,
    num::ParseIntError,
    str::FromStr,
};

use crate::{
    board::Board,
    castling_right::{CastlingRight, InvalidCastlingCharacter},
    color::{Color, ParseColorError},
    coord::{Coord, ParseCoordError},
    piece::{InvalidFenPiece, Piece},
};

/// A parsed FEN record. No chess validation is done here; convert into a
/// [`GameState`](crate::game_state::GameState) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_right: CastlingRight,
    pub en_passant_target: Option<Coord>,
    pub half_move: u32,
    pub full_move: u32,
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    UnexpectedChar(char),
    UnexpectedEol,
    InvalidFenPiece(InvalidFenPiece),
    ParseColorError(ParseColorError),
    InvalidCastlingCharacter(InvalidCastlingCharacter),
    ParseCoordError(ParseCoordError),
    ParseIntError(ParseIntError),
    ExtraField,
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidFenPiece(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::ParseColorError(value)
    }
}
impl From<InvalidCastlingCharacter> for ParseFenError {
    fn from(value: InvalidCastlingCharacter) -> Self {
        ParseFenError::InvalidCastlingCharacter(value)
    }
}
impl From<ParseCoordError> for ParseFenError {
    fn from(value: ParseCoordError) -> Self {
        ParseFenError::ParseCoordError(value)
    }
}
impl From<ParseIntError> for ParseFenError {
    fn from(value: ParseIntError) -> Self {
        ParseFenError::ParseIntError(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "a row has fewer than 8 squares")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "a row has more than 8 squares")?,
            ParseFenError::UnexpectedChar(c) => write!(f, "unexpected `{c}`")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of line")?,
            ParseFenError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseFenError::ParseColorError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastlingCharacter(err) => write!(f, "{err}")?,
            ParseFenError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseFenError::ParseIntError(err) => write!(f, "{err}")?,
            ParseFenError::ExtraField => write!(f, "found more than 6 fields")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidFenPiece(err) => Some(err),
            ParseFenError::ParseColorError(err) => Some(err),
            ParseFenError::InvalidCastlingCharacter(err) => Some(err),
            ParseFenError::ParseCoordError(err) => Some(err),
            ParseFenError::ParseIntError(err) => Some(err),
            _ => None,
        }
    }
}
fn parse_board(s: &str) -> Result<Board, ParseFenError> {
    let mut characters = s.chars();
    let mut board = Board::empty();

    let mut x: u8 = 0;
    let mut y: u8 = 0;
    while x < 8 || y < 7 {
        let c = characters.next().ok_or(ParseFenError::UnexpectedEol)?;
        if c == '/' {
            if x == 8 {
                x = 0;
                y += 1;
            } else {
                return Err(ParseFenError::NotEnoughSquaresOnRow);
            }
        } else if matches!(c, '1'..='8') {
            x += c as u8 - b'0';
            if x > 8 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            }
        } else if x >= 8 {
            return Err(ParseFenError::ExceedingSquaresOnRow);
        } else {
            board[Coord::new(x, y)] = Some(Piece::from_fen(c)?);
            x += 1;
        }
    }
    if let Some(c) = characters.next() {
        return Err(ParseFenError::UnexpectedChar(c));
    }
    Ok(board)
}
impl FromStr for Fen {
    type Err = ParseFenError;

    /// Parses all six fields. The move counters may be left out, in which
    /// case they default to `0` and `1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let mut field = || fields.next().ok_or(ParseFenError::UnexpectedEol);

        let board = parse_board(field()?)?;
        let side_to_move = match field()? {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseColorError.into()),
        };
        let castling_right: CastlingRight = field()?.parse()?;
        let en_passant_target: Option<Coord> = match field()? {
            "-" => None,
            text => Some(text.parse()?),
        };
        let half_move: u32 = fields.next().map_or(Ok(0), str::parse)?;
        let full_move: u32 = fields.next().map_or(Ok(1), str::parse)?;
        if fields.next().is_some() {
            return Err(ParseFenError::ExtraField);
        }
        Ok(Fen {
            board,
            side_to_move,
            castling_right,
            en_passant_target,
            half_move,
            full_move,
        })
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cell {
    Piece(Piece),
    Space(u8),
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Piece(piece) => write!(f, "{}", piece.fen())?,
            Cell::Space(space) => write!(f, "{space}")?,
        }
        Ok(())
    }
}
struct CellIter<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for CellIter<T>
where
    T: Iterator<Item = Option<Piece>>,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|piece| match piece {
            Some(piece) => Cell::Piece(piece),
            None => {
                let mut count = 1;
                while self.0.peek().is_some_and(Option::is_none) {
                    self.0.next();
                    count += 1;
                }
                Cell::Space(count)
            }
        })
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (y, row) in self.board.rows().iter().enumerate() {
            if y != 0 {
                write!(f, "/")?;
            }
            for cell in CellIter(row.iter().copied().peekable()) {
                write!(f, "{cell}")?;
            }
        }
        write!(f, " {}", self.side_to_move.lowercase())?;
        write!(f, " {}", self.castling_right)?;
        if let Some(position) = self.en_passant_target {
            write!(f, " {position}")?;
        } else {
            write!(f, " -")?;
        }
        write!(f, " {} {}", self.half_move, self.full_move)?;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        fen::{Fen, ParseFenError},
    };

    const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn starting_position() {
        let fen: Fen = STARTING.parse().unwrap();
        assert_eq!(fen.board, Board::starting_position());
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling_right.to_string(), "KQkq");
        assert_eq!(fen.en_passant_target, None);
        assert_eq!(fen.to_string(), STARTING);
    }
    #[test]
    fn keeps_en_passant_and_counters() {
        let text = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";
        let fen: Fen = text.parse().unwrap();
        assert_eq!(fen.en_passant_target, Some(coord!("e6")));
        assert_eq!(fen.full_move, 2);
        assert_eq!(fen.to_string(), text);
    }
    #[test]
    fn counters_are_optional() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b - -".parse().unwrap();
        assert_eq!(fen.half_move, 0);
        assert_eq!(fen.full_move, 1);
        assert_eq!(fen.side_to_move, Color::Black);
    }
    #[test]
    fn malformed_rows() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::UnexpectedEol)
        );
        assert_eq!(
            "4k4/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k2/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidFenPiece(_))
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1".parse::<Fen>(),
            Err(ParseFenError::ParseColorError(_))
        ));
    }
}
