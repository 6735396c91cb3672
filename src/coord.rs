use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Neg, Sub},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidX(char),
    InvalidY(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidX(x) => write!(
                f,
                "found `{x}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidY(y) => write!(
                f,
                "found `{y}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

/// A square on the board.
///
/// `x` is the file (`0` is the a-file) and `y` is the row, counted from the
/// top of the board as seen by white: row `0` is rank 8, where black starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    x: u8,
    y: u8,
}
impl Coord {
    #[must_use]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < 8);
        debug_assert!(y < 8);
        Coord { x, y }
    }
    pub fn new_checked(x: u8, y: u8) -> Option<Self> {
        if x >= 8 || y >= 8 {
            None
        } else {
            Some(Self::new(x, y))
        }
    }
    pub fn from_chars(x: char, y: char) -> Result<Self, ParseCoordError> {
        let x = match x {
            'a'..='h' => x as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidX(x)),
        };
        let y = match y {
            '1'..='8' => 7 - (y as u8 - b'1'),
            _ => return Err(ParseCoordError::InvalidY(y)),
        };
        Ok(Coord::new(x, y))
    }
    /// All 64 squares, row by row starting from a8.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|y| (0..8).map(move |x| Coord::new(x, y)))
    }
    pub fn x(self) -> u8 {
        self.x
    }
    pub fn y(self) -> u8 {
        self.y
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.x.checked_add_signed(movement.x)?,
            self.y.checked_add_signed(movement.y)?,
        )
    }
    fn line(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        debug_assert_eq!(direction, direction.as_unit());
        (0..).map_while(move |difference| self.move_by(direction * difference))
    }
    /// Squares strictly between `self` and `end` walking along `direction`.
    ///
    /// `end` must lie on that line, otherwise this walks to the edge of the
    /// board.
    pub fn line_exclusive_exclusive(
        self,
        end: Coord,
        direction: Vector,
    ) -> impl Iterator<Item = Self> {
        self.line(direction)
            .take_while(move |position| *position != end)
            .skip(1)
    }
    /// If `other` can be reached from `self` along one of `directions`,
    /// returns the squares strictly between them.
    pub fn is_aligned(
        self,
        other: Self,
        directions: &[Vector],
    ) -> Option<impl Iterator<Item = Self>> {
        directions.iter().copied().find_map(|direction| {
            if direction.is_aligned(other - self) {
                Some(self.line_exclusive_exclusive(other, direction))
            } else {
                None
            }
        })
    }
    /// Color of the square itself, used for shading.
    pub fn color(self) -> Color {
        if (self.x + self.y).is_multiple_of(2) {
            Color::White
        } else {
            Color::Black
        }
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let x = (self.x + b'a') as char;
        let y = 8 - self.y;
        write!(f, "{x}{y}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(x) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(y) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(x, y)
    }
}
#[allow(clippy::cast_possible_wrap, reason = "coordinates are always below 8")]
impl Sub<Self> for Coord {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x as i8 - rhs.x as i8,
            y: self.y as i8 - rhs.y as i8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: 0, y: -1 },
        Vector { x: 0, y: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = [
        Vector { x: -1, y: -1 },
        Vector { x: 0, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: -1, y: 1 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 1 },
    ];

    #[must_use]
    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            x: 0,
            y: pawn_direction(color),
        }
    }
    #[must_use]
    pub fn pawn_double_move(color: Color) -> Self {
        Vector::pawn_single_move(color) * 2
    }
    pub fn is_aligned(self, other: Self) -> bool {
        self.as_unit() == other.as_unit() && self.x * other.y == other.x * self.y
    }
    pub fn is_king_move(self) -> bool {
        (-1..=1).contains(&self.x) && (-1..=1).contains(&self.y) && self != Vector::ZERO
    }
    pub fn is_knight_move(self) -> bool {
        let x = self.x.unsigned_abs();
        let y = self.y.unsigned_abs();
        (x == 1 && y == 2) || (x == 2 && y == 1)
    }
    pub fn is_pawn_attack(self, color: Color) -> bool {
        self.x.unsigned_abs() == 1 && self.y == pawn_direction(color)
    }
    #[must_use]
    pub fn as_unit(self) -> Self {
        Vector {
            x: self.x.signum(),
            y: self.y.signum(),
        }
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord::{Coord, ParseCoordError, Vector},
    };

    #[test]
    fn adjacent_exclusive_exclusive_line_is_empty() {
        assert_eq!(
            coord!("e4")
                .line_exclusive_exclusive(coord!("e5"), Vector { x: 0, y: -1 })
                .next(),
            None
        );
    }
    #[test]
    fn row_zero_is_the_eighth_rank() {
        assert_eq!(coord!("a8"), Coord::new(0, 0));
        assert_eq!(coord!("h1"), Coord::new(7, 7));
        assert_eq!(Coord::new(4, 6).to_string(), "e2");
    }
    #[test]
    fn rejects_malformed_squares() {
        assert_eq!("i1".parse::<Coord>(), Err(ParseCoordError::InvalidX('i')));
        assert_eq!("a9".parse::<Coord>(), Err(ParseCoordError::InvalidY('9')));
        assert_eq!(
            "a".parse::<Coord>(),
            Err(ParseCoordError::NotEnoughCharacter(1))
        );
        assert_eq!(
            "a1b".parse::<Coord>(),
            Err(ParseCoordError::Unexpected('b'))
        );
    }
    #[test]
    fn bishop_alignment_lists_squares_between() {
        let between: Vec<_> = coord!("c1")
            .is_aligned(coord!("f4"), &Vector::BISHOP_DIRECTIONS)
            .unwrap()
            .collect();
        assert_eq!(between, [coord!("d2"), coord!("e3")]);
        let off_diagonal = coord!("c1").is_aligned(coord!("c4"), &Vector::BISHOP_DIRECTIONS);
        assert!(off_diagonal.is_none());
        let same_square = coord!("c1").is_aligned(coord!("c1"), &Vector::ROOK_DIRECTIONS);
        assert!(same_square.is_none());
    }
    #[test]
    fn square_colors_alternate() {
        assert_eq!(coord!("a8").color(), Color::White);
        assert_eq!(coord!("h8").color(), Color::Black);
        assert_eq!(coord!("a1").color(), Color::Black);
        assert_eq!(coord!("e4").color(), Color::White);
    }
}
