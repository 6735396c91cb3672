use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCastlingCharacter(pub char);

impl Display for InvalidCastlingCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, expected one of `K`, `Q`, `k`, `q`, or `-`",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidCastlingCharacter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    King,
    Queen,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::King, CastlingSide::Queen];

    pub fn rook_origin_x(self) -> u8 {
        match self {
            CastlingSide::King => 7,
            CastlingSide::Queen => 0,
        }
    }
    pub fn king_destination_x(self) -> u8 {
        match self {
            CastlingSide::King => 6,
            CastlingSide::Queen => 2,
        }
    }
    pub fn rook_destination_x(self) -> u8 {
        match self {
            CastlingSide::King => 5,
            CastlingSide::Queen => 3,
        }
    }
    /// Horizontal step the king takes toward the rook.
    pub fn direction(self) -> i8 {
        match self {
            CastlingSide::King => 1,
            CastlingSide::Queen => -1,
        }
    }
    pub fn from_rook_origin_x(x: u8) -> Option<Self> {
        CastlingSide::ALL
            .into_iter()
            .find(|side| side.rook_origin_x() == x)
    }
    pub fn from_king_destination_x(x: u8) -> Option<Self> {
        CastlingSide::ALL
            .into_iter()
            .find(|side| side.king_destination_x() == x)
    }
    fn bit(self) -> u8 {
        match self {
            CastlingSide::King => 0b_01,
            CastlingSide::Queen => 0b_10,
        }
    }
}

/// Castling rights of both players.
///
/// Rights can only be taken away once a game is running; the only way to grant
/// one is to start a new game or import a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRight {
    white: u8,
    black: u8,
}
impl CastlingRight {
    #[must_use]
    pub fn none() -> Self {
        CastlingRight { white: 0, black: 0 }
    }
    #[must_use]
    pub fn all() -> Self {
        CastlingRight {
            white: 0b_11,
            black: 0b_11,
        }
    }
    fn byte(self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
    fn byte_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        self.byte(color) & side.bit() != 0
    }
    fn add(&mut self, color: Color, side: CastlingSide) {
        *self.byte_mut(color) |= side.bit();
    }
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        *self.byte_mut(color) &= !side.bit();
    }
    pub fn clear(&mut self, color: Color) {
        *self.byte_mut(color) = 0;
    }
    /// Drops the right tied to a rook that left, or was captured on, `x` of
    /// its home rank.
    pub fn remove_for_rook(&mut self, color: Color, x: u8) {
        if let Some(side) = CastlingSide::from_rook_origin_x(x) {
            self.remove(color, side);
        }
    }
    pub fn sides(self, color: Color) -> impl Iterator<Item = CastlingSide> {
        CastlingSide::ALL
            .into_iter()
            .filter(move |side| self.get(color, *side))
    }
}
impl Default for CastlingRight {
    fn default() -> Self {
        CastlingRight::all()
    }
}
impl Display for CastlingRight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for color in Color::ALL {
            for side in self.sides(color) {
                let c = match (color, side) {
                    (Color::White, CastlingSide::King) => 'K',
                    (Color::White, CastlingSide::Queen) => 'Q',
                    (Color::Black, CastlingSide::King) => 'k',
                    (Color::Black, CastlingSide::Queen) => 'q',
                };
                written = true;
                write!(f, "{c}")?;
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
impl FromStr for CastlingRight {
    type Err = InvalidCastlingCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castling_right = CastlingRight::none();
        for c in s.chars() {
            match c {
                'K' => castling_right.add(Color::White, CastlingSide::King),
                'Q' => castling_right.add(Color::White, CastlingSide::Queen),
                'k' => castling_right.add(Color::Black, CastlingSide::King),
                'q' => castling_right.add(Color::Black, CastlingSide::Queen),
                '-' => (),
                c => return Err(InvalidCastlingCharacter(c)),
            }
        }
        Ok(castling_right)
    }
}
