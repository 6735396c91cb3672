use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, coord::Coord, movement::Move, piece::Piece};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const LAST_MOVE: &str = "\x1b[30;106m";
const RESET: &str = "\x1b[0m";

/// Draws the board with figurines, ranks on the right and files below.
/// Lines of `info` are written alongside the board.
pub struct BoardDisplay<'a> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Coord],
    pub last_move: Option<Move>,
    pub info: &'a str,
}
impl<'a> BoardDisplay<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        BoardDisplay {
            board,
            view: Color::White,
            highlighted: &[],
            last_move: None,
            info: "",
        }
    }
    fn background(&self, position: Coord) -> &'static str {
        if self.highlighted.contains(&position) {
            HIGHLIGHTED
        } else if self
            .last_move
            .is_some_and(|movement| movement.origin == position || movement.destination == position)
        {
            LAST_MOVE
        } else {
            match position.color() {
                Color::White => WHITE,
                Color::Black => BLACK,
            }
        }
    }
}
impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for y in 0..8 {
            let y = match self.view {
                Color::White => y,
                Color::Black => 7 - y,
            };
            for x in 0..8 {
                let x = match self.view {
                    Color::White => x,
                    Color::Black => 7 - x,
                };
                let position = Coord::new(x, y);
                let color = self.background(position);
                let figurine = self.board[position].map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - y)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
