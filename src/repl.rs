use std::{
    error::Error,
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use crate::{
    board_display::BoardDisplay,
    check::is_in_check,
    color::Color,
    coord::Coord,
    fen::{Fen, ParseFenError},
    game::{Click, Game, MoveResult, Phase},
    game_state::GameState,
    misc::strip_prefix_token,
    movement::{Move, ParseMoveError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Import(Fen),
    ExportFen,
    Coord(Coord),
    Move(Move),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn describe(result: &MoveResult) -> String {
    match result.captured {
        Some(piece) => format!("played {}, captured {piece}", result.movement),
        None => format!("played {}", result.movement),
    }
}
fn info(game: &Game, message: Option<&str>) -> Result<String, fmt::Error> {
    let mut info = String::new();
    if let Some(message) = message {
        writeln!(info, "{message}")?;
    }
    match game.phase() {
        Phase::Over(status) => write!(info, "{status}")?,
        Phase::AwaitingSelection | Phase::PieceSelected(_) => {
            let color = game.state().side_to_move();
            if is_in_check(game.state(), color) {
                write!(info, "{color} is in check, ")?;
            }
            write!(info, "{color} plays")?;
        }
    }
    Ok(info)
}
fn print_help(output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "flip           - flip the board")?;
    writeln!(output, "restart        - reset to starting position")?;
    writeln!(output, "quit           - quit the game")?;
    writeln!(output, "import <fen>   - import a position")?;
    writeln!(output, "fen            - export the position as fen")?;
    writeln!(output, "e2             - select a piece or move it")?;
    writeln!(output, "e2e4           - play the move")?;
    writeln!(output, "e7e8n          - move and promote")?;
    writeln!(output, "e1g1           - perform castling")?;
    Ok(())
}
/// What the prompt does after a command.
enum Flow {
    Redraw,
    Prompt,
    Quit,
}
struct Session {
    game: Game,
    view: Color,
    highlighted: Vec<Coord>,
    message: Option<String>,
}
impl Session {
    fn draw(&mut self, output: &mut impl Write) -> io::Result<()> {
        let text = info(&self.game, self.message.take().as_deref()).map_err(io::Error::other)?;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: self.game.state().board(),
                view: self.view,
                highlighted: &self.highlighted,
                last_move: self.game.last_move(),
                info: &text,
            },
        )
    }
    fn handle(
        &mut self,
        input: Input,
        output: &mut impl Write,
        error: &mut impl Write,
    ) -> io::Result<Flow> {
        match input {
            Input::Help => {
                print_help(output)?;
                return Ok(Flow::Prompt);
            }
            Input::Flip => self.view = !self.view,
            Input::Restart => {
                self.game.reset();
                self.highlighted.clear();
            }
            Input::Quit => return Ok(Flow::Quit),
            Input::Import(fen) => match GameState::try_from(fen) {
                Ok(state) => {
                    self.game = Game::from_state(state);
                    self.highlighted.clear();
                }
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    return Ok(Flow::Prompt);
                }
            },
            Input::ExportFen => {
                writeln!(output, "{}", Fen::from(*self.game.state()))?;
                return Ok(Flow::Prompt);
            }
            Input::Coord(position) => {
                self.highlighted.clear();
                match self.game.select(position) {
                    Ok(Click::Selected(position)) => {
                        self.highlighted.push(position);
                        self.highlighted.extend(self.game.legal_destinations(position));
                    }
                    Ok(Click::Deselected) => (),
                    Ok(Click::Moved(result)) => self.message = Some(describe(&result)),
                    Err(err) => writeln!(error, "Error: {err}")?,
                }
            }
            Input::Move(Move {
                origin,
                destination,
                promotion,
            }) => match self.game.request_move(origin, destination, promotion) {
                Ok(result) => {
                    self.highlighted.clear();
                    self.message = Some(describe(&result));
                }
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    return Ok(Flow::Prompt);
                }
            },
        }
        Ok(Flow::Redraw)
    }
}
/// Runs the interactive two-player session on stdin and stdout.
pub fn repl(view: Color, start: GameState) -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut session = Session {
        game: Game::from_state(start),
        view,
        highlighted: Vec::new(),
        message: Some("type `help` for instructions".to_owned()),
    };
    loop {
        session.draw(&mut output)?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let input = match text?.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            match session.handle(input, &mut output, &mut error)? {
                Flow::Redraw => break,
                Flow::Prompt => (),
                Flow::Quit => return Ok(()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseMoveError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseMoveError> for ParseInputError {
    fn from(value: ParseMoveError) -> Self {
        ParseInputError::Move(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        fen::Fen,
        game::{Game, MoveResult},
        game_state::GameState,
        movement::Move,
        piece::{Piece, PieceKind},
        repl::{Input, ParseInputError, describe, info},
        status::Status,
    };

    fn from_fen(fen: &str) -> Game {
        let state: GameState = fen.parse::<Fen>().unwrap().try_into().unwrap();
        Game::from_state(state)
    }

    #[test]
    fn parses_commands() {
        assert_eq!("help".parse::<Input>(), Ok(Input::Help));
        assert_eq!("flip".parse::<Input>(), Ok(Input::Flip));
        assert_eq!("e2".parse::<Input>(), Ok(Input::Coord(coord!("e2"))));
        let Ok(Input::Move(movement)) = "e7e8n".parse::<Input>() else {
            panic!("expected a move");
        };
        assert_eq!(movement.origin, coord!("e7"));
        assert_eq!(movement.promotion, Some(PieceKind::Knight));
        assert!(matches!(
            "import 4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Input>(),
            Ok(Input::Import(_))
        ));
    }
    #[test]
    fn rejects_garbage() {
        assert!(matches!("e9e4".parse::<Input>(), Err(ParseInputError::Move(_))));
        assert!(matches!(
            "import 4k3/8".parse::<Input>(),
            Err(ParseInputError::Fen(_))
        ));
    }
    #[test]
    fn info_reports_turn_and_check() {
        let game = Game::new();
        assert_eq!(info(&game, None).unwrap(), "white plays");
        let checked = from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
        assert_eq!(
            info(&checked, Some("played e3e2")).unwrap(),
            "played e3e2\nwhite is in check, white plays"
        );
    }
    #[test]
    fn describes_captures() {
        let result = MoveResult {
            movement: Move::new(coord!("e4"), coord!("d5")),
            captured: Some(Piece::new(Color::Black, PieceKind::Pawn)),
            status: Status::Continue,
        };
        assert_eq!(describe(&result), "played e4d5, captured black pawn");
    }
}
