//! Random self-play cross-checked against the `chess` crate's move generator.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board_display::BoardDisplay,
    check::legal_moves,
    coord::Coord,
    error::MoveError,
    fen::Fen,
    game::{Game, Phase},
};

#[allow(
    clippy::cast_possible_truncation,
    reason = "file and rank indices are always below 8"
)]
impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        Coord::new(
            value.get_file().to_index() as u8,
            7 - value.get_rank().to_index() as u8,
        )
    }
}
/// A position where both move generators disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// A move accepted here but not by the `chess` crate.
    Extra {
        movement: (Coord, Coord),
        position: String,
    },
    /// A move the `chess` crate generates that is refused here.
    Missing {
        movement: (Coord, Coord),
        position: String,
    },
    /// A move listed by [`legal_moves`] that the game then refused to play.
    Refused {
        movement: (Coord, Coord),
        position: String,
        err: MoveError,
    },
    /// The `chess` crate refused the exported FEN.
    Rejected { position: String },
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Extra {
                movement: (origin, destination),
                position,
            } => write!(
                f,
                "found {origin}{destination} but it's not a legal move\n{position}"
            )?,
            Mismatch::Missing {
                movement: (origin, destination),
                position,
            } => write!(f, "{origin}{destination} not found\n{position}")?,
            Mismatch::Refused {
                movement: (origin, destination),
                position,
                err,
            } => write!(
                f,
                "{origin}{destination} was listed but refused: {err}\n{position}"
            )?,
            Mismatch::Rejected { position } => write!(f, "position rejected\n{position}")?,
        }
        Ok(())
    }
}
impl Error for Mismatch {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Mismatch::Refused { err, .. } => Some(err),
            _ => None,
        }
    }
}

fn describe(game: &Game) -> String {
    format!(
        "{}{}",
        BoardDisplay::new(game.state().board()),
        Fen::from(*game.state())
    )
}
/// Plays `plies` random moves, restarting whenever a game ends, and compares
/// the legal moves of every position with the `chess` crate's.
///
/// Promotions are compared by origin and destination only.
pub fn fuzz(plies: u64, seed: Option<u64>) -> Result<(), Mismatch> {
    let mut rng = seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
    let mut game = Game::new();
    let mut games = 1;
    for _ in 0..plies {
        if let Phase::Over(status) = game.phase() {
            log::debug!("game {games} ended: {status}");
            game.reset();
            games += 1;
        }
        let moves: FxHashSet<_> = legal_moves(game.state())
            .map(|movement| (movement.origin, movement.destination))
            .collect();
        let fen = Fen::from(*game.state()).to_string();
        let Ok(board) = fen.parse::<chess::Board>() else {
            return Err(Mismatch::Rejected {
                position: describe(&game),
            });
        };
        let expected: FxHashSet<(Coord, Coord)> = chess::MoveGen::new_legal(&board)
            .map(|movement| (movement.get_source().into(), movement.get_dest().into()))
            .collect();
        if let Some(movement) = moves.difference(&expected).next() {
            return Err(Mismatch::Extra {
                movement: *movement,
                position: describe(&game),
            });
        }
        if let Some(movement) = expected.difference(&moves).next() {
            return Err(Mismatch::Missing {
                movement: *movement,
                position: describe(&game),
            });
        }
        let moves: Box<[_]> = moves.into_iter().collect();
        let (origin, destination) = moves[rng.random_range(0..moves.len())];
        if let Err(err) = game.request_move(origin, destination, None) {
            log::error!("listed move {origin}{destination} was refused: {err}");
            return Err(Mismatch::Refused {
                movement: (origin, destination),
                position: describe(&game),
                err,
            });
        }
    }
    log::info!("{plies} plies over {games} games agree");
    Ok(())
}
#[cfg(test)]
mod test {
    use std::error::Error;

    use crate::{
        error::{IllegalMove, MoveError},
        fuzz::{Mismatch, fuzz},
    };

    #[test]
    fn agrees_with_chess_crate() {
        for seed in 0..3 {
            assert_eq!(fuzz(150, Some(seed)), Ok(()));
        }
    }
    #[test]
    fn refused_move_keeps_its_reason() {
        let mismatch = Mismatch::Refused {
            movement: (coord!("e2"), coord!("e4")),
            position: "start".to_string(),
            err: MoveError::IllegalMove(IllegalMove::LeavesKingInCheck),
        };
        let message = mismatch.to_string();
        assert!(message.starts_with("e2e4 was listed but refused: "));
        assert!(message.ends_with("\nstart"));
        assert!(mismatch.source().is_some());
        let extra = Mismatch::Extra {
            movement: (coord!("e2"), coord!("e4")),
            position: "start".to_string(),
        };
        assert!(extra.source().is_none());
    }
}
