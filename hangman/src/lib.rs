mod board;
mod game;
mod round;
mod surface;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use board::{Board, Part};
pub use game::{Game, Guess, Ignored, RoundResult, ERROR_BUDGET};
pub use round::{Round, Turn};
pub use surface::{Command, Recorder, Surface};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("secret words must be non-empty and consist of ASCII letters - {0:?} is not valid")]
    InvalidWord(String),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateRoundResponse {
    pub id: Uuid,
    pub word: String,
    pub errors_left: u8,
    pub draw: Vec<Command>,
}

impl CreateRoundResponse {
    pub fn new(id: Uuid, round: &Round, draw: Recorder) -> Self {
        Self {
            id,
            word: round.game().display_word(),
            errors_left: round.game().errors_left(),
            draw: draw.into_commands(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpdateRoundRequest {
    pub letter: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoundResponse {
    pub word: String,
    pub errors_left: u8,
    pub wrong: String,
    pub result: RoundResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Ignored>,
    pub draw: Vec<Command>,
}

impl RoundResponse {
    pub fn new(round: &Round, draw: Recorder) -> Self {
        let game = round.game();
        Self {
            word: game.display_word(),
            errors_left: game.errors_left(),
            wrong: game.wrong_letters().collect(),
            result: game.result(),
            ignored: None,
            draw: draw.into_commands(),
        }
    }

    pub fn turn(round: &Round, turn: Turn, draw: Recorder) -> Self {
        let ignored = match turn {
            Turn::Ignored(reason) => Some(reason),
            Turn::Continue | Turn::Won | Turn::Lost => None,
        };

        Self {
            ignored,
            ..Self::new(round, draw)
        }
    }
}
