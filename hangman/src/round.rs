use crate::{
    board::Board,
    game::{Game, Guess, Ignored, RoundResult},
    surface::Surface,
    Error,
};

/// What a single key press did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Ignored(Ignored),
    Continue,
    Won,
    Lost,
}

/// A round in play: the game state together with the board that displays it.
#[derive(Clone, Debug)]
pub struct Round {
    game: Game,
    board: Board,
}

impl Round {
    pub fn new(word: impl Into<String>) -> Result<Self, Error> {
        let game = Game::new(word)?;
        let board = Board::new(game.word());
        Ok(Self { game, board })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Evaluates one key and draws its consequences onto `surface`.
    ///
    /// Ignored keys draw nothing. A decisive key draws its letter first and then the end screen.
    pub fn press(&mut self, key: char, surface: &mut impl Surface) -> Turn {
        match self.game.evaluate_guess(key) {
            Guess::Ignored(reason) => return Turn::Ignored(reason),
            Guess::Correct { positions, .. } => {
                for idx in positions {
                    self.board.reveal(idx, surface);
                }
            }
            Guess::Wrong {
                letter,
                errors_left,
            } => self.board.write_wrong_letter(letter, errors_left, surface),
        }

        match self.game.result() {
            RoundResult::InProgress => Turn::Continue,
            RoundResult::Won => {
                self.board.winner(surface);
                Turn::Won
            }
            RoundResult::Lost => {
                self.board.game_over(surface);
                Turn::Lost
            }
        }
    }

    pub fn redraw(&self, surface: &mut impl Surface) {
        self.board.redraw(&self.game, surface);
    }
}
