use hashbrown::HashSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Wrong guesses allowed before the round is lost.
pub const ERROR_BUDGET: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    InProgress,
    Won,
    Lost,
}

/// Why a key press had no effect on the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ignored {
    NotALetter,
    AlreadyGuessed,
    RoundOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guess {
    Ignored(Ignored),
    Correct { letter: char, positions: Vec<usize> },
    Wrong { letter: char, errors_left: u8 },
}

#[derive(Clone, Debug)]
pub struct Game {
    word: String,
    correct: HashSet<u8>,
    // Kept in guess order so the tally can be redrawn.
    incorrect: Vec<u8>,
}

impl Game {
    pub fn new(word: impl Into<String>) -> Result<Self, Error> {
        let word = word.into();
        if word.is_empty() || !word.bytes().all(|u| u.is_ascii_alphabetic()) {
            return Err(Error::InvalidWord(word));
        }

        Ok(Self {
            word: word.to_ascii_lowercase(),
            correct: HashSet::new(),
            incorrect: Vec::new(),
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Evaluates a single key press.
    ///
    /// Letters are case-insensitive. Anything that is not an ASCII letter, a letter that has
    /// already been tried, or any key once the round is decided leaves the game untouched.
    pub fn evaluate_guess(&mut self, key: char) -> Guess {
        if !key.is_ascii_alphabetic() {
            trace!("ignoring non-letter key {key:?}");
            return Guess::Ignored(Ignored::NotALetter);
        }

        if self.result() != RoundResult::InProgress {
            trace!("ignoring {key:?}, round is over");
            return Guess::Ignored(Ignored::RoundOver);
        }

        let guess = (key as u8).to_ascii_lowercase();
        if self.is_guessed(guess) {
            trace!("ignoring repeated letter {:?}", guess as char);
            return Guess::Ignored(Ignored::AlreadyGuessed);
        }

        if self.word.bytes().any(|u| u == guess) {
            self.correct.insert(guess);
            let positions = self.positions(guess);
            debug!("correct guess {:?} at {positions:?}", guess as char);
            Guess::Correct {
                letter: guess as char,
                positions,
            }
        } else {
            self.incorrect.push(guess);
            let errors_left = self.errors_left();
            debug!("wrong guess {:?}, {errors_left} errors left", guess as char);
            Guess::Wrong {
                letter: guess as char,
                errors_left,
            }
        }
    }

    pub fn is_won(&self) -> bool {
        self.word.bytes().all(|u| self.correct.contains(&u))
    }

    pub fn is_lost(&self) -> bool {
        self.errors_left() == 0
    }

    pub fn result(&self) -> RoundResult {
        if self.is_lost() {
            RoundResult::Lost
        } else if self.is_won() {
            RoundResult::Won
        } else {
            RoundResult::InProgress
        }
    }

    pub fn errors_left(&self) -> u8 {
        ERROR_BUDGET.saturating_sub(self.errors_used())
    }

    pub fn errors_used(&self) -> u8 {
        self.incorrect.len() as u8
    }

    pub fn wrong_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.incorrect.iter().map(|&u| u as char)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.word
            .as_bytes()
            .get(index)
            .map_or(false, |u| self.correct.contains(u))
    }

    pub fn masked_word(&self) -> String {
        self.word
            .bytes()
            .map(|u| if self.correct.contains(&u) { u } else { b'_' } as char)
            .collect()
    }

    /// The word as a player may see it: masked until the round is decided.
    pub fn display_word(&self) -> String {
        match self.result() {
            RoundResult::InProgress => self.masked_word(),
            RoundResult::Won | RoundResult::Lost => self.word.clone(),
        }
    }

    fn is_guessed(&self, u: u8) -> bool {
        self.correct.contains(&u) || self.incorrect.contains(&u)
    }

    fn positions(&self, u: u8) -> Vec<usize> {
        self.word
            .bytes()
            .enumerate()
            .filter_map(|(idx, w)| (w == u).then(|| idx))
            .collect()
    }
}
