use crate::{
    game::{Game, RoundResult, ERROR_BUDGET},
    surface::Surface,
};

const CANVAS_WIDTH: f64 = 800.0;
const CANVAS_HEIGHT: f64 = 500.0;

const BOARD_FONT: &str = "48px Arial";
const BANNER_FONT: &str = "60px Arial";

const BLANK_X: f64 = 200.0;
const BLANK_Y: f64 = 450.0;
const BLANK_WIDTH: f64 = 50.0;
const BLANK_GAP: f64 = 20.0;
const LETTER_Y: f64 = 440.0;
const LETTER_INSET: f64 = 10.0;

const TALLY_X: f64 = 500.0;
const TALLY_Y: f64 = 100.0;
const TALLY_GAP: f64 = 30.0;
const INDICATOR_Y: f64 = 170.0;

const BANNER_X: f64 = 250.0;
const BANNER_Y: f64 = 250.0;

/// The pieces of the gallows and the figure, in the order wrong guesses reveal them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Base,
    Pole,
    Beam,
    Rope,
    Head,
    Body,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

impl Part {
    pub const ALL: [Part; ERROR_BUDGET as usize] = [
        Part::Base,
        Part::Pole,
        Part::Beam,
        Part::Rope,
        Part::Head,
        Part::Body,
        Part::RightArm,
        Part::LeftArm,
        Part::RightLeg,
        Part::LeftLeg,
    ];

    pub fn nth(index: usize) -> Option<Part> {
        Self::ALL.get(index).copied()
    }

    fn draw(self, surface: &mut impl Surface) {
        match self {
            Part::Base => surface.fill_rect(150.0, 400.0, 100.0, 10.0),
            Part::Pole => surface.fill_rect(190.0, 100.0, 10.0, 300.0),
            Part::Beam => surface.fill_rect(190.0, 100.0, 150.0, 10.0),
            Part::Rope => surface.fill_rect(330.0, 100.0, 10.0, 50.0),
            Part::Head => surface.stroke_circle(335.0, 180.0, 30.0),
            Part::Body => surface.fill_rect(330.0, 210.0, 10.0, 100.0),
            Part::RightArm => surface.fill_rect(330.0, 310.0, 40.0, 10.0),
            Part::LeftArm => surface.fill_rect(290.0, 310.0, 40.0, 10.0),
            Part::RightLeg => surface.fill_rect(330.0, 310.0, 10.0, 80.0),
            Part::LeftLeg => surface.fill_rect(290.0, 310.0, 10.0, 80.0),
        }
    }
}

/// Draws a round onto a canvas-like surface.
///
/// The board only remembers the letters of the secret word; everything else it draws is handed
/// to it by the caller.
#[derive(Clone, Debug)]
pub struct Board {
    letters: Vec<char>,
}

impl Board {
    pub fn new(word: &str) -> Self {
        Self {
            letters: word.chars().collect(),
        }
    }

    /// Clears the canvas and draws one blank per letter.
    pub fn create(&self, surface: &mut impl Surface) {
        surface.clear_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
        surface.set_font(BOARD_FONT);
        surface.set_fill_style("black");

        for idx in 0..self.letters.len() {
            let x = blank_x(idx);
            surface.stroke_line((x, BLANK_Y), (x + BLANK_WIDTH, BLANK_Y));
        }
    }

    /// Writes the secret word's letter above the blank at `index`.
    pub fn reveal(&self, index: usize, surface: &mut impl Surface) {
        if let Some(letter) = self.letters.get(index) {
            let mut buf = [0; 4];
            surface.fill_text(
                letter.encode_utf8(&mut buf),
                blank_x(index) + LETTER_INSET,
                LETTER_Y,
            );
        }
    }

    /// Adds a wrong letter to the tally, updates the remaining-attempts indicator and draws the
    /// next part of the figure.
    pub fn write_wrong_letter(&self, letter: char, errors_left: u8, surface: &mut impl Surface) {
        if let Some(slot) = slot_for(errors_left) {
            write_tally(slot, letter, surface);
        }
        write_errors_left(errors_left, surface);
        self.draw_hangman(errors_left, surface);
    }

    /// Draws the part matching the number of errors spent so far.
    pub fn draw_hangman(&self, errors_left: u8, surface: &mut impl Surface) {
        if let Some(part) = slot_for(errors_left).and_then(Part::nth) {
            part.draw(surface);
        }
    }

    pub fn game_over(&self, surface: &mut impl Surface) {
        banner("Game Over!", "red", surface);
    }

    pub fn winner(&self, surface: &mut impl Surface) {
        banner("You Win!", "green", surface);
    }

    /// Draws the whole round from scratch.
    pub fn redraw(&self, game: &Game, surface: &mut impl Surface) {
        match game.result() {
            RoundResult::Won => return self.winner(surface),
            RoundResult::Lost => return self.game_over(surface),
            RoundResult::InProgress => {}
        }

        self.create(surface);

        for idx in (0..self.letters.len()).filter(|&idx| game.is_revealed(idx)) {
            self.reveal(idx, surface);
        }

        for (slot, letter) in game.wrong_letters().enumerate() {
            write_tally(slot, letter, surface);
            if let Some(part) = Part::nth(slot) {
                part.draw(surface);
            }
        }

        if game.errors_used() > 0 {
            write_errors_left(game.errors_left(), surface);
        }
    }
}

fn blank_x(index: usize) -> f64 {
    BLANK_X + index as f64 * (BLANK_WIDTH + BLANK_GAP)
}

// Slot 0 belongs to the first wrong guess.
fn slot_for(errors_left: u8) -> Option<usize> {
    ERROR_BUDGET
        .checked_sub(errors_left)
        .and_then(|used| used.checked_sub(1))
        .map(usize::from)
}

fn write_tally(slot: usize, letter: char, surface: &mut impl Surface) {
    let mut buf = [0; 4];
    surface.fill_text(
        letter.encode_utf8(&mut buf),
        TALLY_X + slot as f64 * TALLY_GAP,
        TALLY_Y,
    );
}

fn write_errors_left(errors_left: u8, surface: &mut impl Surface) {
    surface.clear_rect(TALLY_X, TALLY_Y + 15.0, CANVAS_WIDTH - TALLY_X, 60.0);
    surface.fill_text(&format!("{errors_left} left"), TALLY_X, INDICATOR_Y);
}

fn banner(text: &str, style: &str, surface: &mut impl Surface) {
    surface.clear_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    surface.set_font(BANNER_FONT);
    surface.set_fill_style(style);
    surface.fill_text(text, BANNER_X, BANNER_Y);
}
