use serde::{Deserialize, Serialize};

/// The slice of a canvas 2D context the board draws with.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_font(&mut self, font: &str);
    fn set_fill_style(&mut self, style: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64));
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64);
}

/// A recorded draw call, tagged by `op` so a browser can replay it on a canvas.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Font {
        font: String,
    },
    FillStyle {
        style: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    StrokeCircle {
        x: f64,
        y: f64,
        radius: f64,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Recorder {
    commands: Vec<Command>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for Recorder {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(Command::Font { font: font.into() });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(Command::FillStyle {
            style: style.into(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(Command::FillText {
            text: text.into(),
            x,
            y,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_line(&mut self, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) {
        self.commands.push(Command::StrokeLine { x1, y1, x2, y2 });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(Command::StrokeCircle { x, y, radius });
    }
}
