use serde::{Deserialize, Serialize};
use std::fmt;

/// Which live surface is on top. Purely presentational: switching never
/// touches stored pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drawing surface hidden, text region focused.
    Typing,
    /// Drawing surface visible and receiving strokes.
    #[default]
    Drawing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Typing => f.write_str("typing"),
            Mode::Drawing => f.write_str("drawing"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ModeSwitch {
    mode: Mode,
}

impl ModeSwitch {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set(&mut self, mode: Mode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn drawing_visible(&self) -> bool {
        self.mode == Mode::Drawing
    }
}
