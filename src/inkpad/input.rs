//! # Input Router
//!
//! Host input arrives as [`InputEvent`]s: keyboard shortcuts, typed text,
//! pointer gestures and layout changes. Key handling is a pure function,
//! [`route_key`], that maps a key press to an [`Action`] given the current
//! mode and focus. [`crate::api::InkpadApi::handle_event`] performs the
//! resulting actions.
//!
//! Events serialize as internally tagged JSON so a recorded session can be
//! replayed one event per line:
//!
//! ```text
//! {"type":"key","key":"r","alt":true}
//! {"type":"pointer_down","client_x":12.0,"client_y":40.0}
//! {"type":"pointer_move","touches":[{"client_x":30.0,"client_y":44.0}]}
//! {"type":"pointer_up"}
//! ```

use crate::mode::Mode;
use crate::model::{Color, Point};
use serde::{Deserialize, Serialize};

/// On-screen bounding box of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn at_origin(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyEvent {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            alt: false,
            ctrl: false,
            meta: false,
        }
    }

    pub fn alt(key: impl Into<String>) -> Self {
        Self {
            alt: true,
            ..Self::plain(key)
        }
    }

    fn unmodified(&self) -> bool {
        !(self.alt || self.ctrl || self.meta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Position data of a mouse or touch event, in client coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub touches: Vec<TouchPoint>,
}

impl PointerInput {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            client_x: Some(x),
            client_y: Some(y),
            touches: Vec::new(),
        }
    }

    pub fn touch(points: &[(f32, f32)]) -> Self {
        Self {
            touches: points
                .iter()
                .map(|&(client_x, client_y)| TouchPoint { client_x, client_y })
                .collect(),
            ..Self::default()
        }
    }

    /// Surface-local position. The first touch point wins over mouse
    /// coordinates; an event with neither has no position.
    pub fn normalize(&self, bounds: &Bounds) -> Option<Point> {
        let (x, y) = match self.touches.first() {
            Some(touch) => (touch.client_x, touch.client_y),
            None => (self.client_x?, self.client_y?),
        };
        let point = Point::new(x - bounds.left, y - bounds.top);
        point.is_finite().then_some(point)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Key(KeyEvent),
    Text { text: String },
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp,
    Layout(Bounds),
    Next,
    Prev,
    Clear,
    ExportPage,
}

/// What a key press asks the notebook to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetColor(Color),
    NewPage,
    ExportPdf,
    NextPage,
    PrevPage,
    EnableTyping,
    EnableDrawing,
    ReleaseFocus,
    Type(String),
}

/// Map a key press to an action.
///
/// `t` and `d` switch modes, except while typing into the focused text
/// region where they are ordinary letters (unless `mode_keys_while_typing`).
pub fn route_key(
    event: &KeyEvent,
    mode: Mode,
    text_focused: bool,
    mode_keys_while_typing: bool,
) -> Option<Action> {
    if event.alt && !event.ctrl && !event.meta {
        return route_alt(&event.key);
    }
    if !event.unmodified() {
        return None;
    }

    let typing = mode == Mode::Typing && text_focused && !mode_keys_while_typing;
    match event.key.as_str() {
        "t" if !typing => Some(Action::EnableTyping),
        "d" if !typing => Some(Action::EnableDrawing),
        "Escape" => Some(Action::ReleaseFocus),
        _ if text_focused => typed_text(&event.key).map(Action::Type),
        _ => None,
    }
}

fn route_alt(key: &str) -> Option<Action> {
    let action = match key {
        "ArrowRight" => Action::NextPage,
        "ArrowLeft" => Action::PrevPage,
        _ => match key.to_lowercase().as_str() {
            "r" => Action::SetColor(Color::Red),
            "b" => Action::SetColor(Color::Black),
            "u" => Action::SetColor(Color::Blue),
            "g" => Action::SetColor(Color::Green),
            "n" => Action::NewPage,
            "p" => Action::ExportPdf,
            _ => return None,
        },
    };
    Some(action)
}

// Printable keys carry their character; named keys other than Enter and Tab
// insert nothing.
fn typed_text(key: &str) -> Option<String> {
    match key {
        "Enter" => Some("\n".to_string()),
        "Tab" => Some("\t".to_string()),
        _ if key.chars().count() == 1 => Some(key.to_string()),
        _ => None,
    }
}
