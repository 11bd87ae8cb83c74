use serde::{Deserialize, Serialize};
use std::fmt;

/// One notebook page as it is persisted.
///
/// `text` is the rich-text markup of the typing area, passed through untouched.
/// `drawing` is a self-contained PNG data URI, or `None` for a page that was
/// never snapshotted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub drawing: Option<String>,
}

impl PageRecord {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.drawing.is_none()
    }
}

/// Ink colors reachable from the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    Red,
    Blue,
    Green,
}

impl Color {
    /// CSS keyword used in text markup.
    pub fn css_name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
        }
    }

    /// Inverse of [`Color::css_name`], ignoring case.
    pub fn from_css_name(name: &str) -> Option<Color> {
        match name.trim().to_ascii_lowercase().as_str() {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            _ => None,
        }
    }

    /// Opaque RGBA of the named CSS color.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Color::Black => [0, 0, 0, 255],
            Color::Red => [255, 0, 0, 255],
            Color::Blue => [0, 0, 255, 255],
            Color::Green => [0, 128, 0, 255],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A position in drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The "Page N of M" display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounter {
    /// Zero-based index of the materialized page.
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for PageCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current + 1, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_page_serializes_with_null_drawing() {
        let json = serde_json::to_string(&PageRecord::blank()).unwrap();
        assert_eq!(json, r#"{"text":"","drawing":null}"#);
    }

    #[test]
    fn missing_fields_default_to_blank() {
        let page: PageRecord = serde_json::from_str("{}").unwrap();
        assert!(page.is_blank());

        let page: PageRecord = serde_json::from_str(r#"{"text":"<b>x</b>"}"#).unwrap();
        assert_eq!(page.text, "<b>x</b>");
        assert_eq!(page.drawing, None);
    }

    #[test]
    fn counter_is_one_based() {
        let counter = PageCounter {
            current: 0,
            total: 3,
        };
        assert_eq!(counter.to_string(), "Page 1 of 3");
    }

    #[test]
    fn green_is_css_green() {
        assert_eq!(Color::Green.rgba(), [0, 128, 0, 255]);
        assert_eq!(Color::Green.to_string(), "green");
        assert_eq!(Color::from_css_name(" Green "), Some(Color::Green));
        assert_eq!(Color::from_css_name("teal"), None);
    }
}
