//! # Command Layer
//!
//! Pure notebook logic. Every command takes the [`Session`] by reference,
//! operates on Rust types and returns a [`CmdResult`]. No command writes to
//! stdout or assumes a terminal.
//!
//! - [`pages`]: startup, save, materialize, new/next/prev, clear
//! - [`strokes`]: pointer strokes and surface resizing
//! - [`typing`]: text input and color selection
//! - [`mode`]: typing/drawing mode switch
//! - [`export`]: PNG and PDF export
//!
//! [`Session`]: crate::session::Session

use crate::export::ExportReceipt;
use crate::model::PageCounter;

pub mod export;
pub mod mode;
pub mod pages;
pub mod strokes;
pub mod typing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Whether the page collection was written to storage.
    pub persisted: bool,
    /// Set when a page was materialized and the counter refreshed.
    pub counter: Option<PageCounter>,
    pub exports: Vec<ExportReceipt>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_counter(mut self, counter: PageCounter) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn persisted(mut self) -> Self {
        self.persisted = true;
        self
    }

    /// Fold a follow-up result into this one.
    pub fn merge(&mut self, other: CmdResult) {
        self.persisted |= other.persisted;
        if other.counter.is_some() {
            self.counter = other.counter;
        }
        self.exports.extend(other.exports);
        self.messages.extend(other.messages);
    }
}
