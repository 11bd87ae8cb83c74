//! # Session
//!
//! All mutable notebook state lives here: the page store, the two live
//! surfaces, the current ink color, the display mode and the page counter.
//! One `Session` is owned by the application root (see [`crate::api`]) and
//! passed by reference to every command, so there is no hidden global state.

use crate::config::InkpadConfig;
use crate::input::Bounds;
use crate::mode::{Mode, ModeSwitch};
use crate::model::{Color, PageCounter};
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;
use crate::surface::canvas::Canvas;
use crate::surface::rich_text::RichText;
use crate::surface::{DrawingSurface, TextSurface};

pub struct Session<B: StorageBackend, D: DrawingSurface, T: TextSurface> {
    pub(crate) store: PageStore<B>,
    pub(crate) drawing: D,
    pub(crate) text: T,
    pub(crate) mode: ModeSwitch,
    pub(crate) color: Color,
    pub(crate) bounds: Bounds,
    pub(crate) counter: PageCounter,
    pub(crate) mode_keys_while_typing: bool,
}

impl<B: StorageBackend, D: DrawingSurface, T: TextSurface> Session<B, D, T> {
    /// Assemble a session around an already loaded store.
    ///
    /// Nothing is materialized yet; call [`crate::commands::pages::open`]
    /// to run the startup sequence.
    pub fn new(store: PageStore<B>, drawing: D, text: T) -> Self {
        let (width, height) = drawing.size();
        let counter = store.counter_at(store.active());
        Self {
            store,
            drawing,
            text,
            mode: ModeSwitch::default(),
            color: Color::default(),
            bounds: Bounds::at_origin(width, height),
            counter,
            mode_keys_while_typing: false,
        }
    }

    pub fn with_mode_keys_while_typing(mut self, enabled: bool) -> Self {
        self.mode_keys_while_typing = enabled;
        self
    }

    pub fn store(&self) -> &PageStore<B> {
        &self.store
    }

    pub fn drawing(&self) -> &D {
        &self.drawing
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The counter as last refreshed by a page load.
    pub fn page_counter(&self) -> PageCounter {
        self.counter
    }
}

/// The session every production client runs: headless surfaces sized from
/// the configuration.
pub type HeadlessSession<B> = Session<B, Canvas, RichText>;

pub fn headless<B: StorageBackend>(backend: B, config: &InkpadConfig) -> HeadlessSession<B> {
    let store = PageStore::load(backend, config.storage_key.clone());
    let canvas = Canvas::new(config.canvas_width, config.canvas_height, config.stroke_width);
    Session::new(store, canvas, RichText::new())
        .with_mode_keys_while_typing(config.mode_keys_while_typing)
}
