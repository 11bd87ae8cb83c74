//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every client
//! (the CLI, a replayed event log, a GUI host) drives the notebook through
//! [`InkpadApi`].
//!
//! The facade:
//! - **Owns** the [`Session`] and the export collaborators
//! - **Dispatches** to the appropriate command function
//! - **Routes** raw [`InputEvent`]s through [`route_key`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no notebook logic of its own.
//!
//! ## Generic Over Backends and Surfaces
//!
//! `InkpadApi<B, D, T>` is generic over the storage backend and both live
//! surfaces:
//! - Production: `InkpadApi<FsBackend, Canvas, RichText>`
//! - Testing: `InkpadApi<MemBackend, Canvas, RichText>`

use crate::commands::{self, CmdResult};
use crate::config::InkpadConfig;
use crate::error::Result;
use crate::export::{ExportSink, PageRasterizer};
use crate::input::{route_key, Action, Bounds, InputEvent, PointerInput};
use crate::model::Color;
use crate::session::Session;
use crate::store::StorageBackend;
use crate::surface::{DrawingSurface, TextSurface};
use tracing::debug;

pub struct InkpadApi<B: StorageBackend, D: DrawingSurface, T: TextSurface> {
    session: Session<B, D, T>,
    rasterizer: Box<dyn PageRasterizer>,
    sink: Box<dyn ExportSink>,
    pdf_file_name: String,
    page_width_mm: f32,
}

impl<B: StorageBackend, D: DrawingSurface, T: TextSurface> InkpadApi<B, D, T> {
    pub fn new(
        session: Session<B, D, T>,
        rasterizer: Box<dyn PageRasterizer>,
        sink: Box<dyn ExportSink>,
        config: &InkpadConfig,
    ) -> Self {
        Self {
            session,
            rasterizer,
            sink,
            pdf_file_name: config.pdf_file_name.clone(),
            page_width_mm: config.page_width_mm,
        }
    }

    pub fn session(&self) -> &Session<B, D, T> {
        &self.session
    }

    pub fn summaries(&self) -> Vec<commands::pages::PageSummary> {
        commands::pages::summarize(&self.session.store)
    }

    /// Startup: materialize the first page and focus the text region.
    pub fn open(&mut self) -> Result<CmdResult> {
        commands::pages::open(&mut self.session)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        commands::pages::save_active(&mut self.session)
    }

    pub fn new_page(&mut self) -> Result<CmdResult> {
        commands::pages::new_page(&mut self.session)
    }

    pub fn next_page(&mut self) -> Result<CmdResult> {
        commands::pages::next(&mut self.session)
    }

    pub fn prev_page(&mut self) -> Result<CmdResult> {
        commands::pages::prev(&mut self.session)
    }

    /// Jump to a page by its 1-based number.
    pub fn go_to_page(&mut self, number: usize) -> Result<CmdResult> {
        match number.checked_sub(1) {
            Some(index) => commands::pages::go_to(&mut self.session, index),
            None => Ok(CmdResult::default()),
        }
    }

    pub fn clear_page(&mut self) -> Result<CmdResult> {
        commands::pages::clear(&mut self.session)
    }

    pub fn set_color(&mut self, color: Color) -> Result<CmdResult> {
        commands::typing::set_color(&mut self.session, color)
    }

    pub fn type_text(&mut self, text: &str) -> Result<CmdResult> {
        commands::typing::type_text(&mut self.session, text)
    }

    pub fn enable_typing(&mut self) -> Result<CmdResult> {
        commands::mode::enable_typing(&mut self.session)
    }

    pub fn enable_drawing(&mut self) -> Result<CmdResult> {
        commands::mode::enable_drawing(&mut self.session)
    }

    pub fn export_page_image(&mut self) -> Result<CmdResult> {
        commands::export::export_page_image(
            &mut self.session,
            self.rasterizer.as_ref(),
            self.sink.as_mut(),
        )
    }

    pub fn export_pdf(&mut self) -> Result<CmdResult> {
        commands::export::export_all_pages_pdf(
            &mut self.session,
            self.rasterizer.as_ref(),
            self.sink.as_mut(),
            &self.pdf_file_name,
            self.page_width_mm,
        )
    }

    /// Feed one host input event through the router.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<CmdResult> {
        match event {
            InputEvent::Key(key) => {
                let action = route_key(
                    &key,
                    self.session.mode(),
                    self.session.text.is_focused(),
                    self.session.mode_keys_while_typing,
                );
                match action {
                    Some(action) => self.perform(action),
                    None => {
                        debug!(key = %key.key, "key not handled");
                        Ok(CmdResult::default())
                    }
                }
            }
            InputEvent::Text { text } => self.type_text(&text),
            InputEvent::PointerDown(pointer) => self.pointer(pointer, true),
            InputEvent::PointerMove(pointer) => self.pointer(pointer, false),
            InputEvent::PointerUp => commands::strokes::stroke_end(&mut self.session),
            InputEvent::Layout(bounds) => self.layout(bounds),
            InputEvent::Next => self.next_page(),
            InputEvent::Prev => self.prev_page(),
            InputEvent::Clear => self.clear_page(),
            InputEvent::ExportPage => self.export_page_image(),
        }
    }

    pub fn perform(&mut self, action: Action) -> Result<CmdResult> {
        debug!(?action, "performing");
        match action {
            Action::SetColor(color) => self.set_color(color),
            Action::NewPage => self.new_page(),
            Action::ExportPdf => self.export_pdf(),
            Action::NextPage => self.next_page(),
            Action::PrevPage => self.prev_page(),
            Action::EnableTyping => self.enable_typing(),
            Action::EnableDrawing => self.enable_drawing(),
            Action::ReleaseFocus => commands::mode::release_focus(&mut self.session),
            Action::Type(text) => self.type_text(&text),
        }
    }

    fn pointer(&mut self, pointer: PointerInput, down: bool) -> Result<CmdResult> {
        let Some(point) = pointer.normalize(&self.session.bounds) else {
            debug!("pointer event without a position");
            return Ok(CmdResult::default());
        };
        if down {
            commands::strokes::stroke_start(&mut self.session, point)
        } else {
            commands::strokes::stroke_move(&mut self.session, point)
        }
    }

    fn layout(&mut self, bounds: Bounds) -> Result<CmdResult> {
        commands::strokes::resize(&mut self.session, bounds)
    }
}
