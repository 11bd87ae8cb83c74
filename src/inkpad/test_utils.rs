//! Helpers shared by unit tests and, behind the `test_utils` feature, by
//! integration tests.

use crate::commands::strokes;
use crate::model::Point;
use crate::session::{HeadlessSession, Session};
use crate::store::mem_backend::MemBackend;
use crate::store::page_store::PageStore;
use crate::surface::canvas::Canvas;
use crate::surface::rich_text::RichText;

pub const TEST_KEY: &str = "testNotebook";

/// Side length of the canvas used by [`mem_session`].
pub const TEST_CANVAS: u32 = 64;

pub fn mem_session() -> HeadlessSession<MemBackend> {
    mem_session_with(MemBackend::new())
}

pub fn mem_session_with(backend: MemBackend) -> HeadlessSession<MemBackend> {
    let store = PageStore::load(backend, TEST_KEY);
    Session::new(
        store,
        Canvas::new(TEST_CANVAS, TEST_CANVAS, 2.0),
        RichText::new(),
    )
}

/// One full pointer gesture: down at `from`, move to `to`, up.
pub fn draw_line(session: &mut HeadlessSession<MemBackend>, from: (f32, f32), to: (f32, f32)) {
    strokes::stroke_start(session, Point::new(from.0, from.1)).unwrap();
    strokes::stroke_move(session, Point::new(to.0, to.1)).unwrap();
    strokes::stroke_end(session).unwrap();
}
