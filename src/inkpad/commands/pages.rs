use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PageRecord;
use crate::session::Session;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;
use crate::surface::rich_text::plain_text;
use crate::surface::{DrawingSurface, TextSurface};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// Never snapshotted.
    Missing,
    Blank,
    Present,
    Unreadable,
}

/// One line of the notebook overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// 1-based.
    pub number: usize,
    pub active: bool,
    pub text: String,
    pub ink: Ink,
}

/// Startup sequence: materialize the active page and focus the text region.
pub fn open<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let active = session.store.active();
    let result = load_page(session, active)?;
    session.text.focus();
    Ok(result)
}

/// Capture both live surfaces into the active record and persist the whole
/// collection. No dirty check.
pub fn save_active<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let record = PageRecord {
        text: session.text.serialize(),
        drawing: Some(session.drawing.snapshot()?),
    };
    session.store.record_active(record)?;
    debug!(page = session.store.active(), "active page saved");
    Ok(CmdResult::default().persisted())
}

/// Materialize the record at `index` into the live surfaces.
///
/// An out-of-range index is a silent no-op. A drawing that fails to decode
/// leaves the surface blank.
pub fn load_page<B, D, T>(session: &mut Session<B, D, T>, index: usize) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let Some(page) = session.store.page(index) else {
        debug!(index, pages = session.store.len(), "page index out of range");
        return Ok(CmdResult::default());
    };
    let (text, drawing) = (page.text.clone(), page.drawing.clone());

    let mut result = CmdResult::default();
    session.text.set_content(&text);
    session.drawing.clear();
    if let Some(encoded) = drawing {
        if let Err(e) = session.drawing.restore(&encoded) {
            warn!(page = index + 1, error = %e, "stored drawing could not be decoded");
            session.drawing.clear();
            result.add_message(CmdMessage::warning(format!(
                "Drawing on page {} could not be restored",
                index + 1
            )));
        }
    }

    session.counter = session.store.counter_at(index);
    debug!(counter = %session.counter, "page materialized");
    Ok(result.with_counter(session.counter))
}

pub fn new_page<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let mut result = save_active(session)?;
    let index = session.store.append_blank()?;
    result.merge(load_page(session, index)?);
    result.add_message(CmdMessage::success(format!("Created page {}", index + 1)));
    Ok(result)
}

pub fn next<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if session.store.is_last() {
        return Ok(CmdResult::default());
    }
    let mut result = save_active(session)?;
    session.store.advance();
    let active = session.store.active();
    result.merge(load_page(session, active)?);
    Ok(result)
}

pub fn prev<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if session.store.active() == 0 {
        return Ok(CmdResult::default());
    }
    let mut result = save_active(session)?;
    session.store.retreat();
    let active = session.store.active();
    result.merge(load_page(session, active)?);
    Ok(result)
}

/// Save, then make `index` the active page. Out of range is a no-op.
pub fn go_to<B, D, T>(session: &mut Session<B, D, T>, index: usize) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if index == session.store.active() || index >= session.store.len() {
        return Ok(CmdResult::default());
    }
    let mut result = save_active(session)?;
    session.store.select(index);
    result.merge(load_page(session, index)?);
    Ok(result)
}

/// Blank both surfaces of the active page and persist immediately.
/// There is no undo.
pub fn clear<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    session.text.set_content("");
    session.drawing.clear();
    let mut result = save_active(session)?;
    result.add_message(CmdMessage::info(format!(
        "Cleared page {}",
        session.store.active() + 1
    )));
    Ok(result)
}

/// Overview of every stored page, as last persisted.
pub fn summarize<B: StorageBackend>(store: &PageStore<B>) -> Vec<PageSummary> {
    store
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| PageSummary {
            number: index + 1,
            active: index == store.active(),
            text: plain_text(&page.text),
            ink: match &page.drawing {
                None => Ink::Missing,
                Some(encoded) => match codec::decode_data_uri(encoded) {
                    Ok(image) if image.pixels().any(|p| p[3] > 0) => Ink::Present,
                    Ok(_) => Ink::Blank,
                    Err(_) => Ink::Unreadable,
                },
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::HeadlessSession;
    use crate::store::mem_backend::MemBackend;
    use crate::surface::canvas::Canvas;
    use crate::test_utils::{draw_line, mem_session, mem_session_with, TEST_KEY};

    #[test]
    fn open_on_empty_storage_shows_single_blank_page() {
        let mut session = mem_session();
        let result = open(&mut session).unwrap();

        assert_eq!(session.store.pages(), &[PageRecord::blank()]);
        assert_eq!(session.store.active(), 0);
        assert_eq!(result.counter.unwrap().to_string(), "Page 1 of 1");
        assert!(session.text.is_focused());
        assert!(!result.persisted);
    }

    #[test]
    fn new_page_keeps_previous_text_and_adds_blank() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("hello");

        let result = new_page(&mut session).unwrap();
        assert_eq!(session.store.len(), 2);
        assert_eq!(session.store.active(), 1);
        assert!(session.store.page(0).unwrap().text.contains("hello"));
        assert!(session.store.page(1).unwrap().is_blank());
        assert_eq!(session.text.serialize(), "");
        assert!(session.drawing.is_blank());
        assert_eq!(result.counter.unwrap().to_string(), "Page 2 of 2");
    }

    #[test]
    fn boundary_navigation_is_a_silent_no_op() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("draft");

        let writes = session.store.backend().write_count();
        let result = prev(&mut session).unwrap();
        assert!(!result.persisted);
        assert!(result.counter.is_none());
        let result = next(&mut session).unwrap();
        assert!(!result.persisted);

        assert_eq!(session.store.backend().write_count(), writes);
        assert_eq!(session.store.active(), 0);
        assert_eq!(session.text.serialize(), "draft");
    }

    #[test]
    fn navigation_saves_and_materializes() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("first");
        new_page(&mut session).unwrap();
        session.text.insert_text("second");

        prev(&mut session).unwrap();
        assert_eq!(session.store.active(), 0);
        assert_eq!(session.text.serialize(), "first");
        assert_eq!(session.store.page(1).unwrap().text, "second");

        next(&mut session).unwrap();
        assert_eq!(session.text.serialize(), "second");
        assert_eq!(session.page_counter().to_string(), "Page 2 of 2");
    }

    #[test]
    fn go_to_jumps_and_ignores_out_of_range() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("a");
        new_page(&mut session).unwrap();
        new_page(&mut session).unwrap();

        go_to(&mut session, 0).unwrap();
        assert_eq!(session.store.active(), 0);
        assert_eq!(session.text.serialize(), "a");

        let result = go_to(&mut session, 9).unwrap();
        assert!(!result.persisted);
        assert_eq!(session.store.active(), 0);
    }

    #[test]
    fn active_index_stays_in_bounds_for_any_sequence() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        let ops: [fn(&mut HeadlessSession<MemBackend>) -> Result<CmdResult>; 3] =
            [new_page, next, prev];

        let mut len = session.store.len();
        for step in 0..60usize {
            let op = ops[(step * 7 + step / 3) % 3];
            op(&mut session).unwrap();
            assert!(session.store.active() < session.store.len());
            assert!(session.store.len() >= len);
            len = session.store.len();
        }
    }

    #[test]
    fn save_then_load_reproduces_page() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("notes");
        draw_line(&mut session, (5.0, 5.0), (40.0, 20.0));
        let pixels = session.drawing.raster().clone();

        save_active(&mut session).unwrap();
        session.text.set_content("scratch");
        session.drawing.clear();
        let active = session.store.active();
        load_page(&mut session, active).unwrap();

        assert_eq!(session.text.serialize(), "notes");
        assert_eq!(session.drawing.raster(), &pixels);
    }

    #[test]
    fn clear_is_persisted_before_reload() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        draw_line(&mut session, (10.0, 10.0), (50.0, 50.0));
        save_active(&mut session).unwrap();

        clear(&mut session).unwrap();
        let active = session.store.active();
        load_page(&mut session, active).unwrap();
        assert!(session.drawing.is_blank());

        let raw = session.store.backend().raw(TEST_KEY).unwrap();
        let reloaded = mem_session_with(MemBackend::with_value(TEST_KEY, &raw));
        let stored = reloaded.store.page(0).unwrap().drawing.clone().unwrap();
        assert!(codec::decode_data_uri(&stored)
            .unwrap()
            .pixels()
            .all(|p| p[3] == 0));
    }

    #[test]
    fn corrupt_drawing_loads_blank_with_warning() {
        let raw = r#"[{"text":"kept","drawing":"data:image/png;base64,garbage"}]"#;
        let mut session = mem_session_with(MemBackend::with_value(TEST_KEY, raw));

        let result = open(&mut session).unwrap();
        assert_eq!(session.text.serialize(), "kept");
        assert!(session.drawing.is_blank());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn out_of_range_load_changes_nothing() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("live");

        let result = load_page(&mut session, 5).unwrap();
        assert!(result.counter.is_none());
        assert_eq!(session.text.serialize(), "live");
    }

    #[test]
    fn stored_drawing_is_restored_on_startup() {
        let mut source = Canvas::new(64, 64, 2.0);
        source.begin_stroke(crate::model::Point::new(1.0, 1.0));
        source.extend_stroke(crate::model::Point::new(30.0, 1.0), crate::model::Color::Red);
        let drawing = source.snapshot().unwrap();
        let raw = serde_json::to_string(&vec![PageRecord {
            text: String::new(),
            drawing: Some(drawing),
        }])
        .unwrap();

        let mut session = mem_session_with(MemBackend::with_value(TEST_KEY, &raw));
        open(&mut session).unwrap();
        assert_eq!(session.drawing.raster(), source.raster());
    }

    #[test]
    fn summaries_report_text_and_ink() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.text.insert_text("a & b");
        draw_line(&mut session, (1.0, 1.0), (9.0, 9.0));
        new_page(&mut session).unwrap();
        save_active(&mut session).unwrap();
        session.store.append_blank().unwrap();

        let summaries = summarize(&session.store);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].text, "a & b");
        assert_eq!(summaries[0].ink, Ink::Present);
        assert_eq!(summaries[1].ink, Ink::Blank);
        assert_eq!(summaries[2].ink, Ink::Missing);
        assert!(summaries[2].active);
    }

    #[test]
    fn failed_write_surfaces_as_error() {
        let mut session = mem_session();
        open(&mut session).unwrap();
        session.store.backend().set_simulate_write_error(true);
        assert!(new_page(&mut session).is_err());
    }
}
