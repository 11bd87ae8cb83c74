use crate::commands::{pages, CmdResult};
use crate::error::Result;
use crate::input::Bounds;
use crate::model::Point;
use crate::session::Session;
use crate::store::StorageBackend;
use crate::surface::{DrawingSurface, TextSurface};
use tracing::debug;

/// Pointer-down / touch-start. Ignored while the drawing surface is hidden.
pub fn stroke_start<B, D, T>(session: &mut Session<B, D, T>, at: Point) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if session.mode.drawing_visible() {
        session.drawing.begin_stroke(at);
    }
    Ok(CmdResult::default())
}

pub fn stroke_move<B, D, T>(session: &mut Session<B, D, T>, to: Point) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if session.drawing.is_stroking() {
        session.drawing.extend_stroke(to, session.color);
    }
    Ok(CmdResult::default())
}

/// Pointer-up / touch-end. Closing an open stroke saves the active page.
pub fn stroke_end<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if session.drawing.end_stroke() {
        pages::save_active(session)
    } else {
        Ok(CmdResult::default())
    }
}

/// The host surface moved or changed size. Existing strokes survive.
pub fn resize<B, D, T>(session: &mut Session<B, D, T>, bounds: Bounds) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    debug!(?bounds, "surface layout changed");
    session.bounds = bounds;
    session.drawing.resize(bounds.width, bounds.height);
    Ok(CmdResult::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mode;
    use crate::model::Color;
    use crate::test_utils::{draw_line, mem_session, TEST_KEY};
    use image::Rgba;

    #[test]
    fn stroke_end_persists_drawing() {
        let mut session = mem_session();
        pages::open(&mut session).unwrap();
        let writes = session.store.backend().write_count();

        draw_line(&mut session, (10.0, 10.0), (50.0, 50.0));
        assert_eq!(session.store.backend().write_count(), writes + 1);

        let stored = session.store.page(0).unwrap().drawing.clone().unwrap();
        let decoded = crate::codec::decode_data_uri(&stored).unwrap();
        assert_eq!(decoded.get_pixel(30, 30), &Rgba([0, 0, 0, 255]));
        assert!(session.store.backend().raw(TEST_KEY).is_some());
    }

    #[test]
    fn stray_pointer_up_does_not_save() {
        let mut session = mem_session();
        pages::open(&mut session).unwrap();
        let result = stroke_end(&mut session).unwrap();
        assert!(!result.persisted);
        assert_eq!(session.store.backend().write_count(), 0);
    }

    #[test]
    fn strokes_use_selected_color() {
        let mut session = mem_session();
        pages::open(&mut session).unwrap();
        session.color = Color::Blue;
        draw_line(&mut session, (0.0, 20.0), (60.0, 20.0));
        assert_eq!(
            session.drawing.raster().get_pixel(30, 20),
            &Rgba([0, 0, 255, 255])
        );
    }

    #[test]
    fn hidden_surface_ignores_pointer() {
        let mut session = mem_session();
        pages::open(&mut session).unwrap();
        mode::enable_typing(&mut session).unwrap();

        draw_line(&mut session, (10.0, 10.0), (50.0, 50.0));
        assert!(session.drawing.is_blank());
        assert_eq!(session.store.backend().write_count(), 0);
    }

    #[test]
    fn resize_updates_bounds_and_keeps_ink() {
        let mut session = mem_session();
        pages::open(&mut session).unwrap();
        draw_line(&mut session, (2.0, 2.0), (20.0, 2.0));

        let bounds = Bounds {
            left: 15.0,
            top: 40.0,
            width: 128,
            height: 96,
        };
        resize(&mut session, bounds).unwrap();
        assert_eq!(session.bounds(), bounds);
        assert_eq!(session.drawing.size(), (128, 96));
        assert_eq!(session.drawing.raster().get_pixel(10, 2)[3], 255);
    }
}
