use crate::commands::{pages, CmdMessage, CmdResult};
use crate::error::Result;
use crate::mode::Mode;
use crate::session::Session;
use crate::store::StorageBackend;
use crate::surface::{DrawingSurface, TextSurface};

/// Hide the drawing surface and focus the text region.
///
/// A stroke still open at this point can never receive its pointer-up, so it
/// is closed (and saved) here.
pub fn enable_typing<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let mut result = if session.drawing.end_stroke() {
        pages::save_active(session)?
    } else {
        CmdResult::default()
    };
    if session.mode.set(Mode::Typing) {
        result.add_message(CmdMessage::info("Typing mode"));
    }
    session.text.focus();
    Ok(result)
}

pub fn enable_drawing<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let mut result = CmdResult::default();
    if session.mode.set(Mode::Drawing) {
        result.add_message(CmdMessage::info("Drawing mode"));
    }
    Ok(result)
}

/// Take focus away from the text region so single-letter shortcuts work.
pub fn release_focus<B, D, T>(session: &mut Session<B, D, T>) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    session.text.blur();
    Ok(CmdResult::default())
}
