use crate::commands::{pages, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Color;
use crate::session::Session;
use crate::store::StorageBackend;
use crate::surface::{DrawingSurface, TextSurface};

/// Text typed into the focused region. Every input saves the active page.
pub fn type_text<B, D, T>(session: &mut Session<B, D, T>, text: &str) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    if text.is_empty() || !session.text.is_focused() {
        return Ok(CmdResult::default());
    }
    session.text.insert_text(text);
    pages::save_active(session)
}

/// Select the ink color for strokes and for text typed from now on.
pub fn set_color<B, D, T>(session: &mut Session<B, D, T>, color: Color) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    session.color = color;
    session.text.set_color(color);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Color: {}", color)));
    Ok(result)
}
