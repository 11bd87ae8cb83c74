//! # Live Surfaces
//!
//! The active page is materialized into two live surfaces: a raster drawing
//! surface and an editable rich-text region. The page store and the export
//! engine only talk to them through the capability traits below, so any host
//! (a browser canvas, a GUI toolkit, the headless [`canvas::Canvas`] and
//! [`rich_text::RichText`] shipped here) can sit behind them.

use crate::error::Result;
use crate::model::{Color, Point};
use image::RgbaImage;

pub mod canvas;
pub mod rich_text;

/// Freehand raster surface with a two-state stroke machine (idle, stroking).
pub trait DrawingSurface {
    /// idle → stroking; the path starts at `at`, nothing is painted yet.
    fn begin_stroke(&mut self, at: Point);

    /// While stroking, paint a straight segment from the previous point to `to`
    /// and restart the path there. Ignored while idle.
    fn extend_stroke(&mut self, to: Point, color: Color);

    /// stroking → idle. Returns whether a stroke was open.
    fn end_stroke(&mut self) -> bool;

    fn is_stroking(&self) -> bool;

    /// Current content as a self-contained encoded image string.
    fn snapshot(&self) -> Result<String>;

    /// Decode `encoded` and draw it at the origin. Returns once the pixels are
    /// on the surface.
    fn restore(&mut self, encoded: &str) -> Result<()>;

    /// Blank the surface.
    fn clear(&mut self);

    /// Change the backing raster size, keeping the existing strokes.
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    fn raster(&self) -> &RgbaImage;
}

/// Editable rich-text region holding opaque markup.
pub trait TextSurface {
    fn serialize(&self) -> String;

    fn set_content(&mut self, markup: &str);

    /// Apply a foreground color to text typed from now on, then refocus.
    fn set_color(&mut self, color: Color);

    /// Type `text` at the insertion point.
    fn insert_text(&mut self, text: &str);

    fn focus(&mut self);

    fn blur(&mut self);

    fn is_focused(&self) -> bool;
}
