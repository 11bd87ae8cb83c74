//! # Export Engine building blocks
//!
//! Exporting needs two collaborators the notebook does not own:
//!
//! - a [`PageRasterizer`] that turns the composed page (text layer with the
//!   drawing layer on top, as displayed) into pixels, and
//! - an [`ExportSink`] that receives the finished file, the equivalent of a
//!   client-side download.
//!
//! The orchestration (save, iterate pages, restore) lives in
//! [`crate::commands::export`].

use crate::config::InkpadConfig;
use crate::error::{InkpadError, Result};
use crate::surface::rich_text::styled_runs;
use image::{imageops, Rgba, RgbaImage};
use std::fs;
use std::path::PathBuf;

pub mod pdf;
pub mod text;

use text::TextPainter;

/// Everything visible on the page at rasterization time.
pub struct PageLayers<'a> {
    /// Rich-text markup of the typing area.
    pub markup: &'a str,
    /// Drawing layer, `None` when the drawing surface is hidden.
    pub drawing: Option<&'a RgbaImage>,
    pub width: u32,
    pub height: u32,
}

pub trait PageRasterizer {
    fn rasterize(&self, layers: &PageLayers<'_>) -> Result<RgbaImage>;
}

/// Paints the paper, lays the markup's text out on it in each run's color,
/// then composites the drawing layer on top.
#[derive(Debug, Clone)]
pub struct PaperRasterizer {
    pub paper: Rgba<u8>,
    pub text: TextPainter,
}

impl Default for PaperRasterizer {
    fn default() -> Self {
        Self {
            paper: Rgba([255, 255, 255, 255]),
            text: TextPainter::default(),
        }
    }
}

impl PaperRasterizer {
    /// Uses the configured font file when there is one.
    pub fn from_config(config: &InkpadConfig) -> Result<Self> {
        let text = match &config.font_path {
            Some(path) => TextPainter::from_font_file(path, config.font_size_px)?,
            None => TextPainter::builtin(config.font_size_px),
        };
        Ok(Self {
            text,
            ..Self::default()
        })
    }
}

impl PageRasterizer for PaperRasterizer {
    fn rasterize(&self, layers: &PageLayers<'_>) -> Result<RgbaImage> {
        if layers.width == 0 || layers.height == 0 {
            return Err(InkpadError::Render(format!(
                "cannot rasterize a {}x{} page",
                layers.width, layers.height
            )));
        }
        let mut page = RgbaImage::from_pixel(layers.width, layers.height, self.paper);
        if !layers.markup.is_empty() {
            self.text.paint(&mut page, &styled_runs(layers.markup));
        }
        if let Some(drawing) = layers.drawing {
            imageops::overlay(&mut page, drawing, 0, 0);
        }
        Ok(page)
    }
}

/// Where a delivered file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub file_name: String,
    pub location: String,
    pub bytes: usize,
}

/// Destination of exported files.
pub trait ExportSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<ExportReceipt>;
}

/// Writes exported files into a directory.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ExportSink for DirSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<ExportReceipt> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        Ok(ExportReceipt {
            file_name: file_name.to_string(),
            location: path.display().to_string(),
            bytes: bytes.len(),
        })
    }
}

/// Keeps exported files in memory, in delivery order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<ExportReceipt> {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(ExportReceipt {
            file_name: file_name.to_string(),
            location: format!("memory://{}", file_name),
            bytes: bytes.len(),
        })
    }
}

/// `Notebook_Page_<N>.png`, with `index` zero-based.
pub fn page_image_name(index: usize) -> String {
    format!("Notebook_Page_{}.png", index + 1)
}
