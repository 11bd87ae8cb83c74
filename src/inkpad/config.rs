use crate::error::{InkpadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORAGE_KEY: &str = "hindiNotebookData";
const DEFAULT_PDF_FILE_NAME: &str = "Hindi_Notebook.pdf";

/// Configuration for inkpad, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InkpadConfig {
    /// Key the page collection is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// File name of the full-notebook PDF export
    #[serde(default = "default_pdf_file_name")]
    pub pdf_file_name: String,

    /// Width of each page image inside the PDF, in millimeters
    #[serde(default = "default_page_width_mm")]
    pub page_width_mm: f32,

    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,

    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,

    /// Pen width in surface pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    /// Let the unmodified `t`/`d` shortcuts fire while the text region has focus
    #[serde(default)]
    pub mode_keys_while_typing: bool,

    /// TrueType/OpenType font for exported text, relative to the data
    /// directory unless absolute. Built-in bitmap glyphs are used without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Text size on exported pages, in surface pixels
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f32,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_pdf_file_name() -> String {
    DEFAULT_PDF_FILE_NAME.to_string()
}

fn default_page_width_mm() -> f32 {
    210.0
}

// A4 at 96 dpi
fn default_canvas_width() -> u32 {
    794
}

fn default_canvas_height() -> u32 {
    1123
}

fn default_stroke_width() -> f32 {
    2.0
}

fn default_font_size_px() -> f32 {
    16.0
}

impl Default for InkpadConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            pdf_file_name: default_pdf_file_name(),
            page_width_mm: default_page_width_mm(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            stroke_width: default_stroke_width(),
            mode_keys_while_typing: false,
            font_path: None,
            font_size_px: default_font_size_px(),
        }
    }
}

impl InkpadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: InkpadConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(InkpadError::Config("storage_key cannot be empty".into()));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(InkpadError::Config(format!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.page_width_mm > 0.0) || !(self.stroke_width > 0.0) {
            return Err(InkpadError::Config(
                "page_width_mm and stroke_width must be positive".into(),
            ));
        }
        if !(self.font_size_px >= 1.0) {
            return Err(InkpadError::Config(format!(
                "font_size_px must be at least 1, got {}",
                self.font_size_px
            )));
        }
        Ok(())
    }
}
