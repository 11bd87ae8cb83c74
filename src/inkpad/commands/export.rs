use crate::codec;
use crate::commands::{pages, CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::pdf::PdfBook;
use crate::export::{page_image_name, ExportSink, PageLayers, PageRasterizer};
use crate::session::Session;
use crate::store::StorageBackend;
use crate::surface::{DrawingSurface, TextSurface};
use image::RgbaImage;
use tracing::{debug, info, warn};

/// Rasterize the page exactly as it is currently displayed.
fn compose<B, D, T>(session: &Session<B, D, T>, rasterizer: &dyn PageRasterizer) -> Result<RgbaImage>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let markup = session.text.serialize();
    let (width, height) = session.drawing.size();
    let layers = PageLayers {
        markup: &markup,
        drawing: session
            .mode
            .drawing_visible()
            .then(|| session.drawing.raster()),
        width,
        height,
    };
    rasterizer.rasterize(&layers)
}

/// Save, then deliver the active page as `Notebook_Page_<N>.png`.
pub fn export_page_image<B, D, T>(
    session: &mut Session<B, D, T>,
    rasterizer: &dyn PageRasterizer,
    sink: &mut dyn ExportSink,
) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let mut result = pages::save_active(session)?;
    let image = compose(session, rasterizer)?;
    let png = codec::encode_png(&image)?;

    let name = page_image_name(session.store.active());
    let receipt = sink.deliver(&name, &png)?;
    info!(file = %receipt.location, bytes = receipt.bytes, "page image exported");
    result.add_message(CmdMessage::success(format!(
        "Exported {}",
        receipt.location
    )));
    result.exports.push(receipt);
    Ok(result)
}

/// Save, then rasterize every page in order into a single A4 PDF.
///
/// Each page is materialized into the live surfaces for capture. The page
/// that was active before the export is materialized again afterwards, also
/// when the export fails part way.
pub fn export_all_pages_pdf<B, D, T>(
    session: &mut Session<B, D, T>,
    rasterizer: &dyn PageRasterizer,
    sink: &mut dyn ExportSink,
    file_name: &str,
    image_width_mm: f32,
) -> Result<CmdResult>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let mut result = pages::save_active(session)?;
    let original = session.store.active();

    let outcome = render_book(session, rasterizer, image_width_mm, &mut result);
    result.merge(pages::load_page(session, original)?);
    let bytes = outcome?;

    let receipt = sink.deliver(file_name, &bytes)?;
    info!(
        file = %receipt.location,
        pages = session.store.len(),
        "notebook exported as PDF"
    );
    result.add_message(CmdMessage::success(format!(
        "Exported {} page(s) to {}",
        session.store.len(),
        receipt.location
    )));
    result.exports.push(receipt);
    Ok(result)
}

fn render_book<B, D, T>(
    session: &mut Session<B, D, T>,
    rasterizer: &dyn PageRasterizer,
    image_width_mm: f32,
    result: &mut CmdResult,
) -> Result<Vec<u8>>
where
    B: StorageBackend,
    D: DrawingSurface,
    T: TextSurface,
{
    let mut book = PdfBook::new(image_width_mm);
    for index in 0..session.store.len() {
        let loaded = pages::load_page(session, index)?;
        result.messages.extend(loaded.messages);
        let image = compose(session, rasterizer).map_err(|e| {
            warn!(page = index + 1, error = %e, "page could not be rasterized");
            e
        })?;
        book.add_page(&image)?;
        debug!(page = index + 1, "page added to PDF");
    }
    book.finish()
}
