use crate::error::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// A4 portrait PDF assembled one page image at a time.
///
/// Each image is pinned to the top-left corner, `image_width_mm` wide, with
/// its height scaled to keep the aspect ratio. Anything past the bottom edge
/// is clipped by the page.
pub struct PdfBook {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    image_width_mm: f32,
}

impl PdfBook {
    pub fn new(image_width_mm: f32) -> Self {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            image_width_mm,
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    pub fn add_page(&mut self, image: &RgbaImage) -> Result<()> {
        let (width, height) = image.dimensions();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&flatten_on_white(image))?;
        let data = encoder.finish()?;

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            data,
        ));

        let page_w = mm_to_pt(A4_WIDTH_MM);
        let page_h = mm_to_pt(A4_HEIGHT_MM);
        let img_w = mm_to_pt(self.image_width_mm);
        let img_h = img_w * height as f32 / width as f32;

        // PDF y grows upwards; place the image's top edge on the page's top edge.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        img_w.into(),
                        0.into(),
                        0.into(),
                        img_h.into(),
                        0.into(),
                        (page_h - img_h).into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let resources_id = self.doc.add_object(dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        });

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
        });
        self.kids.push(page_id.into());
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<u8>> {
        let kids = std::mem::take(&mut self.kids);
        let count = kids.len() as i64;
        self.doc.set_object(
            self.pages_id,
            dictionary! {
                "Type" => "Pages",
                "Count" => count,
                "Kids" => kids,
            },
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal("Notebook"),
            "Producer" => Object::string_literal(concat!("inkpad ", env!("CARGO_PKG_VERSION"))),
        });
        self.doc.trailer.set("Info", info_id);
        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

/// Drop the alpha channel by compositing over white paper.
fn flatten_on_white(image: &RgbaImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.as_raw().len() / 4 * 3);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let a = u16::from(a);
        for c in [r, g, b] {
            let blended = (u16::from(c) * a + 255 * (255 - a) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}
