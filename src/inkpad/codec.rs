//! PNG data URIs: the one image encoding exchanged wherever a drawing is
//! stored or snapshotted.

use crate::error::{InkpadError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn encode_data_uri(image: &RgbaImage) -> Result<String> {
    let png = encode_png(image)?;
    Ok(format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png)))
}

/// Decode a `data:` URI (any raster type `image` understands) or a bare
/// base64 PNG payload.
pub fn decode_data_uri(encoded: &str) -> Result<RgbaImage> {
    let payload = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| InkpadError::Decode("data URI has no payload".into()))?;
            if !header.ends_with(";base64") {
                return Err(InkpadError::Decode(format!(
                    "unsupported data URI encoding: {}",
                    header
                )));
            }
            data
        }
        None => encoded,
    };

    let bytes = STANDARD.decode(payload.trim())?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn data_uri_preserves_pixels() {
        let mut img = RgbaImage::new(4, 3);
        img.put_pixel(1, 2, Rgba([255, 0, 0, 255]));

        let uri = encode_data_uri(&img).unwrap();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));

        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn bare_base64_is_accepted() {
        let img = RgbaImage::new(2, 2);
        let uri = encode_data_uri(&img).unwrap();
        let bare = uri.trim_start_matches(PNG_DATA_URI_PREFIX);
        assert_eq!(decode_data_uri(bare).unwrap().dimensions(), (2, 2));
    }

    #[test]
    fn corrupt_input_is_an_error() {
        assert!(decode_data_uri("data:image/png;base64,!!!").is_err());
        assert!(decode_data_uri("data:image/png;base64,AAAA").is_err());
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
    }
}
