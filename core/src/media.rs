//! Decoding fetched media into in-memory images.

use image::{DynamicImage, ImageFormat};

use crate::error::FetchError;

/// A decoded image along with the container format it arrived in.
#[derive(Debug, Clone)]
pub struct ContentImage {
    pub format: ImageFormat,
    pub image: DynamicImage,
}

pub fn decode_image(bytes: &[u8]) -> Result<ContentImage, FetchError> {
    if bytes.is_empty() {
        return Err(FetchError::NoData);
    }
    let format = image::guess_format(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(ContentImage { format, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_png() {
        let decoded = decode_image(&png_bytes(3, 2)).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!(decoded.image.dimensions(), (3, 2));
    }

    #[test]
    fn empty_bytes_are_no_data() {
        assert_eq!(decode_image(&[]).unwrap_err(), FetchError::NoData);
    }

    #[test]
    fn text_is_decode_error() {
        let err = decode_image(b"<html>not an image</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn truncated_png_is_decode_error() {
        let bytes = png_bytes(4, 4);
        let err = decode_image(&bytes[..16]).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
