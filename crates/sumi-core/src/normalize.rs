//! Bitmap normalizer: every raw image source converges here into one
//! canonical RGB8 buffer before anything downstream sees it.

use std::io::Cursor;
use std::path::Path;

use sumi_types::{CanonicalImage, ImageInput, RawBitmap};

use crate::error::ImageError;

/// Convert any accepted raw representation into a [`CanonicalImage`].
///
/// Native bitmaps take a lossless PNG round trip so that every source is
/// decoded by the same code path. No cropping, scaling or rotation happens
/// here; color-mode conversion (palette, grayscale, RGBA) does.
pub fn normalize(input: ImageInput) -> Result<CanonicalImage, ImageError> {
    match input {
        ImageInput::Path(path) => decode_path(&path),
        ImageInput::Encoded(bytes) => decode_bytes(&bytes),
        ImageInput::Native(bitmap) => {
            let png = encode_native(&bitmap)?;
            decode_bytes(&png)
        }
    }
}

fn decode_path(path: &Path) -> Result<CanonicalImage, ImageError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ImageError::unreadable(format!("{}: {e}", path.display())))?;
    decode_bytes(&bytes)
}

/// The single decode path. Format is sniffed from the bytes; PNG, JPEG and
/// BMP are the supported floor, anything else the decoder recognizes works
/// too.
fn decode_bytes(bytes: &[u8]) -> Result<CanonicalImage, ImageError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ImageError::unreadable(format!("decode failed: {e}")))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    CanonicalImage::from_rgb8(width, height, rgb.into_raw())
        .ok_or_else(|| ImageError::unreadable("decoder produced an empty image"))
}

/// Re-encode a platform-native RGBA bitmap to PNG so it can flow through
/// [`decode_bytes`] like every other source.
fn encode_native(bitmap: &RawBitmap) -> Result<Vec<u8>, ImageError> {
    let expected = bitmap.width as usize * bitmap.height as usize * 4;
    if bitmap.rgba.len() != expected {
        return Err(ImageError::unreadable(format!(
            "native bitmap claims {}x{} but carries {} bytes",
            bitmap.width,
            bitmap.height,
            bitmap.rgba.len()
        )));
    }
    let rgba = image::RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.rgba.clone())
        .ok_or_else(|| ImageError::unreadable("native bitmap buffer rejected"))?;

    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ImageError::unreadable(format!("png round trip failed: {e}")))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
    use sumi_types::{ImageInput, RawBitmap};

    use super::*;

    fn encode(image: DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_jpeg_and_bmp() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30])));
        for format in [
            image::ImageFormat::Png,
            image::ImageFormat::Jpeg,
            image::ImageFormat::Bmp,
        ] {
            let bytes = encode(source.clone(), format);
            let canonical = normalize(ImageInput::Encoded(bytes)).unwrap();
            assert_eq!(canonical.width(), 4);
            assert_eq!(canonical.height(), 3);
            assert_eq!(canonical.pixels().len(), 4 * 3 * 3);
        }
    }

    #[test]
    fn strips_alpha_from_rgba_sources() {
        let rgba = RgbaImage::from_pixel(2, 2, image::Rgba([100, 150, 200, 40]));
        let bytes = encode(DynamicImage::ImageRgba8(rgba), image::ImageFormat::Png);

        let canonical = normalize(ImageInput::Encoded(bytes)).unwrap();
        assert_eq!(canonical.pixels().len(), 2 * 2 * 3);
        assert_eq!(&canonical.pixels()[..3], &[100, 150, 200]);
    }

    #[test]
    fn expands_grayscale_to_rgb() {
        let gray = GrayImage::from_pixel(3, 1, image::Luma([77]));
        let bytes = encode(DynamicImage::ImageLuma8(gray), image::ImageFormat::Png);

        let canonical = normalize(ImageInput::Encoded(bytes)).unwrap();
        assert_eq!(&canonical.pixels()[..3], &[77, 77, 77]);
    }

    #[test]
    fn native_bitmap_round_trips_through_png() {
        let bitmap = RawBitmap {
            width: 5,
            height: 2,
            rgba: vec![200; 5 * 2 * 4],
        };
        let canonical = normalize(ImageInput::Native(bitmap)).unwrap();
        assert_eq!(canonical.width(), 5);
        assert_eq!(canonical.height(), 2);
        assert_eq!(&canonical.pixels()[..3], &[200, 200, 200]);
    }

    #[test]
    fn native_bitmap_with_short_buffer_is_unreadable() {
        let bitmap = RawBitmap {
            width: 5,
            height: 2,
            rgba: vec![0; 7],
        };
        let err = normalize(ImageInput::Native(bitmap)).unwrap_err();
        assert!(matches!(err, ImageError::Unreadable { .. }));
    }

    #[test]
    fn corrupt_bytes_are_unreadable() {
        let err = normalize(ImageInput::Encoded(b"not an image".to_vec())).unwrap_err();
        assert!(matches!(err, ImageError::Unreadable { .. }));
    }

    #[test]
    fn truncated_file_is_unreadable() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, image::Rgb([1, 2, 3])));
        let mut bytes = encode(source, image::ImageFormat::Png);
        bytes.truncate(bytes.len() / 2);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &bytes).unwrap();

        let err = normalize(ImageInput::Path(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ImageError::Unreadable { .. }));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = normalize(ImageInput::Path("/nonexistent/scan.png".into())).unwrap_err();
        assert!(matches!(err, ImageError::Unreadable { .. }));
    }
}
