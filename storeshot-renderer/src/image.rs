//! Raster helpers: data URIs for embedded assets, variant scaling and PNG
//! encoding.

use base64::Engine;
use image::imageops::FilterType;
use image::{ImageEncoder, RgbaImage};
use storeshot_core::ImageAsset;

use crate::error::{RenderError, RenderResult};

/// Encode an asset as a `data:` URI for embedding in SVG.
#[must_use]
pub fn data_uri(asset: &ImageAsset) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&asset.bytes);
    format!("data:{};base64,{encoded}", asset.mime_type)
}

/// Draw `base` stretched onto a freshly cleared `width`×`height` canvas.
///
/// The canvas starts fully transparent, so transparent regions of the base
/// capture stay transparent. The aspect ratio is not preserved.
///
/// # Errors
///
/// Returns [`RenderError::Canvas`] for a zero-sized target.
pub fn stretch_to(
    base: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RenderResult<RgbaImage> {
    if width == 0 || height == 0 || base.width() == 0 || base.height() == 0 {
        return Err(RenderError::Canvas { width, height });
    }
    let mut canvas = RgbaImage::new(width, height);
    let scaled = image::imageops::resize(base, width, height, filter);
    image::imageops::replace(&mut canvas, &scaled, 0, 0);
    Ok(canvas)
}

/// Encode an RGBA image as PNG.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if the encoder rejects the buffer.
pub fn encode_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_stretch_exact_size_non_uniform() {
        let base = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let out = stretch_to(&base, 30, 70, FilterType::Nearest).expect("stretch");
        assert_eq!(out.dimensions(), (30, 70));
        assert_eq!(out.get_pixel(29, 69), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_stretch_keeps_transparency() {
        let base = RgbaImage::new(4, 4);
        let out = stretch_to(&base, 8, 8, FilterType::Triangle).expect("stretch");
        assert!(out.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_stretch_rejects_zero() {
        let base = RgbaImage::new(4, 4);
        assert!(matches!(
            stretch_to(&base, 0, 8, FilterType::Nearest),
            Err(RenderError::Canvas { width: 0, height: 8 })
        ));
    }

    #[test]
    fn test_encode_png_magic() {
        let png = encode_png(&RgbaImage::new(2, 2)).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_data_uri() {
        let asset = ImageAsset {
            file_name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: b"abc".to_vec(),
            intrinsic_size: None,
        };
        assert_eq!(data_uri(&asset), "data:image/png;base64,YWJj");
    }
}
