//! Capture: rasterizing a composition into a single base image.

use std::sync::Arc;

use image::RgbaImage;
use storeshot_core::{CompositionView, Document, ViewOptions};

use crate::error::{RenderError, RenderResult};
use crate::svg::render_svg;

/// Rasterizes a document into the base image the export variants are
/// derived from.
///
/// Implementations must build a capture-mode view so editing overlays never
/// reach the output, and must leave transparent pixels transparent.
pub trait Capture: Send + Sync {
    /// Capture `doc`, with or without the device frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Capture`] if rasterization fails.
    fn capture(&self, doc: &Document, include_mockup: bool) -> RenderResult<RgbaImage>;
}

/// Production capture: SVG → usvg tree → resvg into a tiny-skia pixmap.
#[derive(Clone)]
pub struct SvgCapture {
    scale: f32,
    fontdb: Arc<usvg::fontdb::Database>,
}

/// Families tried, in order, for the generic `sans-serif` fallback.
const SANS_SERIF_CANDIDATES: [&str; 6] = [
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

/// Families tried, in order, for the generic `serif` fallback.
const SERIF_CANDIDATES: [&str; 5] = [
    "Times New Roman",
    "Liberation Serif",
    "DejaVu Serif",
    "Noto Serif",
    "FreeSerif",
];

impl SvgCapture {
    /// Create a capture rendering at `scale` times the view size.
    ///
    /// Without `load_system_fonts` the font database is empty and text
    /// elements do not appear in the capture.
    #[must_use]
    pub fn new(scale: f32, load_system_fonts: bool) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        if load_system_fonts {
            fontdb.load_system_fonts();
            tracing::debug!("Loaded {} font faces", fontdb.len());
        }
        Self::with_fontdb(scale, fontdb)
    }

    /// Create a capture over a caller-supplied font database.
    ///
    /// The generic `sans-serif` and `serif` families are pointed at faces
    /// the database actually holds, so text whose family is missing on the
    /// host still renders.
    #[must_use]
    pub fn with_fontdb(scale: f32, mut fontdb: usvg::fontdb::Database) -> Self {
        configure_generic_families(&mut fontdb);
        Self {
            scale: if scale > 0.0 { scale } else { 1.0 },
            fontdb: Arc::new(fontdb),
        }
    }

    /// Number of font faces available to text rendering.
    #[must_use]
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    /// Scale factor applied to the view size.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize(&self, svg: &str) -> RenderResult<tiny_skia::Pixmap> {
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| RenderError::Capture(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width().round() as u32;
        let px_h = tree.size().height().round() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1)).ok_or(
            RenderError::Canvas {
                width: px_w,
                height: px_h,
            },
        )?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl std::fmt::Debug for SvgCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgCapture")
            .field("scale", &self.scale)
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

/// Point the generic families at faces present in `fontdb`.
fn configure_generic_families(fontdb: &mut usvg::fontdb::Database) {
    let available: Vec<String> = fontdb
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    let Some(sans) = pick_family(&available, &SANS_SERIF_CANDIDATES) else {
        return;
    };
    let serif = pick_family(&available, &SERIF_CANDIDATES).unwrap_or_else(|| sans.clone());
    tracing::debug!("Generic families: sans-serif={sans}, serif={serif}");
    fontdb.set_sans_serif_family(sans);
    fontdb.set_serif_family(serif);
}

/// First of `preferred` present in `available` (case-insensitive), else the
/// first family containing "Sans", else any family at all.
fn pick_family(available: &[String], preferred: &[&str]) -> Option<String> {
    preferred
        .iter()
        .find_map(|want| {
            available
                .iter()
                .find(|name| name.eq_ignore_ascii_case(want))
                .cloned()
        })
        .or_else(|| available.iter().find(|name| name.contains("Sans")).cloned())
        .or_else(|| available.first().cloned())
}

impl Capture for SvgCapture {
    fn capture(&self, doc: &Document, include_mockup: bool) -> RenderResult<RgbaImage> {
        let view = CompositionView::build(doc, ViewOptions::capture(include_mockup));
        let svg = render_svg(&view, doc, self.scale);
        let pixmap = self.rasterize(&svg)?;
        pixmap_to_rgba(&pixmap)
    }
}

/// Convert tiny-skia's premultiplied pixels to straight-alpha RGBA.
fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> RenderResult<RgbaImage> {
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        raw.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .ok_or_else(|| RenderError::Capture("Pixel buffer size mismatch".to_string()))
}
