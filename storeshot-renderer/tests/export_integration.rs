//! Integration tests for the export pipeline (storeshot-renderer).
//!
//! Exports real documents through resvg, reads the archives back and checks
//! the pipeline's at-most-one-export guard.

use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use image::{ImageEncoder, Rgba, RgbaImage};
use storeshot_core::{
    Background, Document, ElementKind, HexColor, ImageUpload, NamedPosition, TextUpdate,
};
use storeshot_renderer::{
    Capture, ExportConfig, ExportPipeline, FilterType, RenderError, RenderResult, SvgCapture,
    SCREENSHOT_SIZES,
};

/// Fast configuration: no system fonts, nearest-neighbour scaling.
fn test_config() -> ExportConfig {
    ExportConfig {
        capture_scale: 1.0,
        filter: FilterType::Nearest,
        load_system_fonts: false,
        ..ExportConfig::default()
    }
}

fn png_upload(color: [u8; 4]) -> ImageUpload {
    let image = RgbaImage::from_pixel(4, 4, Rgba(color));
    let mut buf = Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(image.as_raw(), 4, 4, image::ExtendedColorType::Rgba8)
        .expect("encode");
    ImageUpload::new("shot.png", "image/png", buf.into_inner())
}

fn sample_document() -> Document {
    let mut doc = Document::new();
    let headline = doc.add_text("Plan your week").expect("text");
    doc.add_image(png_upload([0, 255, 0, 255])).expect("image");
    doc.click(headline, ElementKind::Text);
    doc.move_selected_to(NamedPosition::TopCenter);
    doc
}

/// Read every entry of a zip archive into (name, decoded image).
fn read_archive(bytes: &[u8]) -> Vec<(String, RgbaImage)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).expect("entry");
            let mut data = Vec::new();
            file.read_to_end(&mut data).expect("read entry");
            let decoded = image::load_from_memory(&data).expect("decode png");
            (file.name().to_string(), decoded.to_rgba8())
        })
        .collect()
}

// ==========================================================================
// Archive contents
// ==========================================================================

#[test]
fn test_export_produces_four_entries_at_exact_sizes() {
    let pipeline = ExportPipeline::new(test_config());
    let archive = pipeline
        .export(&sample_document(), true)
        .expect("export");

    assert_eq!(archive.file_name, "screenshots.zip");
    let entries = read_archive(&archive.bytes);
    assert_eq!(entries.len(), 4);
    for ((name, image), size) in entries.iter().zip(SCREENSHOT_SIZES.iter()) {
        assert_eq!(name, &size.entry_name());
        assert_eq!(image.dimensions(), (size.width, size.height));
    }
}

#[test]
fn test_entry_names_are_unique() {
    let pipeline = ExportPipeline::new(test_config());
    let archive = pipeline.export(&Document::new(), false).expect("export");
    let names: Vec<String> = read_archive(&archive.bytes)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        names,
        vec![
            "screenshot_6.7\"_1290x2796.png",
            "screenshot_6.1\"_1179x2556.png",
            "screenshot_6.1\"_1170x2532.png",
            "screenshot_4.7\"_750x1334.png",
        ]
    );
}

#[test]
fn test_mockup_variants_keep_transparent_corners() {
    let pipeline = ExportPipeline::new(test_config());
    let archive = pipeline.export(&sample_document(), true).expect("export");
    for (name, image) in read_archive(&archive.bytes) {
        assert_eq!(image.get_pixel(0, 0).0[3], 0, "{name} corner should be clear");
    }
}

#[test]
fn test_bare_variants_fill_whole_canvas() {
    let mut doc = Document::new();
    doc.set_background(Background::Solid(HexColor::rgb(0x13, 0x80, 0xff)));
    let pipeline = ExportPipeline::new(test_config());
    let archive = pipeline.export(&doc, false).expect("export");
    for (name, image) in read_archive(&archive.bytes) {
        let (w, h) = image.dimensions();
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            assert_eq!(image.get_pixel(x, y).0, [0x13, 0x80, 0xff, 255], "{name}");
        }
    }
}

#[test]
fn test_image_element_is_painted_into_variants() {
    let mut doc = Document::new();
    doc.set_background(Background::Solid(HexColor::BLACK));
    doc.add_image(png_upload([0, 255, 0, 255])).expect("image");

    // Default placement: 200×200 at (50, 50); the centre is (150, 150).
    let base = SvgCapture::new(1.0, false)
        .capture(&doc, false)
        .expect("capture");
    let centre = base.get_pixel(150, 150).0;
    assert!(centre[1] > 200 && centre[0] < 50, "got {centre:?}");

    let pipeline = ExportPipeline::new(test_config());
    let archive = pipeline.export(&doc, false).expect("export");
    let (_, largest) = &read_archive(&archive.bytes)[0];
    let x = 150 * 1290 / 276;
    let y = 150 * 2796 / 576;
    let pixel = largest.get_pixel(x, y).0;
    assert!(pixel[1] > 200 && pixel[0] < 50, "got {pixel:?}");
}

#[test]
fn test_default_text_is_painted_with_system_fonts() {
    let capture = SvgCapture::new(1.0, true);
    if capture.font_faces() == 0 {
        eprintln!("no system fonts installed; skipping text rendering check");
        return;
    }

    let mut doc = Document::new();
    doc.set_background(Background::Solid(HexColor::rgb(255, 255, 255)));
    let text = doc.add_text("HELLO WORLD").expect("text");
    doc.update_text(text, TextUpdate::FontSize(40.0));

    // Default style is black at (50, 50); the glyphs sit in the first 40px
    // below the box top.
    let base = capture.capture(&doc, false).expect("capture");
    let dark = (50..base.width())
        .flat_map(|x| (50..100).map(move |y| (x, y)))
        .filter(|&(x, y)| base.get_pixel(x, y).0[0] < 128)
        .count();
    assert!(dark > 50, "expected glyph pixels, found {dark}");

    // Outside the text box the background is untouched.
    assert_eq!(base.get_pixel(20, 300).0, [255, 255, 255, 255]);
}

#[test]
fn test_export_writes_archive_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = ExportPipeline::new(test_config());
    let archive = pipeline.export(&sample_document(), true).expect("export");
    let path = archive.save_to(dir.path()).expect("save");
    assert!(path.ends_with("screenshots.zip"));
    assert_eq!(read_archive(&std::fs::read(path).expect("read")).len(), 4);
}

// ==========================================================================
// Failure handling
// ==========================================================================

struct FailingCapture;

impl Capture for FailingCapture {
    fn capture(&self, _doc: &Document, _include_mockup: bool) -> RenderResult<RgbaImage> {
        Err(RenderError::Capture("simulated failure".to_string()))
    }
}

#[test]
fn test_failed_export_leaves_document_unchanged() {
    let doc = sample_document();
    let before = doc.clone();

    let pipeline = ExportPipeline::with_capture(FailingCapture, test_config());
    let result = pipeline.export(&doc, true);

    assert!(matches!(result, Err(RenderError::Capture(_))));
    assert_eq!(doc, before);
    assert!(!pipeline.is_in_progress());

    // The pipeline is re-triggerable after a failure.
    assert!(matches!(
        pipeline.export(&doc, true),
        Err(RenderError::Capture(_))
    ));
    assert!(!pipeline.is_in_progress());
}

// ==========================================================================
// Re-entrancy
// ==========================================================================

/// Blocks inside `capture` until released, counting calls.
struct GatedCapture {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
    calls: Arc<AtomicUsize>,
}

impl Capture for GatedCapture {
    fn capture(&self, _doc: &Document, _include_mockup: bool) -> RenderResult<RgbaImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered
            .lock()
            .expect("lock")
            .send(())
            .expect("signal entered");
        self.release
            .lock()
            .expect("lock")
            .recv()
            .expect("wait for release");
        Ok(RgbaImage::new(10, 20))
    }
}

#[test]
fn test_reentrant_export_is_rejected_without_capturing() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let calls = Arc::new(AtomicUsize::new(0));
    let capture = GatedCapture {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        calls: Arc::clone(&calls),
    };
    let pipeline = Arc::new(ExportPipeline::with_capture(capture, test_config()));

    let worker = {
        let pipeline = Arc::clone(&pipeline);
        thread::spawn(move || pipeline.export(&Document::new(), true))
    };
    entered_rx.recv().expect("first export started");
    assert!(pipeline.is_in_progress());

    let second = pipeline.export(&Document::new(), true);
    assert!(matches!(second, Err(RenderError::ExportInProgress)));
    assert!(pipeline.is_in_progress());

    release_tx.send(()).expect("release");
    let first = worker.join().expect("join").expect("first export");
    assert_eq!(first.entries.len(), 4);
    assert!(!pipeline.is_in_progress());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
