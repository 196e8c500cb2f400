//! Multi-resolution export.
//!
//! One capture of the composition is stretched to every device size,
//! encoded as PNG and packaged into a single zip archive. At most one export
//! runs at a time per pipeline.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use image::imageops::FilterType;
use serde::Serialize;
use storeshot_core::Document;
use zip::write::SimpleFileOptions;

use crate::capture::{Capture, SvgCapture};
use crate::error::{RenderError, RenderResult};
use crate::image::{encode_png, stretch_to};

/// Fixed file name of the exported archive.
pub const ARCHIVE_NAME: &str = "screenshots.zip";

/// An App Store screenshot size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceSize {
    /// Human-readable display size tag, e.g. `6.7"`.
    pub label: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DeviceSize {
    /// Archive entry name for this size.
    ///
    /// Two sizes share the `6.1"` tag, so the pixel size is part of the name.
    #[must_use]
    pub fn entry_name(&self) -> String {
        format!("screenshot_{}_{}x{}.png", self.label, self.width, self.height)
    }
}

/// The device sizes every export produces, in archive order.
pub const SCREENSHOT_SIZES: [DeviceSize; 4] = [
    DeviceSize {
        label: "6.7\"",
        width: 1290,
        height: 2796,
    },
    DeviceSize {
        label: "6.1\"",
        width: 1179,
        height: 2556,
    },
    DeviceSize {
        label: "6.1\"",
        width: 1170,
        height: 2532,
    },
    DeviceSize {
        label: "4.7\"",
        width: 750,
        height: 1334,
    },
];

/// Configuration for an export pipeline.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Target sizes (default: [`SCREENSHOT_SIZES`]).
    pub sizes: Vec<DeviceSize>,
    /// Capture scale relative to the on-screen view (default: 2.0).
    pub capture_scale: f32,
    /// Resampling filter used to stretch the capture (default: `Lanczos3`).
    pub filter: FilterType,
    /// Load the host's fonts for text rendering (default: true).
    pub load_system_fonts: bool,
    /// Archive file name (default: [`ARCHIVE_NAME`]).
    pub archive_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sizes: SCREENSHOT_SIZES.to_vec(),
            capture_scale: 2.0,
            filter: FilterType::Lanczos3,
            load_system_fonts: true,
            archive_name: ARCHIVE_NAME.to_string(),
        }
    }
}

/// One encoded variant inside an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    /// Entry name.
    pub name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Encoded PNG size in bytes.
    pub encoded_len: usize,
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    /// File name to offer the archive under.
    pub file_name: String,
    /// Zip bytes.
    pub bytes: Vec<u8>,
    /// Entries, in archive order.
    pub entries: Vec<ArchiveEntry>,
}

impl ExportArchive {
    /// Write the archive into `dir` under its file name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the directory or file cannot be written.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Clears the in-progress flag when dropped.
struct InProgressGuard<'a>(&'a AtomicBool);

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Captures a document and packages its device variants.
#[derive(Debug)]
pub struct ExportPipeline<C: Capture = SvgCapture> {
    capture: C,
    config: ExportConfig,
    in_progress: AtomicBool,
}

impl ExportPipeline<SvgCapture> {
    /// Create a pipeline rasterizing through resvg.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let capture = SvgCapture::new(config.capture_scale, config.load_system_fonts);
        Self::with_capture(capture, config)
    }

    /// Create a pipeline with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl<C: Capture> ExportPipeline<C> {
    /// Create a pipeline around a custom capture.
    #[must_use]
    pub fn with_capture(capture: C, config: ExportConfig) -> Self {
        Self {
            capture,
            config,
            in_progress: AtomicBool::new(false),
        }
    }

    /// The pipeline configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Whether an export is currently running.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Export `doc` at every configured size.
    ///
    /// The document is only read. On any failure nothing partial is returned
    /// and the pipeline is ready for the next export.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ExportInProgress`] without capturing if another
    /// export is running, or the first error raised while capturing,
    /// scaling, encoding or packaging.
    pub fn export(&self, doc: &Document, include_mockup: bool) -> RenderResult<ExportArchive> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Export requested while another is running");
            return Err(RenderError::ExportInProgress);
        }
        let _guard = InProgressGuard(&self.in_progress);

        tracing::info!(
            "Exporting {} elements (mockup: {include_mockup})",
            doc.element_count()
        );
        self.run(doc, include_mockup).inspect_err(|e| {
            tracing::warn!("Export failed: {e}");
        })
    }

    fn run(&self, doc: &Document, include_mockup: bool) -> RenderResult<ExportArchive> {
        let base = self.capture.capture(doc, include_mockup)?;
        tracing::debug!("Captured {}x{} base image", base.width(), base.height());

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut entries = Vec::with_capacity(self.config.sizes.len());

        for size in &self.config.sizes {
            let variant = stretch_to(&base, size.width, size.height, self.config.filter)?;
            let png = encode_png(&variant)?;
            let name = size.entry_name();
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&png)?;
            tracing::debug!("Packed {name} ({} bytes)", png.len());
            entries.push(ArchiveEntry {
                name,
                width: size.width,
                height: size.height,
                encoded_len: png.len(),
            });
        }

        let bytes = zip.finish()?.into_inner();
        tracing::info!("Export finished: {} entries, {} bytes", entries.len(), bytes.len());
        Ok(ExportArchive {
            file_name: self.config.archive_name.clone(),
            bytes,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    struct SolidCapture;

    impl Capture for SolidCapture {
        fn capture(&self, _doc: &Document, _include_mockup: bool) -> RenderResult<RgbaImage> {
            Ok(RgbaImage::from_pixel(30, 60, Rgba([0, 128, 255, 255])))
        }
    }

    fn small_config() -> ExportConfig {
        ExportConfig {
            sizes: vec![
                DeviceSize {
                    label: "a",
                    width: 12,
                    height: 24,
                },
                DeviceSize {
                    label: "b",
                    width: 7,
                    height: 9,
                },
            ],
            filter: FilterType::Nearest,
            ..ExportConfig::default()
        }
    }

    #[test]
    fn test_entry_names_unique() {
        let names: Vec<String> = SCREENSHOT_SIZES.iter().map(DeviceSize::entry_name).collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(names[0], "screenshot_6.7\"_1290x2796.png");
    }

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.sizes, SCREENSHOT_SIZES.to_vec());
        assert_eq!(config.archive_name, "screenshots.zip");
        assert!((config.capture_scale - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_export_entries_follow_config() {
        let pipeline = ExportPipeline::with_capture(SolidCapture, small_config());
        let archive = pipeline
            .export(&Document::new(), false)
            .expect("export");

        assert_eq!(archive.file_name, "screenshots.zip");
        let dims: Vec<(u32, u32)> = archive.entries.iter().map(|e| (e.width, e.height)).collect();
        assert_eq!(dims, vec![(12, 24), (7, 9)]);
        assert_eq!(&archive.bytes[0..2], b"PK");
        assert!(!pipeline.is_in_progress());
    }

    #[test]
    fn test_flag_reset_after_success() {
        let pipeline = ExportPipeline::with_capture(SolidCapture, small_config());
        pipeline.export(&Document::new(), true).expect("first");
        pipeline.export(&Document::new(), true).expect("second");
        assert!(!pipeline.is_in_progress());
    }

    #[test]
    fn test_zero_size_aborts() {
        let config = ExportConfig {
            sizes: vec![DeviceSize {
                label: "zero",
                width: 0,
                height: 10,
            }],
            ..ExportConfig::default()
        };
        let pipeline = ExportPipeline::with_capture(SolidCapture, config);
        let result = pipeline.export(&Document::new(), false);
        assert!(matches!(result, Err(RenderError::Canvas { .. })));
        assert!(!pipeline.is_in_progress());
    }

    #[test]
    fn test_save_to_writes_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pipeline = ExportPipeline::with_capture(SolidCapture, small_config());
        let archive = pipeline
            .export(&Document::new(), false)
            .expect("export");
        let path = archive.save_to(dir.path().join("out")).expect("save");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("screenshots.zip"));
        assert_eq!(std::fs::read(&path).expect("read"), archive.bytes);
    }
}
