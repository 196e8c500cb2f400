//! # Storeshot Renderer
//!
//! Capture and export for Storeshot compositions.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌────────────┐   ┌──────────────┐
//! │ Composition  │──▶│   SVG    │──▶│ usvg/resvg │──▶│  base image  │
//! │ View         │   │          │   │ tiny-skia  │   │  (RGBA)      │
//! └──────────────┘   └──────────┘   └────────────┘   └──────┬───────┘
//!                                                          │
//!            ┌─────────────────────────────────────────────┘
//!            ▼
//! ┌──────────────────────┐   ┌────────────┐   ┌─────────────────┐
//! │ stretch per device   │──▶│ PNG encode │──▶│ screenshots.zip │
//! └──────────────────────┘   └────────────┘   └─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod error;
pub mod export;
pub mod image;
pub mod svg;

pub use capture::{Capture, SvgCapture};
pub use error::{RenderError, RenderResult};
pub use export::{
    ArchiveEntry, DeviceSize, ExportArchive, ExportConfig, ExportPipeline, ARCHIVE_NAME,
    SCREENSHOT_SIZES,
};
pub use svg::render_svg;

/// Re-exported so callers can pick a resize filter without depending on `image`.
pub use ::image::imageops::FilterType;
