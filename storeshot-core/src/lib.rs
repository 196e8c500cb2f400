//! # Storeshot Core
//!
//! Document model for composing app-store screenshots.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               storeshot-core                │
//! ├─────────────────────────────────────────────┤
//! │  Document        │  Placement               │
//! │  - Text/images   │  - Named grid slots      │
//! │  - Background    │  - Axis sliders          │
//! │  - Asset table   │  - Z-order shortcuts     │
//! ├─────────────────────────────────────────────┤
//! │  Selection       │  Composition View        │
//! │  - Inspector     │  - Frame / notch         │
//! │  - Editor state  │  - Paint order, overlays │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod background;
pub mod composition;
pub mod document;
pub mod element;
pub mod error;
pub mod inspector;
pub mod placement;
pub mod selection;
pub mod session;

pub use asset::{ImageAsset, ImageAssets, ImageUpload};
pub use background::{Background, Gradient, GradientDirection, GradientPreset, HexColor, GRADIENT_PRESETS};
pub use composition::{CompositionView, Layer, Rect, RenderMode, ViewOptions};
pub use document::Document;
pub use element::{
    ElementId, ElementKind, ImageElement, ImageHandle, ImageUpdate, Position, TextAlign,
    TextElement, TextStyle, TextUpdate, DEFAULT_Z_INDEX,
};
pub use error::{CoreError, CoreResult};
pub use inspector::{ImageSlider, Inspector, SliderSpec, FONT_FAMILIES, FONT_SIZES};
pub use placement::{Axis, NamedPosition, ZOrder, BACK_Z_INDEX, FRONT_Z_INDEX};
pub use selection::Selection;
pub use session::EditorSession;

/// Storeshot core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
