//! Composition elements - the text and image building blocks of a screenshot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Z-index given to every new element (lowest paint priority).
pub const DEFAULT_Z_INDEX: i32 = 1;

/// Default font size for new text elements, in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Default font family for new text elements.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Default text colour for new text elements.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Default width and height of a new image element, in pixels.
pub const DEFAULT_IMAGE_SIZE: f32 = 200.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which list an element lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A text element.
    Text,
    /// An image element.
    Image,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text starts at the element's x coordinate.
    #[default]
    Left,
    /// Text is centred on the element's x coordinate.
    Center,
    /// Text ends at the element's x coordinate.
    Right,
}

impl TextAlign {
    /// All alignments, in button order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    /// The SVG `text-anchor` value for this alignment.
    #[must_use]
    pub fn text_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }

    /// Lowercase name, as used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl std::str::FromStr for TextAlign {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|align| align.name() == s)
            .ok_or_else(|| crate::CoreError::unknown("alignment", s))
    }
}

/// Placement of an element inside the composition's content area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X offset in pixels from the content area's left edge.
    pub x: f32,
    /// Y offset in pixels from the content area's top edge.
    pub y: f32,
    /// Stacking order; higher paints later.
    pub z_index: i32,
    /// Per-element alignment; `None` falls back to the document default.
    pub text_align: Option<TextAlign>,
}

impl Position {
    /// Create a position at the given coordinates with the default z-index.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z_index: DEFAULT_Z_INDEX,
            text_align: None,
        }
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the per-element text alignment.
    #[must_use]
    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(50.0, 50.0)
    }
}

/// Visual style of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Font family name.
    pub font_family: String,
    /// Text colour as hex.
    pub color: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// A text label placed on the composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Unique identifier.
    pub id: ElementId,
    /// Text content.
    pub text: String,
    /// Font and decoration.
    pub style: TextStyle,
    /// Placement.
    pub position: Position,
}

impl TextElement {
    /// Create a text element with the default style and position.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            text: text.into(),
            style: TextStyle::default(),
            position: Position::default(),
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Apply a single field update.
    pub fn apply(&mut self, update: TextUpdate) {
        match update {
            TextUpdate::Text(text) => self.text = text,
            TextUpdate::FontSize(size) => self.style.font_size = size,
            TextUpdate::FontFamily(family) => self.style.font_family = family,
            TextUpdate::Color(color) => self.style.color = color,
            TextUpdate::Bold(on) => self.style.bold = on,
            TextUpdate::Italic(on) => self.style.italic = on,
            TextUpdate::Underline(on) => self.style.underline = on,
            TextUpdate::Align(align) => self.position.text_align = Some(align),
        }
    }
}

/// Handle to an uploaded image held by the document's asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(u64);

impl ImageHandle {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// An uploaded image placed on the composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Unique identifier.
    pub id: ElementId,
    /// Handle to the image bytes.
    pub asset: ImageHandle,
    /// Corner radius in pixels.
    pub border_radius: f32,
    /// Display width in pixels.
    pub width: f32,
    /// Display height in pixels.
    pub height: f32,
    /// Placement.
    pub position: Position,
}

impl ImageElement {
    /// Create an image element with the default size and position.
    #[must_use]
    pub fn new(asset: ImageHandle) -> Self {
        Self {
            id: ElementId::new(),
            asset,
            border_radius: 0.0,
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
            position: Position::default(),
        }
    }

    /// Apply a single field update.
    pub fn apply(&mut self, update: ImageUpdate) {
        match update {
            ImageUpdate::BorderRadius(radius) => self.border_radius = radius,
            ImageUpdate::Width(width) => self.width = width,
            ImageUpdate::Height(height) => self.height = height,
        }
    }
}

/// An updatable field of a [`TextElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextUpdate {
    /// Replace the content.
    Text(String),
    /// Font size in pixels.
    FontSize(f32),
    /// Font family name.
    FontFamily(String),
    /// Text colour as hex.
    Color(String),
    /// Toggle bold.
    Bold(bool),
    /// Toggle italic.
    Italic(bool),
    /// Toggle underline.
    Underline(bool),
    /// Per-element alignment.
    Align(TextAlign),
}

/// An updatable field of an [`ImageElement`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageUpdate {
    /// Corner radius in pixels.
    BorderRadius(f32),
    /// Display width in pixels.
    Width(f32),
    /// Display height in pixels.
    Height(f32),
}
