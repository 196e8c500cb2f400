//! Composition view: the phone-shaped paint list derived from a document.
//!
//! ```text
//! ┌──────── frame 300×600, r=55 ────────┐
//! │ ┌────── content 276×576, r=48 ────┐ │
//! │ │        ┌── notch 120×35 ──┐     │ │
//! │ │        └──────────────────┘     │ │
//! │ │   elements at (x, y), z-order   │ │
//! │ └─────────────────────────────────┘ │
//! └─────────────────────────────────────┘
//! ```
//!
//! The view is pure data. [`RenderMode::Capture`] views never contain the
//! editing affordances (grid, dashed outline), so anything rasterized from
//! them is free of selection chrome.

use serde::Serialize;

use crate::{Background, Document, ElementId, HexColor, ImageHandle, TextAlign, TextStyle};

/// Outer frame width in pixels.
pub const FRAME_WIDTH: f32 = 300.0;
/// Outer frame height in pixels.
pub const FRAME_HEIGHT: f32 = 600.0;
/// Outer frame corner radius.
pub const FRAME_RADIUS: f32 = 55.0;
/// Bezel thickness between frame and content.
pub const BEZEL_INSET: f32 = 12.0;
/// Content area corner radius when the mockup is shown.
pub const CONTENT_RADIUS: f32 = 48.0;
/// Notch size.
pub const NOTCH_SIZE: (f32, f32) = (120.0, 35.0);
/// Gap between the content top and the notch.
pub const NOTCH_TOP: f32 = 8.0;
/// Grid overlay cell size.
pub const GRID_CELL: f32 = 20.0;
/// Selection outline colour.
pub const OUTLINE_COLOR: HexColor = HexColor::rgb(0x00, 0x00, 0xff);
/// Selection outline stroke width.
pub const OUTLINE_WIDTH: f32 = 2.0;

/// An axis-aligned rectangle in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the rectangle by `amount` on every side.
    #[must_use]
    pub fn inflate(self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// Whether the view is for on-screen editing or for capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// On-screen: selection affordances are drawn.
    #[default]
    Editing,
    /// Export capture: selection affordances are never drawn.
    Capture,
}

/// Options for building a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewOptions {
    /// Draw the device frame, bezel and notch.
    pub include_mockup: bool,
    /// Editing or capture.
    pub mode: RenderMode,
}

impl ViewOptions {
    /// Options for an export capture.
    #[must_use]
    pub fn capture(include_mockup: bool) -> Self {
        Self {
            include_mockup,
            mode: RenderMode::Capture,
        }
    }
}

/// One paint operation, in view coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    /// Device frame (black bezel).
    Frame {
        /// Frame bounds.
        rect: Rect,
        /// Corner radius.
        corner_radius: f32,
        /// Fill colour.
        color: HexColor,
    },
    /// Content background.
    Background {
        /// Content bounds.
        rect: Rect,
        /// Corner radius (0 without mockup).
        corner_radius: f32,
        /// Fill.
        fill: Background,
    },
    /// Camera notch.
    Notch {
        /// Notch bounds.
        rect: Rect,
        /// Fill colour.
        color: HexColor,
    },
    /// A text element.
    Text {
        /// Element id.
        id: ElementId,
        /// Content.
        text: String,
        /// Style.
        style: TextStyle,
        /// Anchor x.
        x: f32,
        /// Top of the text box.
        y: f32,
        /// Resolved alignment.
        align: TextAlign,
    },
    /// An image element.
    Image {
        /// Element id.
        id: ElementId,
        /// Asset to draw.
        asset: ImageHandle,
        /// Box the image is fitted into.
        rect: Rect,
        /// Corner radius.
        border_radius: f32,
    },
    /// Editing grid overlay.
    Grid {
        /// Area covered.
        rect: Rect,
        /// Cell size.
        cell: f32,
    },
    /// Dashed outline around the selected element.
    SelectionOutline {
        /// Outline bounds.
        rect: Rect,
        /// Stroke colour.
        color: HexColor,
        /// Stroke width.
        stroke_width: f32,
    },
}

impl Layer {
    /// Whether this layer exists only while editing.
    #[must_use]
    pub fn is_editing_affordance(&self) -> bool {
        matches!(self, Self::Grid { .. } | Self::SelectionOutline { .. })
    }
}

/// The paint list for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionView {
    /// View width in pixels.
    pub width: f32,
    /// View height in pixels.
    pub height: f32,
    /// Content area; elements are clipped to it.
    pub content: Rect,
    /// Content corner radius used for clipping.
    pub content_radius: f32,
    /// Paint operations, back to front.
    pub layers: Vec<Layer>,
}

impl CompositionView {
    /// Build the view for `doc`.
    ///
    /// With the mockup the view is the whole frame; without it the view is
    /// the content area alone, with square corners and no notch.
    #[must_use]
    pub fn build(doc: &Document, options: ViewOptions) -> Self {
        let (width, height, offset, content_radius) = if options.include_mockup {
            (FRAME_WIDTH, FRAME_HEIGHT, BEZEL_INSET, CONTENT_RADIUS)
        } else {
            (
                FRAME_WIDTH - BEZEL_INSET * 2.0,
                FRAME_HEIGHT - BEZEL_INSET * 2.0,
                0.0,
                0.0,
            )
        };
        let content = Rect::new(
            offset,
            offset,
            FRAME_WIDTH - BEZEL_INSET * 2.0,
            FRAME_HEIGHT - BEZEL_INSET * 2.0,
        );

        let mut layers = Vec::with_capacity(doc.element_count() + 5);
        if options.include_mockup {
            layers.push(Layer::Frame {
                rect: Rect::new(0.0, 0.0, FRAME_WIDTH, FRAME_HEIGHT),
                corner_radius: FRAME_RADIUS,
                color: HexColor::BLACK,
            });
        }
        layers.push(Layer::Background {
            rect: content,
            corner_radius: content_radius,
            fill: doc.background(),
        });

        // Stable sort keeps creation order (texts before images) within a z-index.
        let mut elements: Vec<(i32, Layer)> = doc
            .texts()
            .iter()
            .map(|text| {
                (
                    text.position.z_index,
                    Layer::Text {
                        id: text.id,
                        text: text.text.clone(),
                        style: text.style.clone(),
                        x: offset + text.position.x,
                        y: offset + text.position.y,
                        align: doc.effective_align(text),
                    },
                )
            })
            .chain(doc.images().iter().map(|image| {
                (
                    image.position.z_index,
                    Layer::Image {
                        id: image.id,
                        asset: image.asset,
                        rect: Rect::new(
                            offset + image.position.x,
                            offset + image.position.y,
                            image.width,
                            image.height,
                        ),
                        border_radius: image.border_radius,
                    },
                )
            }))
            .collect();
        elements.sort_by_key(|(z_index, _)| *z_index);
        layers.extend(elements.into_iter().map(|(_, layer)| layer));

        // The notch sits above the elements.
        if options.include_mockup {
            let (notch_w, notch_h) = NOTCH_SIZE;
            layers.push(Layer::Notch {
                rect: Rect::new(
                    content.x + (content.width - notch_w) / 2.0,
                    content.y + NOTCH_TOP,
                    notch_w,
                    notch_h,
                ),
                color: HexColor::BLACK,
            });
        }

        if options.mode == RenderMode::Editing {
            if let Some(rect) = selected_bounds(&layers, doc) {
                layers.push(Layer::Grid {
                    rect: Rect::new(0.0, 0.0, width, height),
                    cell: GRID_CELL,
                });
                layers.push(Layer::SelectionOutline {
                    rect: rect.inflate(OUTLINE_WIDTH),
                    color: OUTLINE_COLOR,
                    stroke_width: OUTLINE_WIDTH,
                });
            }
        }

        Self {
            width,
            height,
            content,
            content_radius,
            layers,
        }
    }

    /// Whether any editing-only layer is present.
    #[must_use]
    pub fn has_editing_affordances(&self) -> bool {
        self.layers.iter().any(Layer::is_editing_affordance)
    }
}

fn selected_bounds(layers: &[Layer], doc: &Document) -> Option<Rect> {
    let (_, selected) = doc.selection().target()?;
    layers.iter().find_map(|layer| match layer {
        Layer::Text {
            id, text, style, x, y, align,
        } if *id == selected => Some(text_bounds(text, style, *x, *y, *align)),
        Layer::Image { id, rect, .. } if *id == selected => Some(*rect),
        _ => None,
    })
}

/// Approximate box of a single-line text run; only used for the outline.
#[allow(clippy::cast_precision_loss)]
fn text_bounds(text: &str, style: &TextStyle, x: f32, y: f32, align: TextAlign) -> Rect {
    let width = text.chars().count() as f32 * style.font_size * 0.6;
    let left = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width / 2.0,
        TextAlign::Right => x - width,
    };
    Rect::new(left, y, width, style.font_size * 1.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementKind, ImageUpload, Position};

    fn doc_with_selection() -> (Document, ElementId) {
        let mut doc = Document::new();
        let id = doc.add_text("Hello").expect("text");
        doc.add_image(ImageUpload::new("a.png", "image/png", Vec::new()))
            .expect("image");
        doc.click(id, ElementKind::Text);
        (doc, id)
    }

    #[test]
    fn test_capture_mode_has_no_affordances() {
        let (doc, _) = doc_with_selection();
        for include_mockup in [true, false] {
            let view = CompositionView::build(&doc, ViewOptions::capture(include_mockup));
            assert!(!view.has_editing_affordances());
        }
    }

    #[test]
    fn test_editing_mode_shows_affordances_only_with_selection() {
        let (mut doc, _) = doc_with_selection();
        let view = CompositionView::build(&doc, ViewOptions::default());
        assert!(view.has_editing_affordances());

        doc.deselect();
        let view = CompositionView::build(&doc, ViewOptions::default());
        assert!(!view.has_editing_affordances());
    }

    #[test]
    fn test_mockup_geometry() {
        let doc = Document::new();
        let view = CompositionView::build(&doc, ViewOptions::capture(true));
        assert_eq!((view.width, view.height), (300.0, 600.0));
        assert_eq!(view.content, Rect::new(12.0, 12.0, 276.0, 576.0));
        assert!(matches!(view.layers[0], Layer::Frame { .. }));
        assert!(matches!(view.layers.last(), Some(Layer::Notch { .. })));

        let bare = CompositionView::build(&doc, ViewOptions::capture(false));
        assert_eq!((bare.width, bare.height), (276.0, 576.0));
        assert!(bare.content_radius.abs() < f32::EPSILON);
        assert!(!bare
            .layers
            .iter()
            .any(|l| matches!(l, Layer::Frame { .. } | Layer::Notch { .. })));
    }

    #[test]
    fn test_elements_offset_by_bezel_with_mockup() {
        let mut doc = Document::new();
        let id = doc.add_text("Hi").expect("text");
        doc.update_position(id, ElementKind::Text, Position::new(20.0, 60.0));

        let view = CompositionView::build(&doc, ViewOptions::capture(true));
        let text = view
            .layers
            .iter()
            .find(|l| matches!(l, Layer::Text { .. }))
            .expect("text layer");
        let Layer::Text { x, y, .. } = text else {
            unreachable!()
        };
        assert_eq!((*x, *y), (32.0, 72.0));
    }

    #[test]
    fn test_paint_order_follows_z_index() {
        let mut doc = Document::new();
        let low = doc.add_text("low").expect("low");
        let high = doc.add_text("high").expect("high");
        let image = doc
            .add_image(ImageUpload::new("a.png", "image/png", Vec::new()))
            .expect("image");
        doc.update_position(low, ElementKind::Text, Position::new(0.0, 0.0).with_z_index(5));
        doc.update_position(high, ElementKind::Text, Position::new(0.0, 0.0).with_z_index(10));

        let view = CompositionView::build(&doc, ViewOptions::capture(false));
        let order: Vec<ElementId> = view
            .layers
            .iter()
            .filter_map(|l| match l {
                Layer::Text { id, .. } | Layer::Image { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![image, low, high]);
    }
}
