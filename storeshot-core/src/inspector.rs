//! Inspector panels for the selected element.
//!
//! The inspector is derived from the document on demand; it holds no state of
//! its own. Slider helpers snap and clamp raw control values before issuing
//! the corresponding tagged update.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{
    Document, ElementId, ImageElement, ImageUpdate, NamedPosition, Position, Selection,
    TextAlign, TextElement,
};

/// Font families offered by the text inspector.
pub const FONT_FAMILIES: [&str; 4] = ["Arial", "Times New Roman", "Helvetica", "Verdana"];

/// Font sizes (px) offered by the text inspector.
pub const FONT_SIZES: [f32; 10] = [12.0, 14.0, 16.0, 18.0, 20.0, 24.0, 28.0, 30.0, 32.0, 40.0];

/// A slider's bounds and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Step between values.
    pub step: f32,
}

impl SliderSpec {
    /// Border radius slider.
    pub const BORDER_RADIUS: Self = Self {
        min: 0.0,
        max: 50.0,
        step: 1.0,
    };

    /// Image width and height sliders.
    pub const IMAGE_SIZE: Self = Self {
        min: 50.0,
        max: 500.0,
        step: 10.0,
    };

    /// Snap a raw value to the nearest step and clamp it into range.
    #[must_use]
    pub fn snap(self, value: f32) -> f32 {
        let stepped = ((value - self.min) / self.step).round().mul_add(self.step, self.min);
        stepped.clamp(self.min, self.max)
    }

    /// The slider range.
    #[must_use]
    pub fn range(self) -> RangeInclusive<f32> {
        self.min..=self.max
    }
}

/// Controls shown while a text element is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPanel {
    /// The element being edited.
    pub element: TextElement,
    /// Alignment it is painted with.
    pub align: TextAlign,
    /// Font family choices.
    pub font_families: &'static [&'static str],
    /// Font size choices.
    pub font_sizes: &'static [f32],
}

/// Controls shown while an image element is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePanel {
    /// The element being edited.
    pub element: ImageElement,
    /// Border radius slider.
    pub border_radius: SliderSpec,
    /// Width slider.
    pub width: SliderSpec,
    /// Height slider.
    pub height: SliderSpec,
}

/// Position controls, shown for either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPanel {
    /// Current position of the selected element.
    pub position: Position,
    /// Grid slot buttons.
    pub slots: &'static [NamedPosition],
}

/// What the inspector shows for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
pub enum Inspector {
    /// Nothing selected: no panels.
    Hidden,
    /// Text controls plus position controls.
    Text {
        /// Style controls.
        style: TextPanel,
        /// Position controls.
        position: PositionPanel,
    },
    /// Image controls plus position controls.
    Image {
        /// Size and radius controls.
        style: ImagePanel,
        /// Position controls.
        position: PositionPanel,
    },
}

impl Inspector {
    /// Build the inspector for the document's current selection.
    ///
    /// A selection pointing at a missing element yields [`Inspector::Hidden`].
    #[must_use]
    pub fn for_document(doc: &Document) -> Self {
        match doc.selection() {
            Selection::None => Self::Hidden,
            Selection::Text(id) => doc.text(id).map_or(Self::Hidden, |element| Self::Text {
                style: TextPanel {
                    element: element.clone(),
                    align: doc.effective_align(element),
                    font_families: &FONT_FAMILIES,
                    font_sizes: &FONT_SIZES,
                },
                position: position_panel(element.position),
            }),
            Selection::Image(id) => doc.image(id).map_or(Self::Hidden, |element| Self::Image {
                style: ImagePanel {
                    element: element.clone(),
                    border_radius: SliderSpec::BORDER_RADIUS,
                    width: SliderSpec::IMAGE_SIZE,
                    height: SliderSpec::IMAGE_SIZE,
                },
                position: position_panel(element.position),
            }),
        }
    }

    /// Whether any panel is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Id of the element being inspected.
    #[must_use]
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::Hidden => None,
            Self::Text { style, .. } => Some(style.element.id),
            Self::Image { style, .. } => Some(style.element.id),
        }
    }
}

fn position_panel(position: Position) -> PositionPanel {
    PositionPanel {
        position,
        slots: &NamedPosition::ALL,
    }
}

/// Which image slider moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlider {
    /// Border radius.
    BorderRadius,
    /// Width.
    Width,
    /// Height.
    Height,
}

impl ImageSlider {
    /// Turn a raw slider value into the update it issues.
    #[must_use]
    pub fn update(self, raw: f32) -> ImageUpdate {
        match self {
            Self::BorderRadius => ImageUpdate::BorderRadius(SliderSpec::BORDER_RADIUS.snap(raw)),
            Self::Width => ImageUpdate::Width(SliderSpec::IMAGE_SIZE.snap(raw)),
            Self::Height => ImageUpdate::Height(SliderSpec::IMAGE_SIZE.snap(raw)),
        }
    }
}
