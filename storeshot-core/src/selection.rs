//! Single-element selection state.

use serde::{Deserialize, Serialize};

use crate::{ElementId, ElementKind};

/// Which element, if any, the inspector is editing.
///
/// A text selection and an image selection cannot coexist: selecting one
/// kind replaces the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    /// Nothing selected; inspector and position panel hidden.
    #[default]
    None,
    /// A text element is selected.
    Text(ElementId),
    /// An image element is selected.
    Image(ElementId),
}

impl Selection {
    /// Build a selection for an element of the given kind.
    #[must_use]
    pub fn of(kind: ElementKind, id: ElementId) -> Self {
        match kind {
            ElementKind::Text => Self::Text(id),
            ElementKind::Image => Self::Image(id),
        }
    }

    /// Transition for a click on an element.
    ///
    /// Clicking the selected element deselects it; clicking any other
    /// element selects that one instead.
    #[must_use]
    pub fn click(self, kind: ElementKind, id: ElementId) -> Self {
        let target = Self::of(kind, id);
        if self == target {
            Self::None
        } else {
            target
        }
    }

    /// The selected element, with its kind.
    #[must_use]
    pub fn target(self) -> Option<(ElementKind, ElementId)> {
        match self {
            Self::None => None,
            Self::Text(id) => Some((ElementKind::Text, id)),
            Self::Image(id) => Some((ElementKind::Image, id)),
        }
    }

    /// The selected text element id.
    #[must_use]
    pub fn text(self) -> Option<ElementId> {
        match self {
            Self::Text(id) => Some(id),
            _ => None,
        }
    }

    /// The selected image element id.
    #[must_use]
    pub fn image(self) -> Option<ElementId> {
        match self {
            Self::Image(id) => Some(id),
            _ => None,
        }
    }

    /// Whether anything is selected.
    #[must_use]
    pub fn is_some(self) -> bool {
        self != Self::None
    }

    /// Whether the given element is the selected one.
    #[must_use]
    pub fn is(self, id: ElementId) -> bool {
        self.target().is_some_and(|(_, selected)| selected == id)
    }
}
