//! The screenshot document: element lists, background and selection.
//!
//! [`Document`] is the only owner of editing state. Every mutation goes
//! through one of its methods; callers hold it by value or `&mut`.

use serde::{Deserialize, Serialize};

use crate::{
    Axis, Background, CoreResult, ElementId, ElementKind, ImageAsset, ImageAssets, ImageElement,
    ImageHandle, ImageUpdate, ImageUpload, NamedPosition, Position, Selection, TextAlign,
    TextElement, TextUpdate, ZOrder,
};

/// A screenshot composition being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Text elements in creation order.
    texts: Vec<TextElement>,
    /// Image elements in creation order.
    images: Vec<ImageElement>,
    /// Pixel data for image elements.
    assets: ImageAssets,
    /// Active background.
    background: Background,
    /// Current selection.
    selection: Selection,
    /// Alignment for text elements without their own.
    default_align: TextAlign,
}

impl Document {
    /// Create an empty document with the default background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Creation and deletion
    // ---------------------------------------------------------------------

    /// Add a text element with the default style at the default position.
    ///
    /// Returns `None` without touching the document when `content` is empty
    /// or whitespace only.
    pub fn add_text(&mut self, content: &str) -> Option<ElementId> {
        if content.trim().is_empty() {
            return None;
        }
        let element = TextElement::new(content);
        let id = element.id;
        self.texts.push(element);
        tracing::debug!("Added text element {id}");
        Some(id)
    }

    /// Add an image element of the default size at the default position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::NotAnImage`] when the upload's MIME type is
    /// not `image/*`; the document is unchanged.
    pub fn add_image(&mut self, upload: ImageUpload) -> CoreResult<ElementId> {
        upload.validate()?;
        let handle = self.assets.insert(ImageAsset::from_upload(upload));
        let element = ImageElement::new(handle);
        let id = element.id;
        self.images.push(element);
        tracing::debug!("Added image element {id} (asset {})", handle.raw());
        Ok(id)
    }

    /// Remove an element. Its image asset is released and the selection is
    /// cleared if it pointed at this element.
    ///
    /// Returns `false` if no element of that kind has this id.
    pub fn delete(&mut self, id: ElementId, kind: ElementKind) -> bool {
        let removed = match kind {
            ElementKind::Text => take(&mut self.texts, |e| e.id == id).is_some(),
            ElementKind::Image => match take(&mut self.images, |e| e.id == id) {
                Some(image) => {
                    self.assets.release(image.asset);
                    true
                }
                None => false,
            },
        };
        if removed {
            if self.selection == Selection::of(kind, id) {
                self.selection = Selection::None;
            }
            tracing::debug!("Deleted {kind:?} element {id}");
        }
        removed
    }

    // ---------------------------------------------------------------------
    // Field updates
    // ---------------------------------------------------------------------

    /// Update one field of a text element. Returns `false` for unknown ids.
    pub fn update_text(&mut self, id: ElementId, update: TextUpdate) -> bool {
        match self.texts.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.apply(update);
                true
            }
            None => false,
        }
    }

    /// Update one field of an image element. Returns `false` for unknown ids.
    pub fn update_image(&mut self, id: ElementId, update: ImageUpdate) -> bool {
        match self.images.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.apply(update);
                true
            }
            None => false,
        }
    }

    /// Replace an element's position record. Returns `false` for unknown ids.
    pub fn update_position(&mut self, id: ElementId, kind: ElementKind, position: Position) -> bool {
        match self.position_mut(id, kind) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Replace the background.
    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Handle a click on an element. Unknown ids leave the selection as is.
    pub fn click(&mut self, id: ElementId, kind: ElementKind) {
        if self.position_of(id, kind).is_some() {
            self.selection = self.selection.click(kind, id);
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection = Selection::None;
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Delete whatever is selected. Returns `false` when nothing is.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.target() {
            Some((kind, id)) => self.delete(id, kind),
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Placement of the selected element
    // ---------------------------------------------------------------------

    /// Move the selected element to a named grid slot.
    pub fn move_selected_to(&mut self, slot: NamedPosition) -> bool {
        self.map_selected_position(|current| slot.apply(current))
    }

    /// Move one axis of the selected element.
    pub fn slide_selected(&mut self, axis: Axis, value: f32) -> bool {
        self.map_selected_position(|current| axis.apply(current, value))
    }

    /// Bring the selected element to the front or send it to the back.
    pub fn reorder_selected(&mut self, order: ZOrder) -> bool {
        self.map_selected_position(|current| order.apply(current))
    }

    /// Set the alignment of the selected text element.
    pub fn align_selected(&mut self, align: TextAlign) -> bool {
        match self.selection.text() {
            Some(id) => self.update_text(id, TextUpdate::Align(align)),
            None => false,
        }
    }

    /// Set the document-wide alignment and apply it to every text element.
    pub fn apply_alignment_to_all(&mut self, align: TextAlign) {
        self.default_align = align;
        for element in &mut self.texts {
            element.position.text_align = Some(align);
        }
    }

    fn map_selected_position(&mut self, f: impl FnOnce(Position) -> Position) -> bool {
        let Some((kind, id)) = self.selection.target() else {
            return false;
        };
        match self.position_mut(id, kind) {
            Some(slot) => {
                *slot = f(*slot);
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------------

    /// Get a text element.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&TextElement> {
        self.texts.iter().find(|e| e.id == id)
    }

    /// Get an image element.
    #[must_use]
    pub fn image(&self, id: ElementId) -> Option<&ImageElement> {
        self.images.iter().find(|e| e.id == id)
    }

    /// Text elements in creation order.
    #[must_use]
    pub fn texts(&self) -> &[TextElement] {
        &self.texts
    }

    /// Image elements in creation order.
    #[must_use]
    pub fn images(&self) -> &[ImageElement] {
        &self.images
    }

    /// Pixel data behind an image handle.
    #[must_use]
    pub fn asset(&self, handle: ImageHandle) -> Option<&ImageAsset> {
        self.assets.get(handle)
    }

    /// Number of live image assets.
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Active background.
    #[must_use]
    pub fn background(&self) -> Background {
        self.background
    }

    /// Alignment used for text elements without their own.
    #[must_use]
    pub fn default_align(&self) -> TextAlign {
        self.default_align
    }

    /// Alignment a text element is painted with.
    #[must_use]
    pub fn effective_align(&self, element: &TextElement) -> TextAlign {
        element.position.text_align.unwrap_or(self.default_align)
    }

    /// Position of any element.
    #[must_use]
    pub fn position_of(&self, id: ElementId, kind: ElementKind) -> Option<Position> {
        match kind {
            ElementKind::Text => self.text(id).map(|e| e.position),
            ElementKind::Image => self.image(id).map(|e| e.position),
        }
    }

    /// Total number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.texts.len() + self.images.len()
    }

    /// Whether the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    fn position_mut(&mut self, id: ElementId, kind: ElementKind) -> Option<&mut Position> {
        match kind {
            ElementKind::Text => self
                .texts
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.position),
            ElementKind::Image => self
                .images
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.position),
        }
    }
}

fn take<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(pred)?;
    Some(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreError, HexColor};

    fn png_upload() -> ImageUpload {
        ImageUpload::new("shot.png", "image/png", Vec::new())
    }

    #[test]
    fn test_add_text_rejects_blank() {
        let mut doc = Document::new();
        assert_eq!(doc.add_text(""), None);
        assert_eq!(doc.add_text("   \t\n"), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_add_text_defaults() {
        let mut doc = Document::new();
        let id = doc.add_text("Track your habits").expect("added");
        let text = doc.text(id).expect("present");
        assert_eq!(text.text, "Track your habits");
        assert_eq!(text.position, Position::default());
    }

    #[test]
    fn test_add_image_rejects_non_image() {
        let mut doc = Document::new();
        let result = doc.add_image(ImageUpload::new("a.pdf", "application/pdf", vec![1]));
        assert!(matches!(result, Err(CoreError::NotAnImage { .. })));
        assert!(doc.images().is_empty());
        assert_eq!(doc.asset_count(), 0);
    }

    #[test]
    fn test_delete_releases_asset_and_selection() {
        let mut doc = Document::new();
        let id = doc.add_image(png_upload()).expect("image");
        doc.click(id, ElementKind::Image);
        assert_eq!(doc.asset_count(), 1);

        assert!(doc.delete(id, ElementKind::Image));
        assert_eq!(doc.asset_count(), 0);
        assert_eq!(doc.selection(), Selection::None);
        assert!(doc.image(id).is_none());
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut doc = Document::new();
        let a = doc.add_text("a").expect("a");
        let b = doc.add_text("b").expect("b");
        doc.click(a, ElementKind::Text);
        assert!(doc.delete(b, ElementKind::Text));
        assert_eq!(doc.selection(), Selection::Text(a));
    }

    #[test]
    fn test_delete_wrong_kind_is_noop() {
        let mut doc = Document::new();
        let id = doc.add_text("a").expect("a");
        assert!(!doc.delete(id, ElementKind::Image));
        assert_eq!(doc.texts().len(), 1);
    }

    #[test]
    fn test_unknown_id_updates_are_noops() {
        let mut doc = Document::new();
        doc.add_text("a");
        let before = doc.clone();
        let ghost = ElementId::new();
        assert!(!doc.update_text(ghost, TextUpdate::Bold(true)));
        assert!(!doc.update_image(ghost, ImageUpdate::Width(10.0)));
        assert!(!doc.update_position(ghost, ElementKind::Text, Position::new(1.0, 1.0)));
        doc.click(ghost, ElementKind::Text);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_placement_without_selection_is_noop() {
        let mut doc = Document::new();
        doc.add_text("a");
        let before = doc.clone();
        assert!(!doc.move_selected_to(NamedPosition::TopLeft));
        assert!(!doc.slide_selected(Axis::X, 10.0));
        assert!(!doc.reorder_selected(ZOrder::BringToFront));
        assert!(!doc.align_selected(TextAlign::Center));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_alignment_per_element_and_bulk() {
        let mut doc = Document::new();
        let a = doc.add_text("a").expect("a");
        let b = doc.add_text("b").expect("b");
        doc.click(a, ElementKind::Text);
        doc.align_selected(TextAlign::Right);

        let text_a = doc.text(a).expect("a").clone();
        let text_b = doc.text(b).expect("b").clone();
        assert_eq!(doc.effective_align(&text_a), TextAlign::Right);
        assert_eq!(doc.effective_align(&text_b), TextAlign::Left);

        doc.apply_alignment_to_all(TextAlign::Center);
        for text in doc.texts() {
            assert_eq!(doc.effective_align(text), TextAlign::Center);
        }
    }

    #[test]
    fn test_set_background() {
        let mut doc = Document::new();
        let solid = Background::Solid(HexColor::rgb(0x13, 0x80, 0xff));
        doc.set_background(solid);
        assert_eq!(doc.background(), solid);
    }
}
