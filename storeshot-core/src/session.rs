//! Editor session state around a document.

use crate::{
    Background, CompositionView, CoreResult, Document, ElementId, Gradient, HexColor,
    ImageUpload, Inspector, ViewOptions,
};

/// Editing state that is not part of the document itself: the pending
/// text input, the custom-gradient colour pickers and the mockup toggle.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    /// The document being edited.
    pub document: Document,
    /// Contents of the "add text" input.
    pub text_input: String,
    /// Show the device frame on screen and in exports.
    pub include_mockup: bool,
    /// Custom gradient start colour.
    pub custom_from: HexColor,
    /// Custom gradient end colour.
    pub custom_to: HexColor,
}

impl EditorSession {
    /// Create a session around an empty document, with the mockup shown.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_mockup: true,
            ..Self::default()
        }
    }

    /// Submit the pending text input.
    ///
    /// Blank input is ignored and left in place; otherwise the element is
    /// added and the input cleared.
    pub fn submit_text(&mut self) -> Option<ElementId> {
        let id = self.document.add_text(&self.text_input)?;
        self.text_input.clear();
        Some(id)
    }

    /// Hand a picked file to the document.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::CoreError::NotAnImage`]; the caller shows it to
    /// the user.
    pub fn pick_image(&mut self, upload: ImageUpload) -> CoreResult<ElementId> {
        self.document.add_image(upload).inspect_err(|e| {
            tracing::warn!("Rejected upload: {e}");
        })
    }

    /// Apply the gradient built from the two custom colour pickers.
    pub fn apply_custom_gradient(&mut self) {
        self.document
            .set_background(Background::Gradient(Gradient::custom(self.custom_from, self.custom_to)));
    }

    /// The on-screen view.
    #[must_use]
    pub fn view(&self) -> CompositionView {
        CompositionView::build(
            &self.document,
            ViewOptions {
                include_mockup: self.include_mockup,
                ..ViewOptions::default()
            },
        )
    }

    /// The inspector for the current selection.
    #[must_use]
    pub fn inspector(&self) -> Inspector {
        Inspector::for_document(&self.document)
    }
}
