//! # Storeshot CLI
//!
//! Compose an app-store screenshot from the command line and export it at
//! every device size.
//!
//! ## Usage
//!
//! ```bash
//! storeshot export --out dist --background sky \
//!     --text "Plan your week" --text-at top-center --font-size 24 \
//!     --image app.png --image-at middle-center --mockup
//! ```
//!
//! ```bash
//! storeshot presets
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ExportJob` - Output location, mockup toggle and [`ExportConfig`]
//! - `EditScript` - Editing steps replayed through an [`EditorSession`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storeshot_core::{
    Background, CoreResult, Document, EditorSession, ElementKind, HexColor, ImageSlider,
    ImageUpdate, ImageUpload, NamedPosition, TextAlign, TextUpdate,
};
use storeshot_renderer::ExportConfig;

/// Command-line arguments for storeshot.
#[derive(Debug, Clone, Parser)]
#[command(name = "storeshot")]
#[command(about = "Compose app-store screenshots and export every device size")]
#[command(version)]
pub struct CliArgs {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a composition and write `screenshots.zip`.
    Export(ExportArgs),
    /// List gradient presets, named positions and device sizes.
    Presets,
}

/// Arguments of `storeshot export`.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Directory the archive is written to
    #[arg(long, env = "STORESHOT_OUT", default_value = ".")]
    pub out: PathBuf,

    /// Background: a hex colour (#1380ff) or a gradient preset name
    #[arg(long)]
    pub background: Option<Background>,

    /// Custom gradient start colour (top)
    #[arg(long, requires = "gradient_to")]
    pub gradient_from: Option<HexColor>,

    /// Custom gradient end colour (bottom)
    #[arg(long, requires = "gradient_from")]
    pub gradient_to: Option<HexColor>,

    /// Text element to add (repeatable)
    #[arg(long = "text")]
    pub texts: Vec<String>,

    /// Named position for the text at the same index (repeatable)
    #[arg(long = "text-at")]
    pub text_at: Vec<NamedPosition>,

    /// Font size for every text element
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Font family for every text element
    #[arg(long)]
    pub font_family: Option<String>,

    /// Text colour for every text element
    #[arg(long)]
    pub color: Option<HexColor>,

    /// Bold text
    #[arg(long)]
    pub bold: bool,

    /// Alignment applied to every text element (left, center, right)
    #[arg(long)]
    pub align: Option<TextAlign>,

    /// Image file to add (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    /// Named position for the image at the same index (repeatable)
    #[arg(long = "image-at")]
    pub image_at: Vec<NamedPosition>,

    /// Width and height of every image element
    #[arg(long)]
    pub image_size: Option<f32>,

    /// Corner radius of every image element
    #[arg(long)]
    pub border_radius: Option<f32>,

    /// Draw the device frame around the capture
    #[arg(long, env = "STORESHOT_MOCKUP")]
    pub mockup: bool,

    /// Capture scale relative to the 300x600 view
    #[arg(long, default_value = "2.0")]
    pub capture_scale: f32,

    /// Skip loading system fonts (text elements will not render)
    #[arg(long)]
    pub no_system_fonts: bool,

    /// Print the composed document as JSON before exporting
    #[arg(long)]
    pub print_document: bool,
}

/// Editing steps that build the document.
#[derive(Debug, Clone, Default)]
pub struct EditScript {
    /// Solid or preset background.
    pub background: Option<Background>,
    /// Custom gradient colours, applied after `background`.
    pub custom_gradient: Option<(HexColor, HexColor)>,
    /// Texts and their slots.
    pub texts: Vec<(String, Option<NamedPosition>)>,
    /// Style updates applied to every text.
    pub text_style: Vec<TextUpdate>,
    /// Alignment applied to all texts.
    pub align: Option<TextAlign>,
    /// Images and their slots.
    pub images: Vec<(PathBuf, Option<NamedPosition>)>,
    /// Style updates applied to every image.
    pub image_style: Vec<ImageUpdate>,
}

impl EditScript {
    /// Replay the script through an editor session.
    ///
    /// Blank texts are skipped the same way the editor skips them.
    ///
    /// # Errors
    ///
    /// Returns an error if an image cannot be read or is not an image.
    pub fn build(&self) -> CoreResult<Document> {
        let mut session = EditorSession::new();
        if let Some(background) = self.background {
            session.document.set_background(background);
        }
        if let Some((from, to)) = self.custom_gradient {
            session.custom_from = from;
            session.custom_to = to;
            session.apply_custom_gradient();
        }

        for (text, slot) in &self.texts {
            session.text_input.clone_from(text);
            let Some(id) = session.submit_text() else {
                tracing::debug!("Skipping blank text");
                continue;
            };
            for update in &self.text_style {
                session.document.update_text(id, update.clone());
            }
            if let Some(slot) = slot {
                session.document.click(id, ElementKind::Text);
                session.document.move_selected_to(*slot);
                session.document.deselect();
            }
        }
        if let Some(align) = self.align {
            session.document.apply_alignment_to_all(align);
        }

        for (path, slot) in &self.images {
            let id = session.pick_image(ImageUpload::from_path(path)?)?;
            for update in &self.image_style {
                session.document.update_image(id, *update);
            }
            if let Some(slot) = slot {
                session.document.click(id, ElementKind::Image);
                session.document.move_selected_to(*slot);
                session.document.deselect();
            }
        }

        Ok(session.document)
    }
}

/// A fully resolved export request.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Output directory.
    pub out: PathBuf,
    /// Capture the device frame.
    pub include_mockup: bool,
    /// Print the document as JSON.
    pub print_document: bool,
    /// Pipeline configuration.
    pub config: ExportConfig,
    /// Document construction.
    pub script: EditScript,
}

impl From<ExportArgs> for ExportJob {
    fn from(args: ExportArgs) -> Self {
        let mut text_style = Vec::new();
        if let Some(size) = args.font_size {
            text_style.push(TextUpdate::FontSize(size));
        }
        if let Some(family) = args.font_family {
            text_style.push(TextUpdate::FontFamily(family));
        }
        if let Some(color) = args.color {
            text_style.push(TextUpdate::Color(color.to_string()));
        }
        if args.bold {
            text_style.push(TextUpdate::Bold(true));
        }

        let mut image_style = Vec::new();
        if let Some(size) = args.image_size {
            image_style.push(ImageSlider::Width.update(size));
            image_style.push(ImageSlider::Height.update(size));
        }
        if let Some(radius) = args.border_radius {
            image_style.push(ImageSlider::BorderRadius.update(radius));
        }

        let script = EditScript {
            background: args.background,
            custom_gradient: args.gradient_from.zip(args.gradient_to),
            texts: pair_slots(args.texts, &args.text_at),
            text_style,
            align: args.align,
            images: pair_slots(args.images, &args.image_at),
            image_style,
        };

        Self {
            out: args.out,
            include_mockup: args.mockup,
            print_document: args.print_document,
            config: ExportConfig {
                capture_scale: args.capture_scale,
                load_system_fonts: !args.no_system_fonts,
                ..ExportConfig::default()
            },
            script,
        }
    }
}

fn pair_slots<T>(items: Vec<T>, slots: &[NamedPosition]) -> Vec<(T, Option<NamedPosition>)> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (item, slots.get(i).copied()))
        .collect()
}
