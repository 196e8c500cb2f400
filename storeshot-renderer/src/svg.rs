//! SVG rendering of a [`CompositionView`].
//!
//! The SVG is the intermediate representation handed to usvg/resvg. It has
//! no opaque page fill: anything outside the frame (or the content area when
//! the mockup is off) stays transparent.

use std::fmt::Write;

use storeshot_core::{
    Background, CompositionView, Document, GradientDirection, Layer, Rect, TextAlign, TextStyle,
};

use crate::image::data_uri;

const CONTENT_CLIP_ID: &str = "content-clip";
const BACKGROUND_FILL_ID: &str = "background-fill";
const GRID_PATTERN_ID: &str = "grid";

/// Render `view` to an SVG document `scale` times the view size.
///
/// `doc` supplies the bytes of the image assets the view references. Image
/// layers whose asset is gone are skipped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_svg(view: &CompositionView, doc: &Document, scale: f32) -> String {
    let out_w = (view.width * scale).round().max(1.0) as u32;
    let out_h = (view.height * scale).round().max(1.0) as u32;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {} {}\">",
        view.width, view.height,
    );

    svg.push_str("<defs>");
    write_content_clip(&mut svg, view.content, view.content_radius);
    svg.push_str("</defs>");

    let mut clip_open = false;
    let mut image_clips = 0_usize;
    for layer in &view.layers {
        let is_element = matches!(layer, Layer::Text { .. } | Layer::Image { .. });
        if is_element && !clip_open {
            let _ = write!(svg, "<g clip-path=\"url(#{CONTENT_CLIP_ID})\">");
            clip_open = true;
        } else if !is_element && clip_open {
            svg.push_str("</g>");
            clip_open = false;
        }

        write_layer(&mut svg, layer, doc, &mut image_clips);
    }
    if clip_open {
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn write_layer(svg: &mut String, layer: &Layer, doc: &Document, image_clips: &mut usize) {
    match layer {
        Layer::Frame {
            rect,
            corner_radius,
            color,
        } => {
            write_rect(svg, *rect, *corner_radius, &color.to_string());
        }
        Layer::Background {
            rect,
            corner_radius,
            fill,
        } => {
            let paint = write_background_paint(svg, *fill);
            write_rect(svg, *rect, *corner_radius, &paint);
        }
        Layer::Notch { rect, color } => {
            write_rect(svg, *rect, rect.height / 2.0, &color.to_string());
        }
        Layer::Text {
            text,
            style,
            x,
            y,
            align,
            ..
        } => write_text(svg, text, style, *x, *y, *align),
        Layer::Image {
            asset,
            rect,
            border_radius,
            id,
        } => {
            let Some(asset) = doc.asset(*asset) else {
                tracing::warn!("Image {id} has no asset; skipping");
                return;
            };
            *image_clips += 1;
            let clip_id = format!("image-clip-{image_clips}");
            let _ = write!(svg, "<defs><clipPath id=\"{clip_id}\">");
            write_rect(svg, *rect, *border_radius, "#000");
            svg.push_str("</clipPath></defs>");
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\" clip-path=\"url(#{clip_id})\" href=\"{}\"/>",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                data_uri(asset),
            );
        }
        Layer::Grid { rect, cell } => {
            let _ = write!(
                svg,
                "<defs><pattern id=\"{GRID_PATTERN_ID}\" width=\"{cell}\" height=\"{cell}\" patternUnits=\"userSpaceOnUse\"><path d=\"M {cell} 0 L 0 0 0 {cell}\" fill=\"none\" stroke=\"#fff\" stroke-opacity=\"0.1\" stroke-width=\"1\"/></pattern></defs>",
            );
            write_rect(svg, *rect, 0.0, &format!("url(#{GRID_PATTERN_ID})"));
        }
        Layer::SelectionOutline {
            rect,
            color,
            stroke_width,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{stroke_width}\" stroke-dasharray=\"4 2\"/>",
                rect.x, rect.y, rect.width, rect.height,
            );
        }
    }
}

fn write_content_clip(svg: &mut String, content: Rect, radius: f32) {
    let _ = write!(svg, "<clipPath id=\"{CONTENT_CLIP_ID}\">");
    write_rect(svg, content, radius, "#000");
    svg.push_str("</clipPath>");
}

fn write_rect(svg: &mut String, rect: Rect, radius: f32, fill: &str) {
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{radius}\" fill=\"{fill}\"/>",
        rect.x, rect.y, rect.width, rect.height,
    );
}

/// Emit any gradient definition and return the paint for the background rect.
fn write_background_paint(svg: &mut String, fill: Background) -> String {
    match fill {
        Background::Solid(color) => color.to_string(),
        Background::Gradient(gradient) => {
            let (x2, y2) = match gradient.direction {
                GradientDirection::ToRight => (1, 0),
                GradientDirection::ToBottom => (0, 1),
            };
            let _ = write!(
                svg,
                "<defs><linearGradient id=\"{BACKGROUND_FILL_ID}\" x1=\"0\" y1=\"0\" x2=\"{x2}\" y2=\"{y2}\"><stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/></linearGradient></defs>",
                gradient.from, gradient.to,
            );
            format!("url(#{BACKGROUND_FILL_ID})")
        }
    }
}

fn write_text(svg: &mut String, text: &str, style: &TextStyle, x: f32, y: f32, align: TextAlign) {
    // SVG positions text by its baseline; the layer gives the top of the box.
    let baseline = y + style.font_size;
    let weight = if style.bold { "bold" } else { "normal" };
    let font_style = if style.italic { "italic" } else { "normal" };
    let _ = write!(
        svg,
        "<text x=\"{x}\" y=\"{baseline}\" font-size=\"{}\" font-family=\"{}, sans-serif\" font-weight=\"{weight}\" font-style=\"{font_style}\" fill=\"{}\" text-anchor=\"{}\"",
        style.font_size,
        escape_xml(&style.font_family),
        escape_xml(&style.color),
        align.text_anchor(),
    );
    if style.underline {
        svg.push_str(" text-decoration=\"underline\"");
    }
    let _ = write!(svg, ">{}</text>", escape_xml(text));
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeshot_core::{ElementKind, HexColor, ImageUpload, TextUpdate, ViewOptions};

    fn document() -> Document {
        let mut doc = Document::new();
        let text = doc.add_text("Fish & <Chips>").expect("text");
        doc.update_text(text, TextUpdate::Bold(true));
        doc.update_text(text, TextUpdate::Underline(true));
        doc.add_image(ImageUpload::new("a.png", "image/png", b"png".to_vec()))
            .expect("image");
        doc.click(text, ElementKind::Text);
        doc
    }

    #[test]
    fn test_svg_dimensions_scale() {
        let doc = Document::new();
        let view = CompositionView::build(&doc, ViewOptions::capture(true));
        let svg = render_svg(&view, &doc, 2.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"600\""));
        assert!(svg.contains("height=\"1200\""));
        assert!(svg.contains("viewBox=\"0 0 300 600\""));
    }

    #[test]
    fn test_text_attributes_and_escaping() {
        let doc = document();
        let view = CompositionView::build(&doc, ViewOptions::capture(false));
        let svg = render_svg(&view, &doc, 1.0);
        assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-decoration=\"underline\""));
        assert!(svg.contains("text-anchor=\"start\""));
        assert!(svg.contains("font-family=\"Arial, sans-serif\""));
    }

    #[test]
    fn test_image_embedded_with_contain_fit() {
        let doc = document();
        let view = CompositionView::build(&doc, ViewOptions::capture(false));
        let svg = render_svg(&view, &doc, 1.0);
        assert!(svg.contains("href=\"data:image/png;base64,cG5n\""));
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
        assert!(svg.contains("image-clip-1"));
    }

    #[test]
    fn test_capture_svg_has_no_overlays() {
        let doc = document();
        let capture = render_svg(
            &CompositionView::build(&doc, ViewOptions::capture(true)),
            &doc,
            1.0,
        );
        assert!(!capture.contains("stroke-dasharray"));
        assert!(!capture.contains("<pattern"));

        let editing = render_svg(
            &CompositionView::build(&doc, ViewOptions::default()),
            &doc,
            1.0,
        );
        assert!(editing.contains("stroke-dasharray"));
        assert!(editing.contains("<pattern"));
    }

    #[test]
    fn test_grid_lines_are_faint_white() {
        let doc = Document::new();
        let svg = render_svg(
            &CompositionView::build(&doc, ViewOptions::default()),
            &doc,
            1.0,
        );
        assert!(svg.contains("stroke=\"#fff\" stroke-opacity=\"0.1\""));
        assert!(!svg.contains("stroke=\"#000\""));
    }

    #[test]
    fn test_background_paint() {
        let mut doc = Document::new();
        let view = CompositionView::build(&doc, ViewOptions::capture(false));
        let svg = render_svg(&view, &doc, 1.0);
        assert!(svg.contains("<linearGradient"));
        assert!(svg.contains("stop-color=\"#a855f7\""));

        doc.set_background(Background::Solid(HexColor::rgb(0x13, 0x80, 0xff)));
        let view = CompositionView::build(&doc, ViewOptions::capture(false));
        let svg = render_svg(&view, &doc, 1.0);
        assert!(!svg.contains("<linearGradient"));
        assert!(svg.contains("fill=\"#1380ff\""));
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(
            escape_xml("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;"
        );
    }
}
