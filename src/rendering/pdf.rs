//! PDF backend: paints a [`DocumentDrawing`] with printpdf's builtin fonts.
//!
//! Drawings use a top-left origin; PDF user space starts bottom-left, so every
//! y coordinate is flipped against the page height.

use crate::error::RenderError;
use pip_grid::{DocumentDrawing, DrawOp, Srgb, Stroke, TextAnchor, MM_PER_PT};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};
use std::io::BufWriter;

/// Points per millimetre, for outline widths.
const PT_PER_MM: f32 = 1.0 / MM_PER_PT;

/// Renders document drawings to PDF bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, drawing: &DocumentDrawing) -> Result<Vec<u8>, RenderError> {
        let width = Mm(drawing.page_width);
        let height = Mm(drawing.page_height);

        let (doc, first_page, first_layer) =
            PdfDocument::new(&drawing.title, width, height, "Layer 1");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| RenderError::Pdf(format!("font: {e}")))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| RenderError::Pdf(format!("font: {e}")))?,
        };

        for (i, page) in drawing.pages.iter().enumerate() {
            let (page_index, layer_index) = if i == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, "Layer 1")
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);
            for op in &page.ops {
                paint(&layer, op, drawing.page_height, &fonts);
            }
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| RenderError::Pdf(format!("save: {e}")))?;
        let bytes = buf
            .into_inner()
            .map_err(|e| RenderError::Pdf(format!("flush: {e}")))?;

        tracing::debug!(
            pages = drawing.page_count(),
            size_bytes = bytes.len(),
            "PDF rendered"
        );
        Ok(bytes)
    }
}

fn color(c: Srgb) -> Color {
    let (r, g, b) = c.to_unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn set_stroke(layer: &PdfLayerReference, stroke: &Stroke) {
    layer.set_outline_color(color(stroke.color));
    layer.set_outline_thickness(stroke.width * PT_PER_MM);
}

fn paint(layer: &PdfLayerReference, op: &DrawOp, page_height: f32, fonts: &Fonts) {
    match op {
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let mode = match (fill, stroke) {
                (Some(_), Some(_)) => PaintMode::FillStroke,
                (Some(_), None) => PaintMode::Fill,
                (None, Some(_)) => PaintMode::Stroke,
                (None, None) => return,
            };
            if let Some(fill) = fill {
                layer.set_fill_color(color(*fill));
            }
            if let Some(stroke) = stroke {
                set_stroke(layer, stroke);
            }
            let bottom = page_height - (y + height);
            let rect = Rect::new(Mm(*x), Mm(bottom), Mm(x + width), Mm(page_height - y))
                .with_mode(mode);
            layer.add_rect(rect);
        }
        DrawOp::Text {
            x,
            y,
            size,
            text,
            color: c,
            anchor,
            bold,
        } => {
            let advance = text_width_mm(text, *size, *bold);
            let left = match anchor {
                TextAnchor::Start => *x,
                TextAnchor::Middle => x - advance / 2.0,
                TextAnchor::End => x - advance,
            };
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(color(*c));
            layer.use_text(text.as_str(), *size, Mm(left), Mm(page_height - y), font);
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            set_stroke(layer, stroke);
            let line = Line {
                points: vec![
                    (Point::new(Mm(*x1), Mm(page_height - y1)), false),
                    (Point::new(Mm(*x2), Mm(page_height - y2)), false),
                ],
                is_closed: false,
            };
            layer.add_line(line);
        }
    }
}

/// Approximate advance width of `text` in Helvetica, in millimetres.
///
/// Builtin PDF fonts carry no metrics through printpdf, so centering uses the
/// standard Helvetica widths for the glyph classes the renderer emits.
fn text_width_mm(text: &str, size_pt: f32, bold: bool) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            '0'..='9' => 0.556,
            ' ' | '.' | ',' | ':' | ';' | 'i' | 'j' | 'l' | '!' | '|' => 0.278,
            '-' | '(' | ')' | 'f' | 't' | 'r' => 0.333,
            'm' | 'w' | 'M' | 'W' => 0.833,
            'A'..='Z' => 0.667,
            _ => 0.556,
        })
        .sum();
    let em = if bold { em * 1.05 } else { em };
    em * size_pt * MM_PER_PT
}
