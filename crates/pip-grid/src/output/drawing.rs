//! Backend-neutral drawing instructions.
//!
//! Coordinates are millimetres from the top-left corner of the page, y grows
//! downwards. Font sizes are points. A backend (PDF, SVG, ...) walks the ops
//! in order and paints them; later ops paint over earlier ones.

use crate::grid::BucketCounts;
use crate::palette::Srgb;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Horizontal alignment of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgb,
    /// Line width in millimetres
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Srgb>,
        stroke: Option<Stroke>,
    },
    /// `y` is the text baseline
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
        color: Srgb,
        anchor: TextAnchor,
        bold: bool,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
}

/// Whether a page shows grid cells or the summary legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Grid,
    Legend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageDrawing {
    /// 1-based page number
    pub number: usize,
    pub kind: PageKind,
    pub ops: Vec<DrawOp>,
}

impl PageDrawing {
    /// All text runs on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A complete document: grid pages then the legend page.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDrawing {
    pub title: String,
    /// Page width in millimetres
    pub page_width: f32,
    /// Page height in millimetres
    pub page_height: f32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub counts: BucketCounts,
    pub pages: Vec<PageDrawing>,
}

impl DocumentDrawing {
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The legend page, always last.
    pub fn legend(&self) -> Option<&PageDrawing> {
        self.pages.last().filter(|p| p.kind == PageKind::Legend)
    }
}
