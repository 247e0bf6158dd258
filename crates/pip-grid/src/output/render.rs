//! Document renderer: grid + layout plan -> drawing instructions.

use crate::api::GridError;
use crate::grid::{BucketCounts, Grid};
use crate::layout::{GridPage, LayoutOptions, LayoutPlan};
use crate::palette::{BucketPalette, Srgb};

use super::drawing::{
    DocumentDrawing, DrawOp, PageDrawing, PageKind, Stroke, TextAnchor, MM_PER_PT,
};

/// Grey used for ghost cell labels and secondary header text.
const MUTED_TEXT: Srgb = Srgb::from_u8(0x80, 0x80, 0x80);
/// Color of the guide line separating ghost cells from real ones.
const GUIDE_LINE: Srgb = Srgb::from_u8(0x60, 0x60, 0x60);

/// Steps printed on the legend page when instructions are enabled.
const INSTRUCTIONS: [&str; 4] = [
    "Each number is the face of one die, 0 meaning an empty cell.",
    "Place dice row by row, following the R and C labels at the page edges.",
    "Faded cells repeat the neighbouring quadrant and only help alignment.",
    "Check the counts above before you start so you have enough dice.",
];

/// Typography and ghosting settings for [`DocumentRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStyle {
    /// Title size in points
    pub title_size: f32,
    /// Header subline and legend body size in points
    pub body_size: f32,
    /// Cell value label size as a fraction of the cell edge
    pub value_scale: f32,
    /// Row/column label size as a fraction of the cell edge
    pub label_scale: f32,
    /// Cell border width in millimetres
    pub border_width: f32,
    /// Draw quadrant ghost cells faded, with a guide line
    pub ghost_quadrants: bool,
    /// How far ghost cell fills are blended toward white
    pub ghost_fade: f32,
    /// Append assembly instructions to the legend page
    pub instructions: bool,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            title_size: 14.0,
            body_size: 9.0,
            value_scale: 0.55,
            label_scale: 0.32,
            border_width: 0.2,
            ghost_quadrants: true,
            ghost_fade: 0.7,
            instructions: false,
        }
    }
}

impl DocumentStyle {
    #[inline]
    pub fn ghost_quadrants(mut self, enabled: bool) -> Self {
        self.ghost_quadrants = enabled;
        self
    }

    #[inline]
    pub fn instructions(mut self, enabled: bool) -> Self {
        self.instructions = enabled;
        self
    }
}

/// Draws the grid pages and the legend.
///
/// The whole grid is checked before any page is drawn: a cell outside
/// `0..=6` fails the render with [`GridError::UnknownBucket`].
///
/// # Example
///
/// ```
/// use pip_grid::{Bucket, DocumentRenderer, Grid, LayoutOptions, PageGeometry};
///
/// let grid = Grid::from_rows(vec![vec![0, 6], vec![3, 6]]).unwrap();
/// let doc = DocumentRenderer::default()
///     .render(&grid, "Demo", &LayoutOptions::new(PageGeometry::A4))
///     .unwrap();
///
/// assert_eq!(doc.page_count(), 2); // one grid page, one legend
/// assert_eq!(doc.counts.get(Bucket::new(6).unwrap()), 2);
/// assert_eq!(doc.counts.total(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    palette: BucketPalette,
    style: DocumentStyle,
}

impl DocumentRenderer {
    pub fn new(palette: BucketPalette, style: DocumentStyle) -> Self {
        Self { palette, style }
    }

    pub fn palette(&self) -> &BucketPalette {
        &self.palette
    }

    pub fn style(&self) -> &DocumentStyle {
        &self.style
    }

    /// Plan the layout and render in one step.
    pub fn render(
        &self,
        grid: &Grid,
        title: &str,
        layout: &LayoutOptions,
    ) -> Result<DocumentDrawing, GridError> {
        let plan = layout.plan(grid.width(), grid.height())?;
        self.render_plan(grid, title, &plan)
    }

    /// Render against an existing plan.
    pub fn render_plan(
        &self,
        grid: &Grid,
        title: &str,
        plan: &LayoutPlan,
    ) -> Result<DocumentDrawing, GridError> {
        let counts = grid.counts()?;
        if let Some(page) = plan
            .pages
            .iter()
            .find(|p| p.rows.end > grid.height() || p.cols.end > grid.width())
        {
            return Err(GridError::InvalidLayout(format!(
                "page {} reaches outside the {}x{} grid",
                page.number,
                grid.width(),
                grid.height()
            )));
        }

        let total_pages = plan.total_pages();
        let mut pages = Vec::with_capacity(total_pages);
        for page in &plan.pages {
            pages.push(self.grid_page(grid, title, plan, page)?);
        }
        pages.push(self.legend_page(grid, title, plan, &counts));

        Ok(DocumentDrawing {
            title: title.to_string(),
            page_width: plan.geometry.page_width,
            page_height: plan.geometry.page_height,
            grid_width: grid.width(),
            grid_height: grid.height(),
            counts,
            pages,
        })
    }

    fn header(&self, ops: &mut Vec<DrawOp>, plan: &LayoutPlan, heading: String, number: usize) {
        let g = &plan.geometry;
        let baseline = g.margin + self.style.title_size * MM_PER_PT;
        ops.push(DrawOp::Text {
            x: g.margin,
            y: baseline,
            size: self.style.title_size,
            text: heading,
            color: Srgb::BLACK,
            anchor: TextAnchor::Start,
            bold: true,
        });
        ops.push(DrawOp::Text {
            x: g.page_width - g.margin,
            y: baseline,
            size: self.style.body_size,
            text: format!("Page {} of {}", number, plan.total_pages()),
            color: MUTED_TEXT,
            anchor: TextAnchor::End,
            bold: false,
        });
    }

    fn grid_page(
        &self,
        grid: &Grid,
        title: &str,
        plan: &LayoutPlan,
        page: &GridPage,
    ) -> Result<PageDrawing, GridError> {
        let cell = plan.cell_size;
        let (ox, oy) = plan.geometry.content_origin();
        // Cells start one gutter cell in from the content origin
        let (gx, gy) = (ox + cell, oy + cell);
        let mut ops = Vec::new();

        let heading = match page.quadrant {
            Some(q) => format!("{} - {}", title, q),
            None => title.to_string(),
        };
        self.header(&mut ops, plan, heading, page.number);
        ops.push(DrawOp::Text {
            x: ox,
            y: oy - 2.0,
            size: self.style.body_size,
            text: format!(
                "Rows {}-{}, columns {}-{}",
                page.rows.start + 1,
                page.rows.end,
                page.cols.start + 1,
                page.cols.end
            ),
            color: MUTED_TEXT,
            anchor: TextAnchor::Start,
            bold: false,
        });

        let label_size = cell * self.style.label_scale / MM_PER_PT;
        let value_size = cell * self.style.value_scale / MM_PER_PT;
        let ghosting = self.style.ghost_quadrants;

        for (i, col) in page.cols.clone().enumerate() {
            ops.push(centered_text(
                gx + i as f32 * cell + cell / 2.0,
                oy + cell / 2.0,
                label_size,
                format!("C{}", col + 1),
                Srgb::BLACK,
            ));
        }
        for (j, row) in page.rows.clone().enumerate() {
            ops.push(centered_text(
                ox + cell / 2.0,
                gy + j as f32 * cell + cell / 2.0,
                label_size,
                format!("R{}", row + 1),
                Srgb::BLACK,
            ));
        }

        let border = Stroke {
            color: Srgb::BLACK,
            width: self.style.border_width,
        };
        for (j, row) in page.rows.clone().enumerate() {
            for (i, col) in page.cols.clone().enumerate() {
                let bucket = grid.bucket_at(row, col)?;
                let color = self.palette.color(bucket);
                let (fill, text) = if ghosting && page.is_ghost(row, col) {
                    (color.fill.blend(Srgb::WHITE, self.style.ghost_fade), MUTED_TEXT)
                } else {
                    (color.fill, color.text)
                };
                let (x, y) = (gx + i as f32 * cell, gy + j as f32 * cell);
                ops.push(DrawOp::Rect {
                    x,
                    y,
                    width: cell,
                    height: cell,
                    fill: Some(fill),
                    stroke: Some(border),
                });
                ops.push(centered_text(
                    x + cell / 2.0,
                    y + cell / 2.0,
                    value_size,
                    bucket.to_string(),
                    text,
                ));
            }
        }

        if ghosting {
            self.guide_lines(&mut ops, page, (gx, gy), cell);
        }

        Ok(PageDrawing {
            number: page.number,
            kind: PageKind::Grid,
            ops,
        })
    }

    /// Thick line between the ghost row/column and the page's own cells.
    fn guide_lines(&self, ops: &mut Vec<DrawOp>, page: &GridPage, origin: (f32, f32), cell: f32) {
        let (gx, gy) = origin;
        let stroke = Stroke {
            color: GUIDE_LINE,
            width: self.style.border_width * 4.0,
        };
        let page_w = page.cols.len() as f32 * cell;
        let page_h = page.rows.len() as f32 * cell;

        let Some(quadrant) = page.quadrant else {
            return;
        };

        if let Some(ghost) = page.ghost_row.filter(|r| page.rows.contains(r)) {
            let j = ghost - page.rows.start;
            // The line sits on the side facing the quadrant's own cells
            let edge = if quadrant.is_top() { j } else { j + 1 };
            let y = gy + edge as f32 * cell;
            ops.push(DrawOp::Line {
                x1: gx,
                y1: y,
                x2: gx + page_w,
                y2: y,
                stroke,
            });
        }
        if let Some(ghost) = page.ghost_col.filter(|c| page.cols.contains(c)) {
            let i = ghost - page.cols.start;
            let edge = if quadrant.is_left() { i } else { i + 1 };
            let x = gx + edge as f32 * cell;
            ops.push(DrawOp::Line {
                x1: x,
                y1: gy,
                x2: x,
                y2: gy + page_h,
                stroke,
            });
        }
    }

    fn legend_page(
        &self,
        grid: &Grid,
        title: &str,
        plan: &LayoutPlan,
        counts: &BucketCounts,
    ) -> PageDrawing {
        let number = plan.legend_page();
        let mut ops = Vec::new();
        self.header(&mut ops, plan, format!("{} - Legend", title), number);

        let (ox, oy) = plan.geometry.content_origin();
        let swatch = 10.0;
        let row_height = swatch + 3.0;
        let body = self.style.body_size;
        let body_mm = body * MM_PER_PT;

        for (k, (bucket, color)) in self.palette.iter().enumerate() {
            let y = oy + k as f32 * row_height;
            ops.push(DrawOp::Rect {
                x: ox,
                y,
                width: swatch,
                height: swatch,
                fill: Some(color.fill),
                stroke: Some(Stroke {
                    color: Srgb::BLACK,
                    width: self.style.border_width,
                }),
            });
            ops.push(centered_text(
                ox + swatch / 2.0,
                y + swatch / 2.0,
                swatch * 0.55 / MM_PER_PT,
                bucket.to_string(),
                color.text,
            ));
            let baseline = y + swatch / 2.0 + body_mm * 0.35;
            ops.push(legend_text(ox + swatch + 4.0, baseline, body, color.name.clone()));
            ops.push(DrawOp::Text {
                x: ox + swatch + 60.0,
                y: baseline,
                size: body,
                text: format_count(counts.get(bucket)),
                color: Srgb::BLACK,
                anchor: TextAnchor::End,
                bold: false,
            });
        }

        let mut y = oy + self.palette.iter().count() as f32 * row_height + body_mm * 2.0;
        ops.push(DrawOp::Text {
            x: ox,
            y,
            size: body,
            text: format!("Total: {}", format_count(counts.total())),
            color: Srgb::BLACK,
            anchor: TextAnchor::Start,
            bold: true,
        });
        y += body_mm * 1.6;
        ops.push(legend_text(
            ox,
            y,
            body,
            format!(
                "Grid: {} columns x {} rows",
                grid.width(),
                grid.height()
            ),
        ));

        if self.style.instructions {
            y += body_mm * 3.0;
            ops.push(DrawOp::Text {
                x: ox,
                y,
                size: body,
                text: "Instructions".to_string(),
                color: Srgb::BLACK,
                anchor: TextAnchor::Start,
                bold: true,
            });
            for (n, line) in INSTRUCTIONS.iter().enumerate() {
                y += body_mm * 1.6;
                ops.push(legend_text(ox, y, body, format!("{}. {}", n + 1, line)));
            }
        }

        PageDrawing {
            number,
            kind: PageKind::Legend,
            ops,
        }
    }
}

/// Text centered on (`cx`, `cy`); the baseline sits a third of the em below
/// the center line.
fn centered_text(cx: f32, cy: f32, size: f32, text: String, color: Srgb) -> DrawOp {
    DrawOp::Text {
        x: cx,
        y: cy + size * MM_PER_PT * 0.35,
        size,
        text,
        color,
        anchor: TextAnchor::Middle,
        bold: false,
    }
}

fn legend_text(x: f32, y: f32, size: f32, text: String) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        size,
        text,
        color: Srgb::BLACK,
        anchor: TextAnchor::Start,
        bold: false,
    }
}

fn format_count(n: u64) -> String {
    if n == 1 {
        "1 die".to_string()
    } else {
        format!("{} dice", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::Bucket;
    use crate::layout::{CellSizing, PageGeometry, Quadrant};

    fn layout(cell: f32) -> LayoutOptions {
        LayoutOptions::new(PageGeometry::A4).cell_sizing(CellSizing::Fixed(cell))
    }

    fn cell_rects(page: &PageDrawing) -> Vec<(f32, f32, Srgb)> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { x, y, fill: Some(f), .. } => Some((*x, *y, *f)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_one_rect_and_label_per_cell() {
        let grid = Grid::from_rows(vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        let doc = DocumentRenderer::default()
            .render(&grid, "T", &layout(10.0))
            .unwrap();
        let page = &doc.pages[0];
        assert_eq!(cell_rects(page).len(), 6);
        let texts: Vec<&str> = page.texts().collect();
        for label in ["C1", "C2", "C3", "R1", "R2", "0", "5", "Page 1 of 2"] {
            assert!(texts.contains(&label), "missing {:?} in {:?}", label, texts);
        }
    }

    #[test]
    fn test_cell_positions_follow_gutter() {
        let grid = Grid::from_rows(vec![vec![6, 6]]).unwrap();
        let doc = DocumentRenderer::default()
            .render(&grid, "T", &layout(10.0))
            .unwrap();
        let rects = cell_rects(&doc.pages[0]);
        // content origin (10, 22) plus one 10mm gutter cell
        assert_eq!(rects[0].0, 20.0);
        assert_eq!(rects[0].1, 32.0);
        assert_eq!(rects[1].0, 30.0);
    }

    #[test]
    fn test_unknown_bucket_fails_whole_render() {
        let grid = Grid::from_rows(vec![vec![0, 1], vec![7, 2]]).unwrap();
        let err = DocumentRenderer::default()
            .render(&grid, "T", &layout(10.0))
            .unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownBucket {
                value: 7,
                row: 1,
                col: 0
            }
        );
    }

    #[test]
    fn test_ghost_cells_are_faded() {
        let rows = vec![vec![0u8; 4]; 4];
        let grid = Grid::from_rows(rows).unwrap();
        let renderer = DocumentRenderer::default();
        let doc = renderer
            .render(&grid, "T", &layout(10.0).quadrants(true))
            .unwrap();
        let black = renderer.palette().color(Bucket::new(0).unwrap()).fill;
        let faded = black.blend(Srgb::WHITE, 0.7);

        // Top-left quadrant: rows 0..3, cols 0..3; row 2 and col 2 are ghosts
        let fills: Vec<Srgb> = cell_rects(&doc.pages[0]).into_iter().map(|r| r.2).collect();
        assert_eq!(fills.len(), 9);
        assert_eq!(fills.iter().filter(|&&f| f == faded).count(), 5);
        assert_eq!(fills.iter().filter(|&&f| f == black).count(), 4);
        assert!(doc.pages[0].ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }

    fn guide_line_ops(page: &GridPage) -> Vec<(f32, f32, f32, f32)> {
        let mut ops = Vec::new();
        DocumentRenderer::default().guide_lines(&mut ops, page, (0.0, 0.0), 10.0);
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, y1, x2, y2, .. } => Some((*x1, *y1, *x2, *y2)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_guide_line_faces_quadrant_cells() {
        // Top quadrant whose ghost row spilled alone onto a new page
        let spilled = GridPage {
            number: 2,
            quadrant: Some(Quadrant::TopLeft),
            rows: 5..6,
            cols: 0..4,
            ghost_row: Some(5),
            ghost_col: None,
        };
        assert_eq!(guide_line_ops(&spilled), vec![(0.0, 0.0, 40.0, 0.0)]);

        let top = GridPage {
            rows: 2..6,
            ..spilled.clone()
        };
        assert_eq!(guide_line_ops(&top), vec![(0.0, 30.0, 40.0, 30.0)]);

        let bottom = GridPage {
            quadrant: Some(Quadrant::BottomRight),
            rows: 4..8,
            cols: 3..6,
            ghost_row: Some(4),
            ghost_col: Some(3),
            ..spilled.clone()
        };
        assert_eq!(
            guide_line_ops(&bottom),
            vec![(0.0, 10.0, 30.0, 10.0), (10.0, 0.0, 10.0, 40.0)]
        );

        let left = GridPage {
            quadrant: Some(Quadrant::BottomLeft),
            rows: 4..6,
            cols: 0..5,
            ghost_row: None,
            ghost_col: Some(4),
            ..spilled
        };
        assert_eq!(guide_line_ops(&left), vec![(40.0, 0.0, 40.0, 20.0)]);
    }

    #[test]
    fn test_ghosting_disabled_draws_plain_cells() {
        let grid = Grid::from_rows(vec![vec![0u8; 4]; 4]).unwrap();
        let renderer =
            DocumentRenderer::new(BucketPalette::standard(), DocumentStyle::default().ghost_quadrants(false));
        let doc = renderer
            .render(&grid, "T", &layout(10.0).quadrants(true))
            .unwrap();
        let black = renderer.palette().color(Bucket::new(0).unwrap()).fill;
        assert!(cell_rects(&doc.pages[0]).iter().all(|r| r.2 == black));
        assert!(!doc.pages[0].ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }

    #[test]
    fn test_quadrant_heading() {
        let grid = Grid::from_rows(vec![vec![1u8; 4]; 4]).unwrap();
        let doc = DocumentRenderer::default()
            .render(&grid, "Cat", &layout(10.0).quadrants(true))
            .unwrap();
        assert!(doc.pages[3].texts().any(|t| t == "Cat - Bottom Right"));
        assert!(doc.pages[3].texts().any(|t| t == "Page 4 of 5"));
    }

    #[test]
    fn test_legend_lists_every_bucket() {
        let grid = Grid::from_rows(vec![vec![0, 6], vec![3, 6]]).unwrap();
        let doc = DocumentRenderer::default()
            .render(&grid, "T", &layout(10.0))
            .unwrap();
        let legend = doc.legend().unwrap();
        let texts: Vec<&str> = legend.texts().collect();
        assert_eq!(cell_rects(legend).len(), 7);
        assert!(texts.contains(&"2 dice"));
        assert!(texts.contains(&"1 die"));
        assert!(texts.contains(&"0 dice"));
        assert!(texts.contains(&"Total: 4 dice"));
        assert!(texts.contains(&"Grid: 2 columns x 2 rows"));
        assert!(!texts.contains(&"Instructions"));
    }

    #[test]
    fn test_legend_instructions() {
        let grid = Grid::from_rows(vec![vec![1]]).unwrap();
        let renderer =
            DocumentRenderer::new(BucketPalette::standard(), DocumentStyle::default().instructions(true));
        let doc = renderer.render(&grid, "T", &layout(10.0)).unwrap();
        assert!(doc.legend().unwrap().texts().any(|t| t == "Instructions"));
    }

    #[test]
    fn test_label_color_consistent_across_pages() {
        // 60 rows at 10mm span three pages; every "6" label must share a color
        let grid = Grid::from_rows(vec![vec![6u8; 3]; 60]).unwrap();
        let renderer = DocumentRenderer::default();
        let doc = renderer.render(&grid, "T", &layout(10.0)).unwrap();
        let expected = renderer.palette().color(Bucket::new(6).unwrap()).text;
        let mut seen = 0;
        for page in doc.pages.iter().filter(|p| p.kind == PageKind::Grid) {
            for op in &page.ops {
                if let DrawOp::Text { text, color, .. } = op {
                    if text == "6" {
                        assert_eq!(*color, expected);
                        seen += 1;
                    }
                }
            }
        }
        assert_eq!(seen, 180);
        assert_eq!(doc.page_count(), 4);
    }

    #[test]
    fn test_plan_outside_grid_is_rejected() {
        let small = Grid::from_rows(vec![vec![1, 1]]).unwrap();
        let plan = layout(10.0).plan(5, 5).unwrap();
        assert!(matches!(
            DocumentRenderer::default().render_plan(&small, "T", &plan),
            Err(GridError::InvalidLayout(_))
        ));
    }
}
