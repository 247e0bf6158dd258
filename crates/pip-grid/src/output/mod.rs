//! Document output: backend-neutral page drawings.
//!
//! [`DocumentRenderer`] turns a [`Grid`](crate::Grid) and a
//! [`LayoutPlan`](crate::LayoutPlan) into a [`DocumentDrawing`], an ordered
//! list of pages made of [`DrawOp`]s. Painting those ops into PDF, SVG or a
//! raster image is left to the caller.

mod drawing;
mod render;

pub use drawing::{
    DocumentDrawing, DrawOp, PageDrawing, PageKind, Stroke, TextAnchor, MM_PER_PT,
};
pub use render::{DocumentRenderer, DocumentStyle};
