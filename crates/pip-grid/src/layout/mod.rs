//! Page layout: how many cells fit a page and which part of the grid goes on
//! which page.
//!
//! All lengths are millimetres. A page is laid out as:
//!
//! ```text
//! +---------------------------------------+
//! |            margin                     |
//! |   header band (title, page n of N)    |
//! |   +----+----+----+----+               |
//! |   |    | C1 | C2 | C3 |  <- gutter    |
//! |   +----+----+----+----+               |
//! |   | R1 |  3 |  4 |  6 |               |
//! |   | R2 |  0 |  2 |  5 |               |
//! |   +----+----+----+----+               |
//! +---------------------------------------+
//! ```
//!
//! Rows and columns are cut into bands by [`paginate`]. In quadrant mode the
//! grid is first split at its midlines into four [`Region`]s, each carrying
//! one ghost row and one ghost column from its neighbours.

mod geometry;
mod paginate;
mod plan;
mod quadrant;

pub use geometry::PageGeometry;
pub use paginate::{page_count, paginate};
pub use plan::{CellSizing, GridPage, LayoutOptions, LayoutPlan};
pub use quadrant::{Quadrant, Region};
