//! Public API for the pip-grid crate.
//!
//! This module provides the high-level API: [`GridBuilder`] and the
//! [`GridError`] unified error type.

mod builder;
mod error;

pub use builder::GridBuilder;
pub use error::GridError;
