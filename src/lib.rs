//! Dicegrid
//!
//! HTTP service and CLI that turn photos into printable dice mosaic plans.
//! The grid computation lives in the `pip-grid` crate; this crate adds
//! configuration, storage, PDF and PNG backends and the HTTP API.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
