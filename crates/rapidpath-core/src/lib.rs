//! # RapidPath Core
//!
//! Core types and the error taxonomy shared by the RapidPath crates.
//! Provides the planar travel point model used by the reader and the
//! optimizer, and the errors the optimizer surfaces to its callers.

pub mod data;
pub mod error;

pub use data::Point2D;

pub use error::{Error, GeometryError, OptimizerError, Result};
