//! Data models for travel positions
//!
//! This module provides the planar point used for rapid-traverse targets.
//! Only the XY plane is modelled; heights travel separately as plain `f64`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Planar travel position (X, Y) of a rapid-traverse target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Check that both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Key for exact numeric equality
    ///
    /// Two points share a key exactly when both coordinates compare equal
    /// with `==`, except that NaN coordinates compare equal to themselves.
    /// `-0.0` and `0.0` map to the same key.
    pub fn exact_key(&self) -> (u64, u64) {
        (canonical_bits(self.x), canonical_bits(self.y))
    }
}

/// Bit pattern of a float with negative zero folded into positive zero
#[inline]
pub fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3}", self.x, self.y)
    }
}
