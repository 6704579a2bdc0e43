//! Height Resolver
//!
//! Collapses the heights found in a program into a sorted distinct list and
//! picks the safe travel height, the highest plane the program ever uses.

use rapidpath_core::data::canonical_bits;
use rapidpath_core::GeometryError;
use serde::{Deserialize, Serialize};

/// Distinct heights and the resulting safe travel height
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedHeights {
    /// Distinct heights, ascending
    pub sorted: Vec<f64>,
    /// Largest height, or `None` when no height was seen
    pub safe_height: Option<f64>,
}

/// Sort and deduplicate `heights`, reporting the maximum as the safe height
///
/// `-0.0` and `0.0` count as the same height and are reported as `0.0`.
///
/// # Errors
/// Returns [`GeometryError::NonFiniteHeight`] for the first NaN or infinite
/// value.
pub fn resolve(heights: &[f64]) -> Result<ResolvedHeights, GeometryError> {
    if let Some(&value) = heights.iter().find(|h| !h.is_finite()) {
        return Err(GeometryError::NonFiniteHeight { value });
    }

    let mut sorted: Vec<f64> = heights
        .iter()
        .map(|&h| if h == 0.0 { 0.0 } else { h })
        .collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup_by(|a, b| canonical_bits(*a) == canonical_bits(*b));

    let safe_height = sorted.last().copied();
    Ok(ResolvedHeights {
        sorted,
        safe_height,
    })
}
