//! Travel report pipeline
//!
//! Turns a program scan into the report handed to the program rewriter:
//! resolved heights, unique rapid targets and their visiting order.

use rapidpath_core::Result;
use rapidpath_optimizer::{dedupe, resolve, OptimizerSettings, Tour, TravelOptimizer, UniquePoints};
use rapidpath_reader::ProgramScan;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything a rewriter needs to reorder rapid moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelReport {
    /// Distinct heights, ascending
    pub sorted_heights: Vec<f64>,
    /// Highest height in the program, `null` when there is none
    pub safe_height: Option<f64>,
    /// Rapid targets with exact duplicates removed
    pub unique_points: UniquePoints,
    /// Visiting order over `unique_points`
    pub tour: Tour,
}

/// Resolve heights, deduplicate rapid targets and order them
///
/// # Errors
/// Fails on non-finite heights or coordinates and when the number of unique
/// targets exceeds `settings.max_points`.
pub fn analyze(scan: &ProgramScan, settings: &OptimizerSettings) -> Result<TravelReport> {
    let heights = resolve(&scan.heights)?;
    let unique_points = dedupe(&scan.travel_points);
    info!(
        "Resolved {} heights, {} of {} rapid targets unique",
        heights.sorted.len(),
        unique_points.len(),
        scan.travel_points.len()
    );

    let tour = TravelOptimizer::new(settings.clone()).optimize(unique_points.as_slice())?;
    info!(
        "Ordered {} targets into a {} tour of length {:.3}",
        tour.len(),
        tour.kind,
        tour.length
    );

    Ok(TravelReport {
        sorted_heights: heights.sorted,
        safe_height: heights.safe_height,
        unique_points,
        tour,
    })
}
