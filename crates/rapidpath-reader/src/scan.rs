//! Scan results

use rapidpath_core::Point2D;
use serde::{Deserialize, Serialize};

/// Counters collected while scanning a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadStats {
    /// Total lines read, including blank and comment-only lines
    pub lines_read: u64,
    /// Lines classified as rapid moves
    pub rapid_lines: u64,
    /// Height, motion or coordinate words whose value failed to parse
    pub skipped_tokens: u64,
}

/// Everything the optimizer needs from a program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgramScan {
    /// Distinct heights in first-seen order
    pub heights: Vec<f64>,
    /// Rapid-move XY targets in program order, duplicates included
    pub travel_points: Vec<Point2D>,
    /// Scan counters
    pub stats: ReadStats,
}

impl ProgramScan {
    /// Check if the scan found neither heights nor travel points
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty() && self.travel_points.is_empty()
    }
}
