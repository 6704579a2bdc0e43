//! # RapidPath Optimizer
//!
//! Reduces the data products of a program scan and orders the rapid-traverse
//! targets of a toolpath so that total travel distance is short.
//!
//! ## Components
//!
//! - **Height Resolver** ([`heights`]): sorted distinct heights and the safe travel height
//! - **Point Deduplicator** ([`points`]): exact-equality reduction of travel points
//! - **Distance model** ([`distance`], [`mst`], [`matching`], [`euler`]): dense
//!   Euclidean matrix, Prim spanning tree, blossom matching, Eulerian circuits
//! - **Travel Path Optimizer** ([`optimizer`]): Christofides construction with an
//!   optional 2-opt pass ([`refine`])
//!
//! The Christofides tour is at most 1.5 times the optimal closed tour. The
//! 2-opt pass only applies strictly improving moves, so the bound survives it.

pub mod distance;
pub mod euler;
pub mod heights;
pub mod matching;
pub mod mst;
pub mod optimizer;
pub mod points;
pub mod refine;
pub mod tour;

pub use distance::DistanceMatrix;
pub use euler::{shortcut, Multigraph};
pub use heights::{resolve, ResolvedHeights};
pub use matching::{min_weight_perfect_matching, Matching};
pub use mst::{minimum_spanning_tree, SpanningTree};
pub use optimizer::{
    optimize, OptimizerSettings, TourStats, TravelOptimizer, DEFAULT_MAX_POINTS,
    DEFAULT_MAX_REFINE_PASSES,
};
pub use points::{dedupe, UniquePoints};
pub use refine::two_opt;
pub use tour::{Tour, TourKind};
