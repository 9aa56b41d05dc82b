#![forbid(unsafe_code)]

//! Parallel hierarchies model (headless).
//!
//! Items carry one hierarchical category path per categorical dimension plus numeric measures.
//! Visible dimensions are drawn left to right; neighbouring dimensions are connected by
//! ribbons whose thickness is the aggregated value of the items they share. This crate builds
//! those adjacency layers, lays out ribbon offsets, and drives the crossing minimization in
//! [`parhier_order`].

pub use parhier_order as order;

pub mod adjacency;
pub mod config;
pub mod error;
pub mod hierarchies;
pub mod model;
pub mod ribbons;
pub mod values;

pub use adjacency::{AdjacencyLayer, EdgeInfo, build_adjacencies};
pub use config::HierarchiesConfig;
pub use error::{Error, Result};
pub use hierarchies::{ParallelHierarchies, RibbonRef};
pub use model::{DimensionView, Item, Query, QueryTree, category_descriptor};
pub use ribbons::{CategoryPlacement, category_values, layout_categories, layout_ribbons};
pub use values::{AggregateSelection, MeasureValues, ValueAccessor};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
