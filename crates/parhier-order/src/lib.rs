#![forbid(unsafe_code)]

//! Ribbon-crossing minimization for parallel hierarchies.
//!
//! Each adjacency layer connects the visible categories of two neighbouring dimensions. The
//! engine converts layers into dense binary matrices, counts pairwise ribbon crossings, and
//! reorders categories with alternating barycentric sweeps plus an optional greedy swap pass.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod order;

pub use order::{
    AdjacencyLayer, BinaryMatrix, InitialOrder, OrderMap, OrderOptions, Ordering, count_crossings,
    count_layer_crossings, initial_orders, optimize, order, order_from_sequence, refine,
    sequence_of, to_matrices,
};
