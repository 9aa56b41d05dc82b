//! Category ordering / crossing minimization.
//!
//! The pipeline is: adjacency layers -> binary matrices -> barycentric sweeps (tracking the best
//! snapshot by crossing count) -> optional greedy adjacent swaps.

mod types;
pub use types::{AdjacencyLayer, InitialOrder, OrderMap, order_from_sequence, sequence_of};

mod matrix;
pub use matrix::{BinaryMatrix, to_matrices};

mod init_order;
pub use init_order::initial_orders;

mod cross_count;
pub use cross_count::{count_crossings, count_layer_crossings, two_layer_cross_count};

mod barycenter;
pub use barycenter::{
    BarycenterEntry, column_barycenters, reverse_equal_barycenters,
    reverse_equal_column_barycenters, row_barycenters, sort_by_barycenters,
};

mod greedy;
pub use greedy::refine;

mod ordering;
pub use ordering::{OrderOptions, Ordering, optimize, order};
