use super::types::ordered_indices;
use super::{AdjacencyLayer, BinaryMatrix, OrderMap, to_matrices};

/// Total ribbon crossings of the arrangement: matrix `i` is drawn between `orders[i]` (rows)
/// and `orders[i + 1]` (columns). Matrices without both neighbouring orders contribute 0.
pub fn count_crossings(matrices: &[BinaryMatrix], orders: &[OrderMap]) -> u64 {
    matrices
        .iter()
        .enumerate()
        .map(|(i, m)| match (orders.get(i), orders.get(i + 1)) {
            (Some(north), Some(south)) => two_layer_cross_count(m, north, south),
            _ => 0,
        })
        .sum()
}

/// Converts `layers` first, then counts. This is the query behind the "N ribbon intersections"
/// hint and does not run any optimization.
pub fn count_layer_crossings<E>(layers: &[AdjacencyLayer<E>], orders: &[OrderMap]) -> u64 {
    count_crossings(&to_matrices(layers), orders)
}

/// Crossings between one row order and one column order.
///
/// Rows are visited top to bottom; a row's edge at column `t` crosses every edge of an earlier
/// row at a column `p > t`. The accumulator tree turns the pairwise sum into `O(E log C)`.
pub fn two_layer_cross_count(matrix: &BinaryMatrix, north: &OrderMap, south: &OrderMap) -> u64 {
    let columns = ordered_indices(matrix.columns(), south);
    if columns.is_empty() {
        return 0;
    }
    let rows = ordered_indices(matrix.rows(), north);

    let mut first_index: usize = 1;
    while first_index < columns.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<u64> = vec![0; tree_size];

    let mut cc: u64 = 0;
    for r in rows {
        for (pos, &c) in columns.iter().enumerate() {
            if !matrix.has_edge(r, c) {
                continue;
            }
            let mut index = pos + first_index;
            tree[index] += 1;
            let mut weight_sum: u64 = 0;
            while index > 0 {
                if index % 2 == 1 {
                    weight_sum += tree[index + 1];
                }
                index = (index - 1) >> 1;
                tree[index] += 1;
            }
            cc += weight_sum;
        }
    }

    cc
}
