//! Greedy adjacent-swap refinement.

use super::types::sequence_of;
use super::{BinaryMatrix, OrderMap, two_layer_cross_count};

/// Swaps neighbouring categories of each column while that strictly reduces crossings.
///
/// Columns are refined left to right. After an accepted swap at `j` the scan resumes at `j - 1`,
/// the first pair the swap can have changed; a column is done once a scan from the top accepts
/// nothing. The crossing count never increases.
pub fn refine(matrices: &[BinaryMatrix], orders: &[OrderMap]) -> Vec<OrderMap> {
    let mut orders = orders.to_vec();
    for column in 0..orders.len() {
        let swaps = refine_column(matrices, &mut orders, column);
        tracing::trace!(column, swaps, "greedy column refined");
    }
    orders
}

/// Only the matrices on either side of `column` see its order change.
fn local_crossings(matrices: &[BinaryMatrix], orders: &[OrderMap], column: usize) -> u64 {
    let mut cc: u64 = 0;
    if column > 0 {
        if let (Some(m), Some(north)) = (matrices.get(column - 1), orders.get(column - 1)) {
            cc += two_layer_cross_count(m, north, &orders[column]);
        }
    }
    if let (Some(m), Some(south)) = (matrices.get(column), orders.get(column + 1)) {
        cc += two_layer_cross_count(m, &orders[column], south);
    }
    cc
}

fn swap_positions(order: &mut OrderMap, a: &str, b: &str) {
    let (Some(pa), Some(pb)) = (order.get(a).copied(), order.get(b).copied()) else {
        return;
    };
    if let Some(slot) = order.get_mut(a) {
        *slot = pb;
    }
    if let Some(slot) = order.get_mut(b) {
        *slot = pa;
    }
}

fn refine_column(matrices: &[BinaryMatrix], orders: &mut [OrderMap], column: usize) -> usize {
    let mut sequence = sequence_of(&orders[column]);
    if sequence.len() < 2 {
        return 0;
    }

    let mut current = local_crossings(matrices, orders, column);
    let mut start: usize = 0;
    let mut swaps: usize = 0;
    while current > 0 {
        let mut accepted: Option<usize> = None;
        for j in start..sequence.len() - 1 {
            swap_positions(&mut orders[column], &sequence[j], &sequence[j + 1]);
            let swapped = local_crossings(matrices, orders, column);
            if swapped < current {
                current = swapped;
                sequence.swap(j, j + 1);
                accepted = Some(j);
                break;
            }
            swap_positions(&mut orders[column], &sequence[j], &sequence[j + 1]);
        }

        match accepted {
            Some(j) => {
                swaps += 1;
                start = j.saturating_sub(1);
            }
            None if start == 0 => break,
            None => start = 0,
        }
    }
    swaps
}
