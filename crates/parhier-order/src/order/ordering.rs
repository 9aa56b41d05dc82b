use super::{
    AdjacencyLayer, BarycenterEntry, BinaryMatrix, InitialOrder, OrderMap, column_barycenters,
    count_crossings, initial_orders, refine, reverse_equal_barycenters,
    reverse_equal_column_barycenters, row_barycenters, sort_by_barycenters, to_matrices,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderOptions {
    /// Upper bound on barycentric iterations (down sweep, up sweep, tie-break passes).
    pub max_iterations: usize,
    pub initial_order: InitialOrder,
    /// Run the greedy swap refinement on the best barycentric ordering.
    pub greedy: bool,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            initial_order: InitialOrder::Label,
            greedy: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ordering {
    /// One order per column of categories (`layers.len() + 1`).
    pub orders: Vec<OrderMap>,
    /// Crossing count of `orders`.
    pub crossings: u64,
    /// Barycentric iterations that ran before the count hit 0 or the cap.
    pub iterations: usize,
}

/// Best snapshot seen so far; the sweeps are not monotonic.
struct Best {
    orders: Vec<OrderMap>,
    count: u64,
}

impl Best {
    fn consider(&mut self, matrices: &[BinaryMatrix], orders: &[OrderMap]) {
        let count = count_crossings(matrices, orders);
        if count < self.count {
            self.count = count;
            self.orders = orders.to_vec();
        }
    }
}

/// Plain entry point: label-sorted start, default iteration cap.
pub fn optimize<E>(layers: &[AdjacencyLayer<E>], use_greedy: bool) -> Vec<OrderMap> {
    order(
        layers,
        &OrderOptions {
            greedy: use_greedy,
            ..Default::default()
        },
    )
    .orders
}

pub fn order<E>(layers: &[AdjacencyLayer<E>], opts: &OrderOptions) -> Ordering {
    if layers.is_empty() {
        return Ordering::default();
    }

    let started = Instant::now();
    let matrices = to_matrices(layers);
    let mut orders = initial_orders(layers, opts.initial_order);

    let mut best = Best {
        count: count_crossings(&matrices, &orders),
        orders: orders.clone(),
    };
    debug!(
        layers = layers.len(),
        crossings = best.count,
        "initial category order"
    );

    let mut iterations: usize = 0;
    while iterations < opts.max_iterations && best.count > 0 {
        down_sweep(&matrices, &mut orders);
        best.consider(&matrices, &orders);

        let row_bcs = up_sweep(&matrices, &mut orders);
        best.consider(&matrices, &orders);

        // The tie-break passes can only make the last iteration worse.
        if iterations + 1 < opts.max_iterations {
            for (l, entries) in row_bcs.iter().enumerate() {
                orders[l] = reverse_equal_barycenters(entries, &orders[l]);
            }
            best.consider(&matrices, &orders);

            orders = reverse_equal_column_barycenters(&matrices, &orders);
            best.consider(&matrices, &orders);
        }

        iterations += 1;
        trace!(iteration = iterations, best = best.count, "barycentric iteration");
    }

    debug!(
        crossings = best.count,
        iterations,
        elapsed_us = started.elapsed().as_micros() as u64,
        "barycentric ordering done"
    );

    let mut result = Ordering {
        orders: best.orders,
        crossings: best.count,
        iterations,
    };

    if opts.greedy && result.crossings > 0 {
        let started = Instant::now();
        result.orders = refine(&matrices, &result.orders);
        result.crossings = count_crossings(&matrices, &result.orders);
        debug!(
            crossings = result.crossings,
            elapsed_us = started.elapsed().as_micros() as u64,
            "greedy refinement done"
        );
    }

    result
}

/// Left to right: reorder each layer's columns by their barycenter over the current rows.
fn down_sweep(matrices: &[BinaryMatrix], orders: &mut [OrderMap]) {
    for (l, m) in matrices.iter().enumerate() {
        let entries = column_barycenters(m, &orders[l]);
        orders[l + 1] = sort_by_barycenters(&entries, &orders[l + 1]);
    }
}

/// Right to left: reorder each layer's rows by their barycenter over the current columns.
/// Returns the row barycenters per layer for the tie-break pass.
fn up_sweep(matrices: &[BinaryMatrix], orders: &mut [OrderMap]) -> Vec<Vec<BarycenterEntry>> {
    let mut row_bcs: Vec<Vec<BarycenterEntry>> = vec![Vec::new(); matrices.len()];
    for (l, m) in matrices.iter().enumerate().rev() {
        let entries = row_barycenters(m, &orders[l + 1]);
        orders[l] = sort_by_barycenters(&entries, &orders[l]);
        row_bcs[l] = entries;
    }
    row_bcs
}
