use super::types::target_union;
use super::{AdjacencyLayer, InitialOrder, OrderMap, order_from_sequence};

/// Starting order for every column: `layers.len() + 1` maps, the last one covering the union of
/// the rightmost layer's targets. No layers yields no columns.
pub fn initial_orders<E>(layers: &[AdjacencyLayer<E>], policy: InitialOrder) -> Vec<OrderMap> {
    let Some(last) = layers.last() else {
        return Vec::new();
    };

    let mut orders: Vec<OrderMap> = Vec::with_capacity(layers.len() + 1);
    for layer in layers {
        orders.push(column_order(layer.keys().cloned().collect(), policy));
    }
    orders.push(column_order(target_union(last), policy));
    orders
}

fn column_order(mut headers: Vec<String>, policy: InitialOrder) -> OrderMap {
    if policy == InitialOrder::Label {
        headers.sort();
    }
    order_from_sequence(headers)
}
