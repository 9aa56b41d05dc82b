//! Adjacency layers between neighbouring visible dimensions.

use crate::model::{DimensionView, Item};
use crate::values::{AggregateSelection, ValueAccessor};
use indexmap::IndexSet;
use serde::Serialize;

/// One ribbon: the items shared by a source and a target category.
///
/// `height` and the offsets are filled in by [`crate::ribbons::layout_ribbons`] once an order is
/// known; offsets are measured to the ribbon centre from the top of its category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeInfo {
    pub items: IndexSet<String>,
    pub height: f64,
    pub source_offset: f64,
    pub target_offset: f64,
}

pub type AdjacencyLayer = parhier_order::AdjacencyLayer<EdgeInfo>;

/// One layer per pair of neighbouring dimensions, left to right.
///
/// Every active item with a non-zero primary value is linked once per matching
/// (source query, target query) combination. An edge exists iff at least one such item maps to
/// both of its categories.
pub fn build_adjacencies(
    items: &[Item],
    dimensions: &[DimensionView],
    aggregates: &AggregateSelection,
    values: &dyn ValueAccessor,
) -> Vec<AdjacencyLayer> {
    let mut layers: Vec<AdjacencyLayer> =
        vec![AdjacencyLayer::new(); dimensions.len().saturating_sub(1)];
    if layers.is_empty() {
        return layers;
    }

    let queries: Vec<Vec<&[String]>> = dimensions
        .iter()
        .map(DimensionView::effective_queries)
        .collect();

    for item in items {
        if !item.active {
            continue;
        }
        if aggregates.item_value(values, item) == 0.0 {
            continue;
        }

        for (i, layer) in layers.iter_mut().enumerate() {
            let (source_dim, target_dim) = (&dimensions[i].name, &dimensions[i + 1].name);
            for sq in &queries[i] {
                let Some(source) = item.descriptor(source_dim, sq) else {
                    continue;
                };
                for tq in &queries[i + 1] {
                    let Some(target) = item.descriptor(target_dim, tq) else {
                        continue;
                    };
                    layer
                        .entry(source.clone())
                        .or_default()
                        .entry(target)
                        .or_default()
                        .items
                        .insert(item.id.clone());
                }
            }
        }
    }

    layers
}
