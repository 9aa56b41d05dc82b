//! Ribbon heights/offsets and category sizes for a given order.

use crate::adjacency::AdjacencyLayer;
use crate::model::{DimensionView, Item};
use crate::values::{AggregateSelection, ValueAccessor};
use indexmap::IndexMap;
use parhier_order::OrderMap;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPlacement {
    pub descriptor: String,
    pub order: usize,
    pub height: f64,
}

fn sorted_by_order<'a, I>(ids: I, order: Option<&OrderMap>) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut ids: Vec<&String> = ids.into_iter().collect();
    ids.sort_by_key(|id| {
        order
            .and_then(|o| o.get(id.as_str()).copied())
            .unwrap_or(usize::MAX)
    });
    ids.into_iter().cloned().collect()
}

/// Fills in `height`, `source_offset` and `target_offset` of every edge.
///
/// Ribbons leave a source category stacked in target order and enter a target category stacked
/// in source order; offsets point at the ribbon centre.
pub fn layout_ribbons(
    layers: &mut [AdjacencyLayer],
    orders: &[OrderMap],
    items: &[Item],
    aggregates: &AggregateSelection,
    values: &dyn ValueAccessor,
    scale: f64,
) {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id.as_str(), i)).collect();

    for (i, layer) in layers.iter_mut().enumerate() {
        let mut target_offsets: HashMap<String, f64> = HashMap::default();
        let sources = sorted_by_order(layer.keys(), orders.get(i));

        for source in sources {
            let Some(targets) = layer.get_mut(source.as_str()) else {
                continue;
            };
            let mut source_offset: f64 = 0.0;
            for target in sorted_by_order(targets.keys(), orders.get(i + 1)) {
                let Some(edge) = targets.get_mut(target.as_str()) else {
                    continue;
                };
                let value = aggregates.active_sum(
                    values,
                    edge.items.iter().filter_map(|id| by_id.get(id.as_str()).copied()),
                );
                let height = scale * value;
                let target_offset = target_offsets.entry(target).or_insert(0.0);

                source_offset += height / 2.0;
                *target_offset += height / 2.0;

                edge.height = height;
                edge.source_offset = source_offset;
                edge.target_offset = *target_offset;

                source_offset += height / 2.0;
                *target_offset += height / 2.0;
            }
        }
    }
}

/// Aggregated value per category of one visible dimension, in first-seen order.
pub fn category_values(
    items: &[Item],
    dimension: &DimensionView,
    aggregates: &AggregateSelection,
    values: &dyn ValueAccessor,
) -> IndexMap<String, f64> {
    let mut out: IndexMap<String, f64> = IndexMap::new();
    for item in items {
        if !item.active || aggregates.item_value(values, item) == 0.0 {
            continue;
        }
        for q in dimension.effective_queries() {
            let Some(descriptor) = item.descriptor(&dimension.name, q) else {
                continue;
            };
            *out.entry(descriptor).or_insert(0.0) += aggregates.active_sum(values, [item]);
        }
    }
    out
}

/// Categories of every visible dimension in display order, scaled to heights. Height-0
/// categories are left out; categories without a position follow the ordered ones.
pub fn layout_categories(
    items: &[Item],
    dimensions: &[DimensionView],
    orders: &[OrderMap],
    aggregates: &AggregateSelection,
    values: &dyn ValueAccessor,
    scale: f64,
) -> Vec<Vec<CategoryPlacement>> {
    dimensions
        .iter()
        .enumerate()
        .map(|(c, dim)| {
            let totals = category_values(items, dim, aggregates, values);
            sorted_by_order(totals.keys(), orders.get(c))
                .into_iter()
                .filter_map(|descriptor| {
                    let height = scale * totals.get(descriptor.as_str()).copied().unwrap_or(0.0);
                    (height != 0.0).then_some((descriptor, height))
                })
                .enumerate()
                .map(|(order, (descriptor, height))| CategoryPlacement {
                    descriptor,
                    order,
                    height,
                })
                .collect()
        })
        .collect()
}
