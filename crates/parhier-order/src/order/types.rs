use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// `source category -> target category -> edge payload` between two neighbouring dimensions.
///
/// Insertion order is the first-seen order of the categories; it only matters for
/// [`InitialOrder::FirstSeen`].
pub type AdjacencyLayer<E> = IndexMap<String, IndexMap<String, E>>;

/// `category -> 0-based display position` for one column of categories.
pub type OrderMap = IndexMap<String, usize>;

/// How the first ordering of every column is chosen before any sweep runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitialOrder {
    /// Lexicographic by category descriptor.
    #[default]
    Label,
    /// Order in which categories first appear in the adjacency layers.
    FirstSeen,
}

/// Category ids of `order` sorted by their position (ties keep insertion order).
pub fn sequence_of(order: &OrderMap) -> Vec<String> {
    let mut entries: Vec<(&String, usize)> = order.iter().map(|(k, &v)| (k, v)).collect();
    entries.sort_by_key(|(_, pos)| *pos);
    entries.into_iter().map(|(k, _)| k.clone()).collect()
}

/// Assigns contiguous positions `0..n` following the iteration order of `sequence`.
pub fn order_from_sequence<I, S>(sequence: I) -> OrderMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = OrderMap::new();
    for id in sequence {
        let next = out.len();
        out.entry(id.into()).or_insert(next);
    }
    out
}

/// Union of all target categories of `layer`, in first-seen order.
pub(crate) fn target_union<E>(layer: &AdjacencyLayer<E>) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for targets in layer.values() {
        for target in targets.keys() {
            seen.insert(target.as_str());
        }
    }
    seen.into_iter().map(str::to_string).collect()
}

/// Header indices sorted by their position in `order`. Headers the order does not know sort
/// last, keeping header order among themselves.
pub(crate) fn ordered_indices(headers: &[String], order: &OrderMap) -> Vec<usize> {
    let mut ix: Vec<usize> = (0..headers.len()).collect();
    ix.sort_by_key(|&i| order.get(headers[i].as_str()).copied().unwrap_or(usize::MAX));
    ix
}
