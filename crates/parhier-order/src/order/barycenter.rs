//! Barycenters and the two ways orders are derived from them.

use super::{BinaryMatrix, OrderMap};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    /// Mean of `position + 1` over connected neighbours; `None` without connections.
    pub barycenter: Option<f64>,
    pub degree: usize,
}

/// Barycenter of every row of `matrix` against the current column order.
///
/// Only columns present in `column_order` are weighed, so a row whose edges all point at
/// unknown columns is treated as unconnected.
pub fn row_barycenters(matrix: &BinaryMatrix, column_order: &OrderMap) -> Vec<BarycenterEntry> {
    let column_pos: Vec<Option<usize>> = matrix
        .columns()
        .iter()
        .map(|c| column_order.get(c.as_str()).copied())
        .collect();

    matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(r, v)| {
            let mut sum: f64 = 0.0;
            let mut degree: usize = 0;
            for (c, pos) in column_pos.iter().enumerate() {
                let Some(pos) = pos else {
                    continue;
                };
                if matrix.has_edge(r, c) {
                    sum += (*pos + 1) as f64;
                    degree += 1;
                }
            }
            BarycenterEntry {
                v: v.clone(),
                barycenter: (degree > 0).then(|| sum / degree as f64),
                degree,
            }
        })
        .collect()
}

/// Barycenter of every column of `matrix` against the current row order.
pub fn column_barycenters(matrix: &BinaryMatrix, row_order: &OrderMap) -> Vec<BarycenterEntry> {
    row_barycenters(&matrix.transpose(), row_order)
}

/// New order by ascending barycenter.
///
/// Equal barycenters keep their `current` relative order. Unconnected entries keep their
/// `current` relative order too and are placed after every connected entry. Ids of `current`
/// without an entry follow last, so the result stays a permutation of `current`.
pub fn sort_by_barycenters(entries: &[BarycenterEntry], current: &OrderMap) -> OrderMap {
    let pos_of = |v: &str| current.get(v).copied().unwrap_or(usize::MAX);

    let mut connected: Vec<(&str, f64, usize)> = Vec::new();
    let mut unconnected: Vec<(&str, usize)> = Vec::new();
    for e in entries {
        match e.barycenter {
            Some(b) => connected.push((e.v.as_str(), b, pos_of(e.v.as_str()))),
            None => unconnected.push((e.v.as_str(), pos_of(e.v.as_str()))),
        }
    }
    connected.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));
    unconnected.sort_by_key(|(_, pos)| *pos);

    let mut out = OrderMap::with_capacity(current.len().max(entries.len()));
    let ids = connected
        .iter()
        .map(|(v, _, _)| *v)
        .chain(unconnected.iter().map(|(v, _)| *v));
    for v in ids {
        let next = out.len();
        out.entry(v.to_string()).or_insert(next);
    }

    let mut rest: Vec<(&String, usize)> = current
        .iter()
        .filter(|(k, _)| !out.contains_key(k.as_str()))
        .map(|(k, &p)| (k, p))
        .collect();
    rest.sort_by_key(|(_, p)| *p);
    for (k, _) in rest {
        let next = out.len();
        out.insert(k.clone(), next);
    }

    out
}

/// Reverses the relative order of every group of nodes sharing one barycenter value.
///
/// The group's positions are taken from `current`, sorted, and handed back in reverse, which
/// breaks symmetric configurations a plain barycenter sort keeps reproducing. Unconnected
/// entries never form a group.
pub fn reverse_equal_barycenters(entries: &[BarycenterEntry], current: &OrderMap) -> OrderMap {
    let mut groups: IndexMap<u64, Vec<(&str, usize)>> = IndexMap::new();
    for e in entries {
        let (Some(b), Some(&pos)) = (e.barycenter, current.get(e.v.as_str())) else {
            continue;
        };
        groups.entry(b.to_bits()).or_default().push((e.v.as_str(), pos));
    }

    let mut out = current.clone();
    for group in groups.values_mut() {
        if group.len() < 2 {
            continue;
        }
        group.sort_by_key(|(_, pos)| *pos);
        let n = group.len();
        for k in 0..n {
            let (v, _) = group[k];
            let (_, reversed) = group[n - 1 - k];
            if let Some(slot) = out.get_mut(v) {
                *slot = reversed;
            }
        }
    }
    out
}

/// Column tie-break over every layer: `orders[l + 1]` has its equal-barycenter groups reversed.
///
/// All column barycenters are taken from `orders` as given, before any column is rewritten, so a
/// reversed column never feeds the barycenters of the column to its right.
pub fn reverse_equal_column_barycenters(
    matrices: &[BinaryMatrix],
    orders: &[OrderMap],
) -> Vec<OrderMap> {
    let entries: Vec<Vec<BarycenterEntry>> = matrices
        .iter()
        .zip(orders)
        .map(|(m, row_order)| column_barycenters(m, row_order))
        .collect();

    let mut out = orders.to_vec();
    for (l, entries) in entries.iter().enumerate() {
        if let Some(current) = orders.get(l + 1) {
            out[l + 1] = reverse_equal_barycenters(entries, current);
        }
    }
    out
}
