//! Dense binary adjacency matrices.
//!
//! Layers are sparse, but every row x column pair is materialized: crossing counts and
//! transposition stay trivial and the category counts are bounded by what can be drawn.

use super::AdjacencyLayer;
use super::types::target_union;
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryMatrix {
    rows: Vec<String>,
    columns: Vec<String>,
    row_ix: HashMap<String, usize>,
    column_ix: HashMap<String, usize>,
    cells: Vec<bool>,
}

fn index_headers(headers: Vec<String>) -> (Vec<String>, HashMap<String, usize>) {
    let mut ix: HashMap<String, usize> = HashMap::default();
    let mut unique: Vec<String> = Vec::with_capacity(headers.len());
    for h in headers {
        if ix.contains_key(&h) {
            continue;
        }
        ix.insert(h.clone(), unique.len());
        unique.push(h);
    }
    (unique, ix)
}

impl BinaryMatrix {
    /// An all-zero matrix. Duplicate headers are collapsed onto their first occurrence.
    pub fn new(rows: Vec<String>, columns: Vec<String>) -> Self {
        let (rows, row_ix) = index_headers(rows);
        let (columns, column_ix) = index_headers(columns);
        let cells = vec![false; rows.len() * columns.len()];
        Self {
            rows,
            columns,
            row_ix,
            column_ix,
            cells,
        }
    }

    /// Materializes `layer` over the given column headers. Targets that are not listed in
    /// `columns` are dropped.
    pub fn from_layer<E>(layer: &AdjacencyLayer<E>, columns: Vec<String>) -> Self {
        let mut m = Self::new(layer.keys().cloned().collect(), columns);
        for (source, targets) in layer {
            for target in targets.keys() {
                m.set(source, target, true);
            }
        }
        m
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_index(&self, id: &str) -> Option<usize> {
        self.row_ix.get(id).copied()
    }

    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.column_ix.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Sets a cell by header ids. Returns `false` when either header is unknown.
    pub fn set(&mut self, row: &str, column: &str, value: bool) -> bool {
        let (Some(r), Some(c)) = (self.row_index(row), self.column_index(column)) else {
            return false;
        };
        let width = self.columns.len();
        self.cells[r * width + c] = value;
        true
    }

    pub fn has_edge(&self, row: usize, column: usize) -> bool {
        row < self.rows.len()
            && column < self.columns.len()
            && self.cells[row * self.columns.len() + column]
    }

    pub fn contains(&self, row: &str, column: &str) -> bool {
        match (self.row_index(row), self.column_index(column)) {
            (Some(r), Some(c)) => self.has_edge(r, c),
            _ => false,
        }
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let width = self.columns.len();
        self.cells
            .get(row * width..(row + 1) * width)
            .unwrap_or(&[])
    }

    pub fn row_degree(&self, row: usize) -> usize {
        self.row(row).iter().filter(|&&b| b).count()
    }

    pub fn column_degree(&self, column: usize) -> usize {
        (0..self.rows.len())
            .filter(|&r| self.has_edge(r, column))
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// Columns become rows and vice versa.
    pub fn transpose(&self) -> Self {
        let mut t = Self::new(self.columns.clone(), self.rows.clone());
        let height = self.rows.len();
        for r in 0..self.rows.len() {
            for c in 0..self.columns.len() {
                if self.has_edge(r, c) {
                    t.cells[c * height + r] = true;
                }
            }
        }
        t
    }
}

/// One matrix per layer. Rows are the keys of `layers[i]`; columns are the keys of
/// `layers[i + 1]`, or for the rightmost layer the union of its targets.
pub fn to_matrices<E>(layers: &[AdjacencyLayer<E>]) -> Vec<BinaryMatrix> {
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let columns = match layers.get(i + 1) {
                Some(next) => next.keys().cloned().collect(),
                None => target_union(layer),
            };
            BinaryMatrix::from_layer(layer, columns)
        })
        .collect()
}
