use parhier_order::order::{AdjacencyLayer, BinaryMatrix, to_matrices};

fn layer(edges: &[(&str, &[&str])]) -> AdjacencyLayer<()> {
    let mut out = AdjacencyLayer::new();
    for (source, targets) in edges {
        let row = out.entry(source.to_string()).or_default();
        for t in *targets {
            row.insert(t.to_string(), ());
        }
    }
    out
}

fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn to_matrices_returns_nothing_for_no_layers() {
    let layers: Vec<AdjacencyLayer<()>> = Vec::new();
    assert!(to_matrices(&layers).is_empty());
}

#[test]
fn to_matrices_uses_the_next_layer_sources_as_columns() {
    let layers = vec![
        layer(&[("A", &["X", "Y"]), ("B", &["X"])]),
        layer(&[("X", &["P"]), ("Y", &["P", "Q"])]),
    ];
    let m = to_matrices(&layers);
    assert_eq!(m.len(), 2);

    assert_eq!(m[0].rows(), strings(&["A", "B"]).as_slice());
    assert_eq!(m[0].columns(), strings(&["X", "Y"]).as_slice());
    assert!(m[0].contains("A", "X"));
    assert!(m[0].contains("A", "Y"));
    assert!(m[0].contains("B", "X"));
    assert!(!m[0].contains("B", "Y"));

    assert_eq!(m[1].rows(), strings(&["X", "Y"]).as_slice());
    assert_eq!(m[1].columns(), strings(&["P", "Q"]).as_slice());
    assert_eq!(m[1].edge_count(), 3);
}

#[test]
fn to_matrices_uses_the_union_of_targets_for_the_rightmost_layer() {
    let layers = vec![layer(&[("A", &["Q", "P"]), ("B", &["R", "P"])])];
    let m = to_matrices(&layers);
    assert_eq!(m[0].columns(), strings(&["Q", "P", "R"]).as_slice());
    assert_eq!(m[0].row(0), &[true, true, false]);
    assert_eq!(m[0].row(1), &[false, true, true]);
}

#[test]
fn to_matrices_drops_targets_missing_from_the_next_layer() {
    let layers = vec![layer(&[("A", &["X", "Z"])]), layer(&[("X", &["P"])])];
    let m = to_matrices(&layers);
    assert_eq!(m[0].columns(), strings(&["X"]).as_slice());
    assert_eq!(m[0].edge_count(), 1);
    assert!(!m[0].contains("A", "Z"));
}

#[test]
fn to_matrices_is_idempotent() {
    let layers = vec![
        layer(&[("A", &["X", "Y"]), ("B", &["X"])]),
        layer(&[("X", &["P"]), ("Y", &["P", "Q"])]),
    ];
    assert_eq!(to_matrices(&layers), to_matrices(&layers));
}

#[test]
fn transpose_swaps_rows_and_columns() {
    let layers = vec![layer(&[("A", &["X", "Y"]), ("B", &["X"])])];
    let m = to_matrices(&layers).remove(0);
    let t = m.transpose();

    assert_eq!(t.rows(), strings(&["X", "Y"]).as_slice());
    assert_eq!(t.columns(), strings(&["A", "B"]).as_slice());
    assert!(t.contains("X", "B"));
    assert!(t.contains("Y", "A"));
    assert!(!t.contains("Y", "B"));
    assert_eq!(t.transpose(), m);
}

#[test]
fn degrees_count_edges_per_row_and_column() {
    let layers = vec![layer(&[("A", &["X", "Y"]), ("B", &["X"])])];
    let m = to_matrices(&layers).remove(0);
    assert_eq!(m.row_degree(0), 2);
    assert_eq!(m.row_degree(1), 1);
    assert_eq!(m.column_degree(0), 2);
    assert_eq!(m.column_degree(1), 1);
}

#[test]
fn new_collapses_duplicate_headers() {
    let mut m = BinaryMatrix::new(strings(&["a", "b", "a"]), strings(&["x", "x"]));
    assert_eq!(m.rows(), strings(&["a", "b"]).as_slice());
    assert_eq!(m.columns(), strings(&["x"]).as_slice());
    assert!(m.set("b", "x", true));
    assert!(!m.set("c", "x", true));
    assert_eq!(m.edge_count(), 1);
    assert!(!m.has_edge(5, 0));
}
