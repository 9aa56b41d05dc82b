use parhier_core::{AggregateSelection, DimensionView, Item, MeasureValues, build_adjacencies};

fn items() -> Vec<Item> {
    vec![
        Item::new("i1")
            .with_category("gender", &["M"])
            .with_category("region", &["EU", "DE"])
            .with_measure("population", 10.0),
        Item::new("i2")
            .with_category("gender", &["F"])
            .with_category("region", &["EU", "FR"])
            .with_measure("population", 20.0),
        Item::new("i3")
            .with_category("gender", &["M"])
            .with_category("region", &["NA", "US"])
            .with_measure("population", 5.0),
        Item::new("i4")
            .with_category("gender", &["F"])
            .with_category("region", &["NA", "US"])
            .with_measure("population", 0.0),
    ]
}

fn top(name: &str) -> DimensionView {
    DimensionView::new(name, Vec::new())
}

fn edge_items(
    layer: &parhier_core::AdjacencyLayer,
    source: &str,
    target: &str,
) -> Option<Vec<String>> {
    layer
        .get(source)?
        .get(target)
        .map(|e| e.items.iter().cloned().collect())
}

fn unit_value(_: &Item, _: &str) -> f64 {
    1.0
}

#[test]
fn build_adjacencies_needs_two_dimensions() {
    let aggregates = AggregateSelection::new("population");
    assert!(build_adjacencies(&items(), &[], &aggregates, &MeasureValues).is_empty());
    assert!(build_adjacencies(&items(), &[top("gender")], &aggregates, &MeasureValues).is_empty());
}

#[test]
fn build_adjacencies_links_top_level_categories() {
    let aggregates = AggregateSelection::new("population");
    let layers = build_adjacencies(
        &items(),
        &[top("gender"), top("region")],
        &aggregates,
        &MeasureValues,
    );
    assert_eq!(layers.len(), 1);

    let layer = &layers[0];
    let sources: Vec<&str> = layer.keys().map(String::as_str).collect();
    assert_eq!(sources, ["gender:M", "gender:F"]);
    assert_eq!(
        edge_items(layer, "gender:M", "region:EU"),
        Some(vec!["i1".to_string()])
    );
    assert_eq!(
        edge_items(layer, "gender:M", "region:NA"),
        Some(vec!["i3".to_string()])
    );
    assert_eq!(
        edge_items(layer, "gender:F", "region:EU"),
        Some(vec!["i2".to_string()])
    );
    // i4 has no population.
    assert_eq!(edge_items(layer, "gender:F", "region:NA"), None);
}

#[test]
fn build_adjacencies_skips_inactive_items() {
    let mut items = items();
    items[0].active = false;
    let aggregates = AggregateSelection::new("population");
    let layers = build_adjacencies(
        &items,
        &[top("gender"), top("region")],
        &aggregates,
        &MeasureValues,
    );
    assert_eq!(edge_items(&layers[0], "gender:M", "region:EU"), None);
    assert!(edge_items(&layers[0], "gender:M", "region:NA").is_some());
}

#[test]
fn build_adjacencies_uses_the_value_accessor_for_zero_checks() {
    let aggregates = AggregateSelection::new("population");
    let layers = build_adjacencies(
        &items(),
        &[top("gender"), top("region")],
        &aggregates,
        &unit_value,
    );
    assert_eq!(
        edge_items(&layers[0], "gender:F", "region:NA"),
        Some(vec!["i4".to_string()])
    );
}

#[test]
fn build_adjacencies_descends_into_expanded_queries() {
    let aggregates = AggregateSelection::new("population");
    let region = DimensionView::new(
        "region",
        vec![vec!["EU".to_string()], vec!["NA".to_string()]],
    );
    let layers = build_adjacencies(&items(), &[top("gender"), region], &aggregates, &MeasureValues);

    let layer = &layers[0];
    assert!(edge_items(layer, "gender:M", "region:EU###DE").is_some());
    assert!(edge_items(layer, "gender:F", "region:EU###FR").is_some());
    assert!(edge_items(layer, "gender:M", "region:NA###US").is_some());
    assert_eq!(edge_items(layer, "gender:M", "region:EU"), None);
}

#[test]
fn build_adjacencies_links_every_matching_query_combination() {
    let aggregates = AggregateSelection::new("population");
    let region = DimensionView::new("region", vec![Vec::new(), vec!["EU".to_string()]]);
    let layers = build_adjacencies(&items(), &[top("gender"), region], &aggregates, &MeasureValues);

    let targets: Vec<&str> = layers[0]["gender:M"].keys().map(String::as_str).collect();
    assert_eq!(targets, ["region:EU", "region:EU###DE", "region:NA"]);
}

#[test]
fn build_adjacencies_allows_a_dimension_next_to_itself() {
    let aggregates = AggregateSelection::new("population");
    let layers = build_adjacencies(
        &items(),
        &[top("gender"), top("gender"), top("region")],
        &aggregates,
        &MeasureValues,
    );
    assert_eq!(layers.len(), 2);
    assert_eq!(
        edge_items(&layers[0], "gender:M", "gender:M"),
        Some(vec!["i1".to_string(), "i3".to_string()])
    );
    assert_eq!(edge_items(&layers[0], "gender:M", "gender:F"), None);
    assert!(edge_items(&layers[1], "gender:F", "region:EU").is_some());
}
