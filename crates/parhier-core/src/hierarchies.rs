//! The parallel hierarchies session: visible dimensions, queries and the current order.
//!
//! Any structural change (dimension added, removed or moved, query expanded or collapsed,
//! aggregate switched, config replaced) rebuilds the adjacency layers from scratch. Orders are
//! then reset to the initial policy, or re-optimized when `optimizer.minimizeOnChange` is set.

use crate::adjacency::{AdjacencyLayer, EdgeInfo, build_adjacencies};
use crate::config::HierarchiesConfig;
use crate::error::{Error, Result};
use crate::model::{DimensionView, Item, Query, QueryTree};
use crate::ribbons::{CategoryPlacement, category_values, layout_categories, layout_ribbons};
use crate::values::{AggregateSelection, MeasureValues, ValueAccessor};
use indexmap::IndexMap;
use parhier_order::{
    InitialOrder, OrderMap, OrderOptions, count_layer_crossings, initial_orders, order,
    order_from_sequence,
};
use serde::Serialize;
use tracing::{debug, trace};

/// A ribbon between `source` (in column `level`) and `target` (in column `level + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RibbonRef<'a> {
    pub level: usize,
    pub source: &'a str,
    pub target: &'a str,
    pub edge: &'a EdgeInfo,
}

#[derive(Debug, Clone)]
pub struct ParallelHierarchies<V = MeasureValues> {
    items: Vec<Item>,
    /// Every categorical dimension found in the items, with its expanded queries.
    query_trees: IndexMap<String, QueryTree>,
    visible: Vec<String>,
    aggregates: AggregateSelection,
    values: V,
    config: HierarchiesConfig,
    options: OrderOptions,
    adjacencies: Vec<AdjacencyLayer>,
    orders: Vec<OrderMap>,
}

impl ParallelHierarchies<MeasureValues> {
    pub fn new(items: Vec<Item>) -> Result<Self> {
        Self::with_values(items, MeasureValues, HierarchiesConfig::default())
    }
}

impl<V: ValueAccessor> ParallelHierarchies<V> {
    /// Without `aggregates.primary` in the config, the first measure found in the items is used.
    pub fn with_values(items: Vec<Item>, values: V, config: HierarchiesConfig) -> Result<Self> {
        config.validate()?;
        let options = config.order_options()?;

        let mut query_trees: IndexMap<String, QueryTree> = IndexMap::new();
        for item in &items {
            for dim in item.categories.keys() {
                query_trees.entry(dim.clone()).or_default();
            }
        }

        let primary = match config.primary_aggregate() {
            Some(name) => name.to_string(),
            None => items
                .iter()
                .flat_map(|i| i.measures.keys())
                .next()
                .cloned()
                .unwrap_or_default(),
        };

        let mut hierarchies = Self {
            items,
            query_trees,
            visible: Vec::new(),
            aggregates: AggregateSelection::new(primary),
            values,
            options,
            adjacencies: Vec::new(),
            orders: Vec::new(),
            config,
        };

        if let Some(name) = hierarchies.config.primary_aggregate() {
            hierarchies.check_aggregate(name)?;
        }
        if let Some(name) = hierarchies.config.secondary_aggregate() {
            hierarchies.check_aggregate(name)?;
            hierarchies.aggregates.secondary = Some(name.to_string());
        }

        hierarchies.rebuild();
        Ok(hierarchies)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All categorical dimensions, in first-seen order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.query_trees.keys().map(String::as_str)
    }

    pub fn visible_dimensions(&self) -> &[String] {
        &self.visible
    }

    pub fn aggregates(&self) -> &AggregateSelection {
        &self.aggregates
    }

    pub fn config(&self) -> &HierarchiesConfig {
        &self.config
    }

    pub fn adjacencies(&self) -> &[AdjacencyLayer] {
        &self.adjacencies
    }

    /// One order per visible dimension (empty when nothing is visible).
    pub fn orders(&self) -> &[OrderMap] {
        &self.orders
    }

    pub fn active_queries(&self, dimension: &str) -> Result<Vec<Query>> {
        self.query_trees
            .get(dimension)
            .map(QueryTree::active_queries)
            .ok_or_else(|| Error::UnknownDimension {
                name: dimension.to_string(),
            })
    }

    pub fn add_dimension(&mut self, name: &str) -> Result<()> {
        self.check_dimension(name)?;
        self.visible.push(name.to_string());
        self.rebuild();
        Ok(())
    }

    pub fn remove_dimension(&mut self, index: usize) -> Result<String> {
        self.check_position(index)?;
        let name = self.visible.remove(index);
        self.rebuild();
        Ok(name)
    }

    pub fn move_dimension(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_position(from)?;
        self.check_position(to)?;
        let name = self.visible.remove(from);
        self.visible.insert(to, name);
        self.rebuild();
        Ok(())
    }

    /// Drills `dimension` into the category at `path`.
    pub fn expand(&mut self, dimension: &str, path: &[&str]) -> Result<()> {
        self.check_dimension(dimension)?;
        let path: Query = path.iter().map(|s| s.to_string()).collect();
        if path.is_empty() || !self.items.iter().any(|i| i.matches(dimension, &path)) {
            return Err(Error::InvalidQuery {
                dimension: dimension.to_string(),
                query: path,
            });
        }
        if let Some(tree) = self.query_trees.get_mut(dimension) {
            tree.expand(&path);
        }
        self.rebuild();
        Ok(())
    }

    pub fn collapse(&mut self, dimension: &str, path: &[&str]) -> Result<()> {
        self.check_dimension(dimension)?;
        let path: Query = path.iter().map(|s| s.to_string()).collect();
        let removed = self
            .query_trees
            .get_mut(dimension)
            .is_some_and(|tree| tree.collapse(&path));
        if !removed {
            return Err(Error::InvalidQuery {
                dimension: dimension.to_string(),
                query: path,
            });
        }
        self.rebuild();
        Ok(())
    }

    pub fn set_primary_aggregate(&mut self, name: &str) -> Result<()> {
        self.check_aggregate(name)?;
        self.aggregates.primary = name.to_string();
        self.rebuild();
        Ok(())
    }

    /// Items with a zero secondary value drop out, so this rebuilds like the primary switch.
    pub fn set_secondary_aggregate(&mut self, name: Option<&str>) -> Result<()> {
        if let Some(name) = name {
            self.check_aggregate(name)?;
        }
        self.aggregates.secondary = name.map(str::to_string);
        self.rebuild();
        Ok(())
    }

    /// Replaces the config. Aggregates named in it are selected; absent ones keep the current
    /// selection.
    pub fn set_config(&mut self, config: HierarchiesConfig) -> Result<()> {
        config.validate()?;
        let options = config.order_options()?;
        let primary = config.primary_aggregate().map(str::to_string);
        let secondary = config.secondary_aggregate().map(str::to_string);
        for name in primary.iter().chain(secondary.iter()) {
            self.check_aggregate(name)?;
        }

        self.options = options;
        self.config = config;
        if let Some(primary) = primary {
            self.aggregates.primary = primary;
        }
        if let Some(secondary) = secondary {
            self.aggregates.secondary = Some(secondary);
        }
        self.rebuild();
        Ok(())
    }

    /// Applies a JSON merge patch to the current config (see [`HierarchiesConfig::merge`]).
    pub fn update_config(&mut self, patch: &serde_json::Value) -> Result<()> {
        let mut config = self.config.clone();
        config.merge(patch)?;
        self.set_config(config)
    }

    pub fn set_config_value(&mut self, dotted_path: &str, value: serde_json::Value) -> Result<()> {
        let mut config = self.config.clone();
        config.set_value(dotted_path, value)?;
        self.set_config(config)
    }

    /// Reorders every visible dimension to reduce ribbon crossings and returns the resulting
    /// crossing count.
    pub fn minimize_intersections(&mut self, use_greedy: bool) -> u64 {
        if self.adjacencies.is_empty() {
            return 0;
        }
        let result = order(
            &self.adjacencies,
            &OrderOptions {
                greedy: use_greedy,
                ..self.options
            },
        );
        self.orders = result.orders;
        self.layout();
        debug!(
            crossings = result.crossings,
            iterations = result.iterations,
            greedy = use_greedy,
            "minimized ribbon intersections"
        );
        result.crossings
    }

    /// Crossings of the current order, without optimizing.
    pub fn intersection_count(&self) -> u64 {
        count_layer_crossings(&self.adjacencies, &self.orders)
    }

    pub fn categories(&self) -> Vec<Vec<CategoryPlacement>> {
        layout_categories(
            &self.items,
            &self.dimension_views(),
            &self.orders,
            &self.aggregates,
            &self.values,
            self.config.ribbon_scale(),
        )
    }

    /// Every ribbon, layer by layer.
    pub fn ribbons(&self) -> impl Iterator<Item = RibbonRef<'_>> + '_ {
        self.adjacencies
            .iter()
            .enumerate()
            .flat_map(|(level, layer)| {
                layer.iter().flat_map(move |(source, targets)| {
                    targets.iter().map(move |(target, edge)| RibbonRef {
                        level,
                        source: source.as_str(),
                        target: target.as_str(),
                        edge,
                    })
                })
            })
    }

    fn check_dimension(&self, name: &str) -> Result<()> {
        if self.query_trees.contains_key(name) {
            Ok(())
        } else {
            Err(Error::UnknownDimension {
                name: name.to_string(),
            })
        }
    }

    fn check_position(&self, index: usize) -> Result<()> {
        if index < self.visible.len() {
            Ok(())
        } else {
            Err(Error::PositionOutOfRange {
                index,
                len: self.visible.len(),
            })
        }
    }

    fn check_aggregate(&self, name: &str) -> Result<()> {
        if self.values.knows_aggregate(&self.items, name) {
            Ok(())
        } else {
            Err(Error::UnknownAggregate {
                name: name.to_string(),
            })
        }
    }

    fn dimension_views(&self) -> Vec<DimensionView> {
        self.visible
            .iter()
            .map(|name| {
                let queries = self
                    .query_trees
                    .get(name)
                    .map(QueryTree::active_queries)
                    .unwrap_or_default();
                DimensionView::new(name.clone(), queries)
            })
            .collect()
    }

    fn rebuild(&mut self) {
        let views = self.dimension_views();
        for item in &mut self.items {
            item.active = views.iter().all(|d| d.matches(item))
                && self.aggregates.has_value(&self.values, item);
        }

        self.adjacencies = build_adjacencies(&self.items, &views, &self.aggregates, &self.values);
        for (i, layer) in self.adjacencies.iter().enumerate() {
            trace!(layer = i, sources = layer.len(), "adjacency layer");
        }

        self.orders = if self.config.minimize_on_change() && !self.adjacencies.is_empty() {
            order(&self.adjacencies, &self.options).orders
        } else {
            self.initial_orders(&views)
        };
        self.layout();

        debug!(
            visible = self.visible.len(),
            layers = self.adjacencies.len(),
            active_items = self.items.iter().filter(|i| i.active).count(),
            "rebuilt adjacency"
        );
    }

    fn initial_orders(&self, views: &[DimensionView]) -> Vec<OrderMap> {
        if !self.adjacencies.is_empty() {
            return initial_orders(&self.adjacencies, self.options.initial_order);
        }
        // A single visible dimension has no layers; order its categories directly.
        views
            .iter()
            .map(|dim| {
                let mut ids: Vec<String> =
                    category_values(&self.items, dim, &self.aggregates, &self.values)
                        .into_keys()
                        .collect();
                if self.options.initial_order == InitialOrder::Label {
                    ids.sort();
                }
                order_from_sequence(ids)
            })
            .collect()
    }

    fn layout(&mut self) {
        layout_ribbons(
            &mut self.adjacencies,
            &self.orders,
            &self.items,
            &self.aggregates,
            &self.values,
            self.config.ribbon_scale(),
        );
    }
}
