//! Items, category descriptors and per-dimension query trees.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category path prefix a dimension is drilled into (`[]` is the top level).
pub type Query = Vec<String>;

const PATH_SEPARATOR: &str = "###";

/// `"{dimension}:{level0###level1###...}"`, unique within one dimension.
pub fn category_descriptor(dimension: &str, path: &[String]) -> String {
    format!("{dimension}:{}", path.join(PATH_SEPARATOR))
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Dimension name -> category path from the top hierarchy level down.
    #[serde(default)]
    pub categories: IndexMap<String, Vec<String>>,
    /// Aggregate dimension name -> value.
    #[serde(default)]
    pub measures: IndexMap<String, f64>,
    /// Whether the item matches the active queries of every visible dimension.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            categories: IndexMap::new(),
            measures: IndexMap::new(),
            active: true,
        }
    }

    pub fn with_category(mut self, dimension: impl Into<String>, path: &[&str]) -> Self {
        self.categories.insert(
            dimension.into(),
            path.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_measure(mut self, aggregate: impl Into<String>, value: f64) -> Self {
        self.measures.insert(aggregate.into(), value);
        self
    }

    pub fn path(&self, dimension: &str) -> &[String] {
        self.categories
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The item's path must go strictly deeper than `query` and start with it.
    pub fn matches(&self, dimension: &str, query: &[String]) -> bool {
        let path = self.path(dimension);
        path.len() > query.len() && path.starts_with(query)
    }

    /// Descriptor of the category this item falls into one level below `query`.
    pub fn descriptor(&self, dimension: &str, query: &[String]) -> Option<String> {
        if !self.matches(dimension, query) {
            return None;
        }
        let path = self.path(dimension);
        Some(category_descriptor(dimension, &path[..=query.len()]))
    }
}

/// Expanded category paths of one dimension. The root-to-leaf paths are the active queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryTree {
    children: IndexMap<String, QueryTree>,
}

impl QueryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn node(&self, path: &[String]) -> Option<&QueryTree> {
        let mut cur = self;
        for seg in path {
            cur = cur.children.get(seg.as_str())?;
        }
        Some(cur)
    }

    pub fn contains(&self, path: &[String]) -> bool {
        !path.is_empty() && self.node(path).is_some()
    }

    /// Adds `path` (and its missing ancestors). Returns `false` if it was already present.
    pub fn expand(&mut self, path: &[String]) -> bool {
        let mut cur = self;
        let mut added = false;
        for seg in path {
            if !cur.children.contains_key(seg.as_str()) {
                added = true;
            }
            cur = cur.children.entry(seg.clone()).or_default();
        }
        added
    }

    /// Removes `path` with everything expanded below it. Returns `false` if it was absent.
    pub fn collapse(&mut self, path: &[String]) -> bool {
        let Some((last, parent)) = path.split_last() else {
            return false;
        };
        let mut cur = self;
        for seg in parent {
            let Some(next) = cur.children.get_mut(seg.as_str()) else {
                return false;
            };
            cur = next;
        }
        cur.children.shift_remove(last.as_str()).is_some()
    }

    /// Root-to-leaf paths. Nothing expanded yields no queries at all.
    pub fn active_queries(&self) -> Vec<Query> {
        fn dfs(node: &QueryTree, trail: &mut Vec<String>, out: &mut Vec<Query>) {
            if node.children.is_empty() {
                if !trail.is_empty() {
                    out.push(trail.clone());
                }
                return;
            }
            for (key, child) in &node.children {
                trail.push(key.clone());
                dfs(child, trail, out);
                trail.pop();
            }
        }

        let mut out = Vec::new();
        dfs(self, &mut Vec::new(), &mut out);
        out
    }
}

/// One visible dimension as the adjacency builder sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionView {
    pub name: String,
    pub queries: Vec<Query>,
}

impl DimensionView {
    pub fn new(name: impl Into<String>, queries: Vec<Query>) -> Self {
        Self {
            name: name.into(),
            queries,
        }
    }

    /// Active queries, or the single top-level query when none is active.
    pub fn effective_queries(&self) -> Vec<&[String]> {
        if self.queries.is_empty() {
            let top: &[String] = &[];
            vec![top]
        } else {
            self.queries.iter().map(Vec::as_slice).collect()
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.effective_queries()
            .into_iter()
            .any(|q| item.matches(&self.name, q))
    }
}
