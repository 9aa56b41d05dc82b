//! Item values per aggregate dimension.

use crate::model::Item;
use serde::{Deserialize, Serialize};

/// Numeric value of an item for one aggregate dimension.
pub trait ValueAccessor {
    fn active_value(&self, item: &Item, aggregate: &str) -> f64;

    /// Whether `aggregate` can be selected for these items.
    fn knows_aggregate(&self, items: &[Item], aggregate: &str) -> bool {
        items.iter().any(|i| i.measures.contains_key(aggregate))
    }
}

impl<F> ValueAccessor for F
where
    F: Fn(&Item, &str) -> f64,
{
    fn active_value(&self, item: &Item, aggregate: &str) -> f64 {
        self(item, aggregate)
    }
}

/// Reads `item.measures[aggregate]`; a missing measure counts as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasureValues;

impl ValueAccessor for MeasureValues {
    fn active_value(&self, item: &Item, aggregate: &str) -> f64 {
        item.measures.get(aggregate).copied().unwrap_or(0.0)
    }
}

/// Which aggregate dimensions ribbons and categories are sized by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSelection {
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
}

impl AggregateSelection {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
        }
    }

    /// Value under the primary aggregate, ignoring the `active` flag.
    pub fn item_value(&self, values: &dyn ValueAccessor, item: &Item) -> f64 {
        values.active_value(item, &self.primary)
    }

    /// An item with a zero value under either selected aggregate is not shown at all.
    pub fn has_value(&self, values: &dyn ValueAccessor, item: &Item) -> bool {
        let nonzero = |aggregate: &str| values.active_value(item, aggregate) != 0.0;
        nonzero(self.primary.as_str()) && self.secondary.as_deref().is_none_or(nonzero)
    }

    /// Secondary aggregate, if set and different from the primary one.
    fn distinct_secondary(&self) -> Option<&str> {
        self.secondary
            .as_deref()
            .filter(|s| *s != self.primary.as_str())
    }

    /// Sum over the active items of the primary value plus, when it differs, the secondary one.
    pub fn active_sum<'a, I>(&self, values: &dyn ValueAccessor, items: I) -> f64
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let secondary = self.distinct_secondary();
        items
            .into_iter()
            .filter(|item| item.active)
            .map(|item| {
                let mut v = values.active_value(item, &self.primary);
                if let Some(s) = secondary {
                    v += values.active_value(item, s);
                }
                v
            })
            .sum()
    }
}
