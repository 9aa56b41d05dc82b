//! JSON-backed settings with dotted-path access.
//!
//! ```json
//! {
//!   "optimizer": { "maxIterations": 10, "initialOrder": "label", "greedy": false,
//!                  "minimizeOnChange": false },
//!   "ribbons": { "scale": 1.0 },
//!   "aggregates": { "primary": "population", "secondary": null }
//! }
//! ```

use crate::error::{Error, Result};
use parhier_order::OrderOptions;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchiesConfig(Value);

impl Default for HierarchiesConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl HierarchiesConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Parses and validates a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let config = Self::from_value(value)?;
        Ok(config)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                message: "config must be a JSON object".to_string(),
            });
        }
        let config = Self(value);
        config.validate()?;
        Ok(config)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    /// Sets the value at `dotted_path`, creating (or replacing non-object) parents on the way.
    /// The result must still validate; on error `self` is left unchanged.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) -> Result<()> {
        let segments: Vec<&str> = dotted_path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return Err(invalid_path(dotted_path));
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid_path(dotted_path));
        }

        let mut next = self.0.clone();
        let mut cur: &mut Value = &mut next;
        for seg in parents {
            cur = match cur {
                Value::Object(map) => map.entry(*seg).or_insert(Value::Null),
                _ => return Err(invalid_path(dotted_path)),
            };
            if !cur.is_object() {
                *cur = Value::Object(Map::new());
            }
        }
        match cur {
            Value::Object(map) => {
                map.insert((*last).to_string(), value);
            }
            _ => return Err(invalid_path(dotted_path)),
        }

        self.replace(next)
    }

    /// Applies a JSON merge patch: objects merge key by key, `null` removes a key, anything
    /// else replaces. The result must still validate; on error `self` is left unchanged.
    pub fn merge(&mut self, patch: &Value) -> Result<()> {
        if !patch.is_object() {
            return Err(Error::InvalidConfig {
                message: "config patch must be a JSON object".to_string(),
            });
        }
        let mut next = self.0.clone();
        merge_patch(&mut next, patch);
        self.replace(next)
    }

    fn replace(&mut self, value: Value) -> Result<()> {
        let next = Self(value);
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// `optimizer.*` as typed options; absent keys take their defaults.
    pub fn order_options(&self) -> Result<OrderOptions> {
        match self.get("optimizer") {
            None | Some(Value::Null) => Ok(OrderOptions::default()),
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| Error::InvalidConfig {
                message: format!("optimizer: {e}"),
            }),
        }
    }

    /// Re-run crossing minimization after every rebuild instead of resetting to the initial
    /// order.
    pub fn minimize_on_change(&self) -> bool {
        self.get_bool("optimizer.minimizeOnChange").unwrap_or(false)
    }

    /// Value-to-height factor for ribbons and categories.
    pub fn ribbon_scale(&self) -> f64 {
        self.get_f64("ribbons.scale").unwrap_or(1.0)
    }

    pub fn primary_aggregate(&self) -> Option<&str> {
        self.get_str("aggregates.primary")
    }

    pub fn secondary_aggregate(&self) -> Option<&str> {
        self.get_str("aggregates.secondary")
    }

    pub fn validate(&self) -> Result<()> {
        self.order_options()?;
        let scale = self.ribbon_scale();
        if !scale.is_finite() || scale < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!("ribbons.scale must be a non-negative number, got {scale}"),
            });
        }
        Ok(())
    }
}

fn invalid_path(dotted_path: &str) -> Error {
    Error::InvalidConfig {
        message: format!("invalid config path `{dotted_path}`"),
    }
}

fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_map) = target else {
        return;
    };
    for (key, value) in patch_map {
        if value.is_null() {
            target_map.shift_remove(key);
        } else {
            merge_patch(target_map.entry(key.clone()).or_insert(Value::Null), value);
        }
    }
}
