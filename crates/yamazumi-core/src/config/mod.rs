use crate::{Error, Result};
use serde_json::{Map, Value, json};

/// Chart configuration as a JSON tree addressed by dotted paths (`yamazumi.barWidth`).
///
/// `ChartConfig::default()` carries the full site defaults; user overrides are deep-merged on
/// top so lookups never have to know which layer a value came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig(Value);

impl Default for ChartConfig {
    fn default() -> Self {
        Self(default_site_config())
    }
}

impl ChartConfig {
    /// Site defaults with `overrides` merged on top.
    ///
    /// Overrides must be a JSON object; `null` is accepted and means "no overrides".
    pub fn with_overrides(overrides: &Value) -> Result<Self> {
        let mut cfg = Self::default();
        cfg.merge_overrides(overrides)?;
        Ok(cfg)
    }

    pub fn merge_overrides(&mut self, overrides: &Value) -> Result<()> {
        match overrides {
            Value::Null => Ok(()),
            Value::Object(_) => {
                merge_into(&mut self.0, overrides);
                Ok(())
            }
            other => Err(Error::InvalidConfig {
                message: format!("expected a JSON object, got {}", json_kind(other)),
            }),
        }
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        dotted_path
            .split('.')
            .try_fold(&self.0, |cur, segment| cur.as_object()?.get(segment))
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    /// Numeric lookup; numeric strings are accepted the same way process data is.
    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.get(dotted_path)?;
        let n = v
            .as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))?;
        n.is_finite().then_some(n)
    }

    /// Sets a single leaf such as `locale` or `labels.takt`.
    ///
    /// Missing tables along the path are created; scalars in the way are replaced.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let (parents, leaf) = match dotted_path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, dotted_path),
        };
        let mut table = &mut self.0;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            let Some(map) = ensure_object(table) else {
                return;
            };
            table = map.entry(segment).or_insert(Value::Null);
        }
        if let Some(map) = ensure_object(table) {
            map.insert(leaf.to_string(), value);
        }
    }
}

fn ensure_object(v: &mut Value) -> Option<&mut Map<String, Value>> {
    if !v.is_object() {
        *v = Value::Object(Map::new());
    }
    v.as_object_mut()
}

/// Objects merge key by key; any other incoming value replaces what was there.
fn merge_into(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(slot) => merge_into(slot, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (slot, in_value) => *slot = in_value.clone(),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn default_site_config() -> Value {
    json!({
        "locale": "en",
        "labels": {
            "noData": null,
            "takt": null
        },
        "yamazumi": {
            "width": 720.0,
            "height": 360.0,
            "padding": 24.0,
            "barWidth": 56.0,
            "barGap": 24.0,
            "labelFontSize": 12.0,
            "valueFontSize": 11.0,
            "showValues": true,
            "showTaktLabel": true,
            "showAxis": true,
            "tickCount": 5,
            "transitionMs": 300
        },
        "themeVariables": {
            "background": "white",
            "textColor": "#333333",
            "barColor": "#60a5fa",
            "bottleneckColor": "#ef4444",
            "taktLineColor": "#f97316",
            "axisColor": "#9ca3af"
        }
    })
}
