//! Reads process maps exported by a process-map editor.
//!
//! Only the top-level shape is validated. Individual node fields are coerced: a node with a
//! broken `ct` still becomes a bar (of height zero), it never aborts the whole map.

use crate::model::{NodeKind, ProcessNode, coerce_duration};
use crate::{Error, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMap {
    pub nodes: Vec<ProcessNode>,
    pub takt_time: f64,
    /// Chart config overrides embedded in the document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

impl ProcessMap {
    pub fn process_nodes(&self) -> impl Iterator<Item = &ProcessNode> {
        self.nodes.iter().filter(|n| n.kind.is_process())
    }
}

pub fn parse_process_map(text: &str) -> Result<ProcessMap> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidJson {
        message: e.to_string(),
    })?;
    parse_process_map_value(&value)
}

pub fn parse_process_map_value(value: &Value) -> Result<ProcessMap> {
    let (raw_nodes, takt_time, config) = match value {
        Value::Array(items) => (items.as_slice(), 0.0, None),
        Value::Object(map) => {
            let nodes = match map.get("nodes") {
                None | Some(Value::Null) => &[][..],
                Some(Value::Array(items)) => items.as_slice(),
                Some(_) => {
                    return Err(Error::InvalidProcessMap {
                        message: "`nodes` must be an array".to_string(),
                    });
                }
            };
            let takt = map
                .get("taktTime")
                .or_else(|| map.get("takt"))
                .map(coerce_number)
                .unwrap_or(0.0);
            let config = map.get("config").filter(|c| !c.is_null()).cloned();
            (nodes, takt, config)
        }
        _ => {
            return Err(Error::InvalidProcessMap {
                message: "expected an object with `nodes` or an array of nodes".to_string(),
            });
        }
    };

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut nodes = Vec::with_capacity(raw_nodes.len());
    for (idx, raw) in raw_nodes.iter().enumerate() {
        let node = read_node(idx, raw);
        if !seen.insert(node.id.clone()) {
            tracing::warn!(id = %node.id, index = idx, "duplicate process node id");
        }
        if !node.kind.is_process() {
            tracing::debug!(id = %node.id, kind = ?node.kind, "non-process node ignored by chart");
        }
        nodes.push(node);
    }

    Ok(ProcessMap {
        nodes,
        takt_time: coerce_duration(takt_time),
        config,
    })
}

fn read_node(idx: usize, raw: &Value) -> ProcessNode {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or_else(|| {
        tracing::warn!(index = idx, "process node is not an object; using defaults");
        &empty
    });
    let data = obj.get("data").and_then(Value::as_object);

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("node-{idx}"),
    };
    let name = field(obj, data, &["name", "label"])
        .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
        .unwrap_or_default();
    let cycle_time = field(obj, data, &["ct", "cycleTime"])
        .map(coerce_number)
        .unwrap_or(0.0);
    let kind = NodeKind::from_tag(obj.get("type").and_then(Value::as_str));

    ProcessNode::new(id, name, cycle_time).with_kind(kind)
}

/// Looks `keys` up in the nested `data` object first, then on the node itself.
fn field<'a>(
    obj: &'a Map<String, Value>,
    data: Option<&'a Map<String, Value>>,
    keys: &[&str],
) -> Option<&'a Value> {
    keys.iter().find_map(|k| {
        data.and_then(|d| d.get(*k))
            .filter(|v| !v.is_null())
            .or_else(|| obj.get(*k).filter(|v| !v.is_null()))
    })
}

/// JSON numbers and numeric strings; anything else is `0`.
fn coerce_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
