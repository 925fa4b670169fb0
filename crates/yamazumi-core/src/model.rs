use serde::{Deserialize, Serialize};

/// Display name used for bars whose node has no (or a blank) name.
pub const UNNAMED_PROCESS: &str = "Unnamed";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    #[default]
    Process,
    /// Any non-process node of the process map (start/end markers, buffers, notes...).
    Other(String),
}

impl NodeKind {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            None | Some("") => Self::Process,
            Some(t) if t.eq_ignore_ascii_case("process") => Self::Process,
            Some(t) => Self::Other(t.to_string()),
        }
    }

    pub fn is_process(&self) -> bool {
        matches!(self, Self::Process)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cycle_time: f64,
    #[serde(default)]
    pub kind: NodeKind,
}

impl ProcessNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cycle_time: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cycle_time: coerce_duration(cycle_time),
            kind: NodeKind::Process,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            UNNAMED_PROCESS
        } else {
            name
        }
    }
}

/// Normalizes a cycle/takt duration: non-finite and negative values become `0`.
pub fn coerce_duration(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
