//! Before/after rendering for audit log detail views
//!
//! `serde_json::Value` is the JSON sum type here. Objects are backed by a
//! sorted map, so the pretty-printed output is stable for a given input.

use serde_json::Value;

/// Text shown for a side with nothing recorded
pub const NO_VALUE_PLACEHOLDER: &str = "No value recorded";

/// One side of the diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffPanel {
    /// Absent, `null`, or `{}`
    Empty,
    /// Pretty-printed JSON
    Value(String),
}

impl DiffPanel {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(v) if !is_blank(v) => {
                Self::Value(serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()))
            }
            _ => Self::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text to display for this panel
    pub fn text(&self) -> &str {
        match self {
            Self::Empty => NO_VALUE_PLACEHOLDER,
            Self::Value(s) => s,
        }
    }
}

/// A single top-level field change between two objects
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Added { key: String, value: Value },
    Removed { key: String, value: Value },
    Changed { key: String, from: Value, to: Value },
}

impl FieldChange {
    pub fn key(&self) -> &str {
        match self {
            Self::Added { key, .. } | Self::Removed { key, .. } | Self::Changed { key, .. } => key,
        }
    }
}

impl std::fmt::Display for FieldChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { key, value } => write!(f, "+ {}: {}", key, value),
            Self::Removed { key, value } => write!(f, "- {}: {}", key, value),
            Self::Changed { key, from, to } => write!(f, "~ {}: {} → {}", key, from, to),
        }
    }
}

/// Rendered before/after panels for one entry
#[derive(Debug, Clone, PartialEq)]
pub struct DiffView {
    pub before: DiffPanel,
    pub after: DiffPanel,
    /// Top-level field changes, sorted by key. Empty unless both sides are
    /// objects (or blank).
    pub changes: Vec<FieldChange>,
}

impl DiffView {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Render the before/after panels. Never fails for any JSON input.
pub fn render_diff(old_value: Option<&Value>, new_value: Option<&Value>) -> DiffView {
    DiffView {
        before: DiffPanel::from_value(old_value),
        after: DiffPanel::from_value(new_value),
        changes: field_changes(old_value, new_value),
    }
}

/// Pretty metadata, only when there is something to show
pub fn render_metadata(metadata: Option<&Value>) -> Option<String> {
    match DiffPanel::from_value(metadata) {
        DiffPanel::Value(s) => Some(s),
        DiffPanel::Empty => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn as_object(value: Option<&Value>) -> Option<serde_json::Map<String, Value>> {
    match value {
        None | Some(Value::Null) => Some(serde_json::Map::new()),
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => None,
    }
}

fn field_changes(old_value: Option<&Value>, new_value: Option<&Value>) -> Vec<FieldChange> {
    let (Some(old), Some(new)) = (as_object(old_value), as_object(new_value)) else {
        return Vec::new();
    };

    let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter_map(|key| match (old.get(key), new.get(key)) {
            (None, Some(v)) => Some(FieldChange::Added {
                key: key.clone(),
                value: v.clone(),
            }),
            (Some(v), None) => Some(FieldChange::Removed {
                key: key.clone(),
                value: v.clone(),
            }),
            (Some(a), Some(b)) if a != b => Some(FieldChange::Changed {
                key: key.clone(),
                from: a.clone(),
                to: b.clone(),
            }),
            _ => None,
        })
        .collect()
}
