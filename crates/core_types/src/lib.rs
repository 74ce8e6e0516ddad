//! Shared plain types for the select-widget client and its message contract.
//!
//! This crate is the bottom of the dependency graph: everything that both the
//! wire protocol and the widget state layer need to agree on lives here.

use serde::Serialize;
use serde_json::Value;

/// Identifies one mounted widget instance.
///
/// The client derives it from the widget's root DOM node, so the value has no
/// meaning beyond being a stable key for the instance registry and for
/// addressing inbound updates.
pub type InstanceId = u64;

/// Selection cardinality, fixed for the lifetime of a widget instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Single,
    Multi,
}

impl Mode {
    /// Parse a `data-mode` attribute value. Anything unrecognized falls back
    /// to single-select.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("multi") => Mode::Multi,
            _ => Mode::Single,
        }
    }
}

/// An option's value as received from the server: either a plain string or an
/// arbitrary structured payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Structured(Value),
}

impl OptionValue {
    /// The transport-string form written into a hidden form field.
    ///
    /// Strings pass through unchanged; structured values are rendered as
    /// compact JSON.
    pub fn to_field_value(&self) -> String {
        match self {
            OptionValue::Text(s) => s.clone(),
            OptionValue::Structured(v) => v.to_string(),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<Value> for OptionValue {
    fn from(v: Value) -> Self {
        OptionValue::Structured(v)
    }
}

/// One selectable option: a display label plus an opaque value.
///
/// Immutable once received; the client never edits labels or values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered sequence of chosen options.
///
/// Invariant: length is 0 or 1 in [`Mode::Single`], unbounded in
/// [`Mode::Multi`]. Only inbound server updates mutate a selection; the
/// client caches the last one it was told about.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Selection(Vec<SelectOption>);

impl Selection {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a selection that respects the mode's cardinality invariant.
    /// Extra entries in single mode are dropped.
    pub fn for_mode(mode: Mode, options: Vec<SelectOption>) -> Self {
        let mut options = options;
        if mode == Mode::Single {
            options.truncate(1);
        }
        Self(options)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&SelectOption> {
        self.0.first()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.0
    }

    pub fn into_options(self) -> Vec<SelectOption> {
        self.0
    }

    /// JSON form used as a relay payload (`[{label, value}, ..]`).
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<Vec<SelectOption>> for Selection {
    fn from(options: Vec<SelectOption>) -> Self {
        Self(options)
    }
}
