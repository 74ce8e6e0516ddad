//! Per-instance configuration, parsed once at mount from the root element's
//! attributes and static for the instance lifetime.

use core_types::Mode;
use std::time::Duration;

/// Minimum trimmed length before a search is triggered.
pub const DEFAULT_MIN_LEN: usize = 3;

/// Debounce delay for "text changed" intents, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

const DEFAULT_FIELD: &str = "live_select";

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Trimmed character count below which typing clears options instead of
    /// searching.
    pub min_len: usize,
    /// Quiet period before a settled search text is sent upstream.
    pub debounce: Duration,
    /// Form field name the search text and value bind to.
    pub field: String,
    /// Optional external component id that receives relayed change events.
    pub relay_target: Option<String>,
    pub mode: Mode,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            field: DEFAULT_FIELD.to_string(),
            relay_target: None,
            mode: Mode::Single,
        }
    }
}

impl WidgetConfig {
    /// Read configuration from a root element's attribute list.
    ///
    /// Malformed numeric attributes fall back to the defaults; configuration
    /// is never a hard error.
    pub fn from_attributes(attributes: &[(String, Option<String>)]) -> Self {
        let defaults = Self::default();

        let min_len = attr(attributes, "data-update-min-len")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_len);

        let debounce = attr(attributes, "data-debounce")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce);

        let field = attr(attributes, "data-field")
            .map(str::to_string)
            .unwrap_or(defaults.field);

        let relay_target = attr(attributes, "data-phx-target").map(str::to_string);

        let mode = Mode::from_attr(attr(attributes, "data-mode"));

        Self {
            min_len,
            debounce,
            field,
            relay_target,
            mode,
        }
    }

    /// Field name of a multi-select per-value hidden input.
    pub fn multi_field(&self) -> String {
        format!("{}[]", self.field)
    }
}

fn attr<'a>(attributes: &'a [(String, Option<String>)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .and_then(|(_, v)| v.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    #[test]
    fn empty_attribute_list_yields_defaults() {
        let cfg = WidgetConfig::from_attributes(&[]);
        assert_eq!(cfg, WidgetConfig::default());
        assert_eq!(cfg.min_len, DEFAULT_MIN_LEN);
        assert_eq!(cfg.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    }

    #[test]
    fn attributes_override_defaults() {
        let cfg = WidgetConfig::from_attributes(&attrs(&[
            ("data-update-min-len", "1"),
            ("data-debounce", "250"),
            ("data-field", "city_search"),
            ("data-phx-target", "form-component"),
            ("data-mode", "multi"),
        ]));

        assert_eq!(cfg.min_len, 1);
        assert_eq!(cfg.debounce, Duration::from_millis(250));
        assert_eq!(cfg.field, "city_search");
        assert_eq!(cfg.relay_target.as_deref(), Some("form-component"));
        assert_eq!(cfg.mode, Mode::Multi);
    }

    #[test]
    fn attribute_names_are_case_insensitive() {
        let cfg = WidgetConfig::from_attributes(&attrs(&[("DATA-DEBOUNCE", "42")]));
        assert_eq!(cfg.debounce, Duration::from_millis(42));
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let cfg = WidgetConfig::from_attributes(&attrs(&[
            ("data-update-min-len", "lots"),
            ("data-debounce", ""),
        ]));
        assert_eq!(cfg.min_len, DEFAULT_MIN_LEN);
        assert_eq!(cfg.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    }

    #[test]
    fn multi_field_appends_brackets() {
        let cfg = WidgetConfig::from_attributes(&attrs(&[("data-field", "tags")]));
        assert_eq!(cfg.multi_field(), "tags[]");
    }
}
