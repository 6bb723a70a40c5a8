//! Concrete field kinds
//!
//! A kind decides which template key a field renders through and which
//! options it adds on top of the cross-field defaults. Several type names map
//! onto one kind: `email` and `password` are both [`FieldKind::Input`].

use crate::options::{scalar_to_string, FieldOptions};
use formsmith_config::FormConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The rendering family a field type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single `<input>`: text, email, password, hidden, ...
    Input,
    Textarea,
    /// `<select>` over a map of choices
    Select,
    /// submit, reset and plain buttons
    Button,
    /// checkbox and radio
    Checkable,
    /// Read-only markup showing the value
    Static,
}

/// Type names registered with every form helper
pub const DEFAULT_FIELD_TYPES: &[(&str, FieldKind)] = &[
    ("text", FieldKind::Input),
    ("email", FieldKind::Input),
    ("password", FieldKind::Input),
    ("hidden", FieldKind::Input),
    ("number", FieldKind::Input),
    ("date", FieldKind::Input),
    ("file", FieldKind::Input),
    ("url", FieldKind::Input),
    ("tel", FieldKind::Input),
    ("search", FieldKind::Input),
    ("color", FieldKind::Input),
    ("textarea", FieldKind::Textarea),
    ("select", FieldKind::Select),
    ("submit", FieldKind::Button),
    ("reset", FieldKind::Button),
    ("button", FieldKind::Button),
    ("checkbox", FieldKind::Checkable),
    ("radio", FieldKind::Checkable),
    ("static", FieldKind::Static),
];

impl FieldKind {
    /// Key under `templates.` in the configuration, and the literal view
    /// name used when the configuration has no entry.
    pub fn template_key(self) -> &'static str {
        match self {
            Self::Input => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Button => "button",
            Self::Checkable => "checkable",
            Self::Static => "static",
        }
    }

    /// Options this kind layers over the cross-field defaults
    pub fn defaults(self, config: &FormConfig) -> FieldOptions {
        let value = match self {
            Self::Input | Self::Textarea => return FieldOptions::new(),
            Self::Select => json!({
                "choices": {},
                "empty_value": null,
                "selected": null,
            }),
            Self::Button => json!({
                "wrapper": false,
                "attr": {
                    "class": config.get("defaults.button_class").cloned().unwrap_or(Value::Null),
                },
            }),
            Self::Checkable => json!({
                "value": 1,
                "checked": false,
            }),
            Self::Static => json!({
                "tag": "div",
            }),
        };
        crate::options::options(value)
    }

    /// Derive view-ready values from the merged options.
    ///
    /// Select fields get a `choice_list` of `{value, label, selected}` in
    /// choice order, so views never depend on map iteration order.
    pub fn decorate(self, options: &mut FieldOptions) {
        if self != Self::Select {
            return;
        }

        let selected: Vec<String> = match options.get("selected") {
            Some(Value::Array(values)) => values.iter().filter_map(scalar_to_string).collect(),
            Some(value) => scalar_to_string(value).into_iter().collect(),
            None => Vec::new(),
        };

        let choice_list: Vec<Value> = match options.get("choices") {
            Some(Value::Object(choices)) => choices
                .iter()
                .map(|(value, label)| choice(value.clone(), label, &selected))
                .collect(),
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|value| {
                    let value = scalar_to_string(value)?;
                    Some(choice(value.clone(), &Value::String(value), &selected))
                })
                .collect(),
            _ => Vec::new(),
        };

        options.insert("choice_list".to_string(), Value::Array(choice_list));
    }
}

fn choice(value: String, label: &Value, selected: &[String]) -> Value {
    let label = scalar_to_string(label).unwrap_or_else(|| value.clone());
    let is_selected = selected.contains(&value);
    json!({ "value": value, "label": label, "selected": is_selected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::options;

    #[test]
    fn test_template_keys_have_builtin_config_entries() {
        let config = FormConfig::defaults();
        for (_, kind) in DEFAULT_FIELD_TYPES {
            let key = format!("templates.{}", kind.template_key());
            assert!(config.get_str(&key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_button_defaults_drop_wrapper() {
        let defaults = FieldKind::Button.defaults(&FormConfig::defaults());
        assert_eq!(defaults["wrapper"], json!(false));
        assert_eq!(defaults["attr"]["class"], json!("btn btn-default"));
    }

    #[test]
    fn test_input_has_no_extra_defaults() {
        assert!(FieldKind::Input.defaults(&FormConfig::new()).is_empty());
    }

    #[test]
    fn test_decorate_select_map_choices() {
        let mut opts = options(json!({
            "choices": { "en": "English", "fr": "French", "2": 2 },
            "selected": "fr",
        }));

        FieldKind::Select.decorate(&mut opts);

        assert_eq!(
            opts["choice_list"],
            json!([
                { "value": "en", "label": "English", "selected": false },
                { "value": "fr", "label": "French", "selected": true },
                { "value": "2", "label": "2", "selected": false },
            ])
        );
    }

    #[test]
    fn test_decorate_select_multiple_numeric_selection() {
        let mut opts = options(json!({
            "choices": ["1", "2", "3"],
            "selected": [1, 3],
        }));

        FieldKind::Select.decorate(&mut opts);

        let selected: Vec<bool> = opts["choice_list"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["selected"].as_bool().unwrap())
            .collect();
        assert_eq!(selected, vec![true, false, true]);
    }

    #[test]
    fn test_decorate_ignores_other_kinds() {
        let mut opts = options(json!({ "choices": { "a": "A" } }));
        FieldKind::Input.decorate(&mut opts);
        assert!(!opts.contains_key("choice_list"));
    }
}
