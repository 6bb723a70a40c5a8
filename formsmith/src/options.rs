//! Option maps and the HTML attribute rendering fields rely on

use serde_json::{Map, Value};
use tracing::debug;

/// Ordered option map of a field or form
pub type FieldOptions = Map<String, Value>;

/// Shallow union of two option maps; `overrides` wins on conflicting keys.
///
/// Keys keep the order of `defaults`, keys only present in `overrides` are
/// appended in their own order. Nested maps are replaced, not merged.
pub fn merge_options(defaults: &FieldOptions, overrides: &FieldOptions) -> FieldOptions {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Render an attribute map as `key="value" ` pairs, each followed by a space.
///
/// Null and `false` values are dropped, `true` renders the bare attribute
/// name, arrays are joined with spaces (class lists). Keys that are not
/// valid attribute names are skipped. Anything that is not a map renders as
/// the empty string.
pub fn prepare_attributes(attributes: &Value) -> String {
    let Value::Object(attributes) = attributes else {
        return String::new();
    };

    let mut html = String::new();
    for (name, value) in attributes {
        if !is_attribute_name(name) {
            debug!("Skipping invalid attribute name {:?}", name);
            continue;
        }
        let rendered = match value {
            Value::Null | Value::Bool(false) => continue,
            Value::Bool(true) => {
                html.push_str(name);
                html.push(' ');
                continue;
            }
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(" "),
            Value::Object(_) => value.to_string(),
        };

        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&html_escape::encode_double_quoted_attribute(&rendered));
        html.push_str("\" ");
    }
    html
}

/// HTML attribute names: no whitespace, controls, quotes, `>`, `/` or `=`
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}

/// String form of a scalar value, used when comparing submitted values
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Unwrap a `json!({...})` literal into an option map.
///
/// Anything but an object yields an empty map.
pub fn options(value: Value) -> FieldOptions {
    match value {
        Value::Object(map) => map,
        _ => FieldOptions::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_right_hand_wins() {
        let defaults = options(json!({ "label": "Email", "attr": { "class": "form-control" } }));
        let overrides = options(json!({ "attr": { "id": "email" }, "help": "We never share" }));

        let merged = merge_options(&defaults, &overrides);

        assert_eq!(merged["label"], json!("Email"));
        // shallow: the nested map is replaced as a whole
        assert_eq!(merged["attr"], json!({ "id": "email" }));
        assert_eq!(merged["help"], json!("We never share"));
    }

    #[test]
    fn test_merge_preserves_order() {
        let defaults = options(json!({ "a": 1, "b": 2, "c": 3 }));
        let overrides = options(json!({ "d": 4, "b": 20 }));

        let merged = merge_options(&defaults, &overrides);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["a", "b", "c", "d"]);
        assert_eq!(merged["b"], json!(20));
    }

    #[test]
    fn test_prepare_attributes() {
        let attrs = json!({
            "class": "form-control",
            "id": null,
            "required": true,
            "disabled": false,
            "maxlength": 20,
            "data-x": ["a", "b"],
        });

        assert_eq!(
            prepare_attributes(&attrs),
            "class=\"form-control\" required maxlength=\"20\" data-x=\"a b\" "
        );
    }

    #[test]
    fn test_prepare_attributes_escapes_values() {
        let attrs = json!({ "placeholder": "\"quoted\" & <b>" });

        assert_eq!(
            prepare_attributes(&attrs),
            "placeholder=\"&quot;quoted&quot; &amp; &lt;b&gt;\" "
        );
    }

    #[test]
    fn test_prepare_attributes_skips_invalid_names() {
        let attrs = json!({
            "onclick=\"x\" data-a": "1",
            "a b": true,
            "": "empty",
            "x>": "y",
            "data-ok": "2",
        });

        assert_eq!(prepare_attributes(&attrs), "data-ok=\"2\" ");
    }

    #[test]
    fn test_prepare_attributes_non_map_is_empty() {
        assert_eq!(prepare_attributes(&json!(false)), "");
        assert_eq!(prepare_attributes(&Value::Null), "");
        assert_eq!(prepare_attributes(&json!({})), "");
    }
}
