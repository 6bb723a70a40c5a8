//! Resolved configuration values with dotted-key lookup

use serde_json::{Map, Value};
use tracing::trace;

/// The merged configuration a form helper reads its defaults from.
///
/// Keys are looked up with dot notation (`defaults.field_class`). A missing
/// key is never an error; callers supply their own fallback.
///
/// ```
/// use formsmith_config::FormConfig;
/// use serde_json::json;
///
/// let config = FormConfig::from_value(json!({
///     "defaults": { "field_class": "form-control" }
/// }));
///
/// assert_eq!(config.get_str("defaults.field_class"), Some("form-control"));
/// assert_eq!(config.get_or("templates.text", "text"), "text");
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FormConfig {
    values: Map<String, Value>,
}

impl FormConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a JSON object; any other value yields an
    /// empty configuration.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::new(),
        }
    }

    /// Configuration containing only the builtin defaults
    pub fn defaults() -> Self {
        Self::from_value(crate::ConfigDefaults::values())
    }

    /// Look up a value by dotted key
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.values.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Look up a string value by dotted key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a string value, falling back to `default` when the key is
    /// missing or is not a string.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        match self.get_str(key) {
            Some(value) => value.to_string(),
            None => {
                trace!("Config key '{}' not set, using '{}'", key, default);
                default.to_string()
            }
        }
    }

    /// Set a value by dotted key, creating intermediate objects as needed.
    ///
    /// Non-object values on the path are replaced.
    pub fn set(&mut self, key: &str, value: Value) {
        let mut parts: Vec<&str> = key.split('.').collect();
        let Some(last) = parts.pop() else {
            return;
        };

        let mut current = &mut self.values;
        for part in parts {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(map) = entry else {
                return;
            };
            current = map;
        }
        current.insert(last.to_string(), value);
    }

    /// All top-level values
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for FormConfig {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}
