//! Default configuration values for formsmith

use figment::{providers::Serialized, Figment};
use serde_json::{json, Value};
use tracing::debug;

/// Namespace prefix of the views shipped with `formsmith-templating`
pub const BUILTIN_VIEW_NAMESPACE: &str = "formsmith";

/// Template keys that have a builtin view
pub const TEMPLATE_KEYS: &[&str] = &[
    "form",
    "text",
    "textarea",
    "select",
    "button",
    "checkable",
    "static",
];

/// Default configuration values provider
///
/// These values have the lowest priority and are overridden by any
/// configuration file or environment variable.
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Get all default configuration values as a nested object
    pub fn values() -> Value {
        debug!("Loading default configuration values");

        let templates: serde_json::Map<String, Value> = TEMPLATE_KEYS
            .iter()
            .map(|key| {
                (
                    key.to_string(),
                    json!(format!("{BUILTIN_VIEW_NAMESPACE}::{key}")),
                )
            })
            .collect();

        json!({
            "defaults": {
                "wrapper_class": "form-group",
                "wrapper_error_class": "has-error",
                "label_class": "control-label",
                "field_class": "form-control",
                "error_class": "text-danger",
                "button_class": "btn btn-default",
            },
            "templates": templates,
        })
    }

    /// Apply default values beneath an existing figment
    pub fn apply_to(figment: Figment) -> Figment {
        debug!("Applying default configuration values to figment");

        Figment::new()
            .merge(Serialized::defaults(Self::values()))
            .merge(figment)
    }

    /// Create a new figment instance with only default values
    pub fn figment() -> Figment {
        Self::apply_to(Figment::new())
    }
}
