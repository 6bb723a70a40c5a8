//! The collaborator every field and form talks to
//!
//! `FormHelper` bundles the configuration, the view factory and the registry
//! of field type names. It is built once, wrapped in an `Arc` and shared by
//! every form and field created from it.

use crate::error::Result;
use crate::kinds::{FieldKind, DEFAULT_FIELD_TYPES};
use crate::options::{self, FieldOptions};
use formsmith_config::{load_configuration, FormConfig};
use formsmith_templating::ViewFactory;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Configuration key naming a directory of views that shadow the builtins
pub const VIEWS_PATH_KEY: &str = "views.path";

#[derive(Debug)]
pub struct FormHelper {
    config: FormConfig,
    view: ViewFactory,
    types: BTreeMap<String, FieldKind>,
}

impl FormHelper {
    /// Create a helper with the default field types registered
    pub fn new(config: FormConfig, view: ViewFactory) -> Self {
        let types = DEFAULT_FIELD_TYPES
            .iter()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect();

        Self {
            config,
            view,
            types,
        }
    }

    /// Helper using only builtin defaults and builtin views
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(FormConfig::defaults(), ViewFactory::builtin()?))
    }

    /// Helper using configuration from files and environment.
    ///
    /// When `views.path` is configured, views in that directory shadow the
    /// builtin ones.
    pub fn load() -> Result<Self> {
        let config = load_configuration()?;
        let view = match config.get_str(VIEWS_PATH_KEY) {
            Some(path) => {
                debug!("Loading views from {}", path);
                ViewFactory::with_directory(path)?
            }
            None => ViewFactory::builtin()?,
        };
        Ok(Self::new(config, view))
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewFactory {
        &self.view
    }

    /// Register an additional type name, or remap an existing one
    pub fn register_type(&mut self, name: impl Into<String>, kind: FieldKind) -> &mut Self {
        let name = name.into();
        debug!("Registering field type '{}' as {:?}", name, kind);
        self.types.insert(name, kind);
        self
    }

    /// Resolve a type name; unknown names yield `None`
    pub fn field_type(&self, name: &str) -> Option<FieldKind> {
        let kind = self.types.get(name).copied();
        trace!("Field type '{}' resolved to {:?}", name, kind);
        kind
    }

    /// All registered type names, sorted
    pub fn field_types(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.types.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Shallow merge, `overrides` winning on conflicting keys
    pub fn merge_options(&self, defaults: &FieldOptions, overrides: &FieldOptions) -> FieldOptions {
        options::merge_options(defaults, overrides)
    }

    /// Render an attribute map as an HTML attribute string
    pub fn prepare_attributes(&self, attributes: &Value) -> String {
        options::prepare_attributes(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_types_registered() {
        let helper = FormHelper::builtin().unwrap();

        assert_eq!(helper.field_type("email"), Some(FieldKind::Input));
        assert_eq!(helper.field_type("radio"), Some(FieldKind::Checkable));
        assert_eq!(helper.field_type("submit"), Some(FieldKind::Button));
        assert_eq!(helper.field_type("datetime-galaxy"), None);
        assert_eq!(helper.field_types().count(), DEFAULT_FIELD_TYPES.len());
    }

    #[test]
    fn test_register_type() {
        let mut helper = FormHelper::builtin().unwrap();
        helper
            .register_type("range", FieldKind::Input)
            .register_type("text", FieldKind::Textarea);

        assert_eq!(helper.field_type("range"), Some(FieldKind::Input));
        assert_eq!(helper.field_type("text"), Some(FieldKind::Textarea));
    }

    #[test]
    fn test_helper_merge_and_attributes() {
        let helper = FormHelper::builtin().unwrap();
        let merged = helper.merge_options(
            &options::options(json!({ "a": 1, "b": 1 })),
            &options::options(json!({ "b": 2 })),
        );

        assert_eq!(Value::Object(merged), json!({ "a": 1, "b": 2 }));
        assert_eq!(
            helper.prepare_attributes(&json!({ "class": "x" })),
            "class=\"x\" "
        );
    }
}
