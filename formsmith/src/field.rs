//! The field descriptor
//!
//! A [`FormField`] holds one field's name, type, options and render state.
//! Its options always start from the cross-field defaults (wrapper, input,
//! label and error classes read from configuration), layered under the
//! defaults of the field's [`FieldKind`], layered under whatever the caller
//! passed. The caller wins on every conflicting key.

use crate::error::Result;
use crate::helper::FormHelper;
use crate::kinds::FieldKind;
use crate::logging::Pretty;
use crate::options::{scalar_to_string, FieldOptions};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// One form field
#[derive(Debug, Clone)]
pub struct FormField {
    name: String,
    field_type: String,
    kind: FieldKind,
    options: FieldOptions,
    rendered: bool,
    template: String,
    helper: Arc<FormHelper>,
}

impl FormField {
    /// Create a field and resolve its template and options.
    ///
    /// The template is the view configured under `templates.<key>` for the
    /// kind's template key, or the key itself when nothing is configured.
    /// A non-null string `template` option overrides both and is removed
    /// from the stored options.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        kind: FieldKind,
        helper: Arc<FormHelper>,
        options: FieldOptions,
    ) -> Self {
        let key = kind.template_key();
        let template = helper.config().get_or(&format!("templates.{key}"), key);

        let mut field = Self {
            name: name.into(),
            field_type: field_type.into(),
            kind,
            options: FieldOptions::new(),
            rendered: false,
            template,
            helper,
        };
        field.set_default_options(options);

        debug!(
            "Created field '{}' of type '{}' rendering '{}'",
            field.name, field.field_type, field.template
        );
        field
    }

    /// Render with the stored options and every part shown
    pub fn render(&mut self) -> Result<String> {
        self.render_with(FieldOptions::new(), true, true, true)
    }

    /// Render with per-call option overrides.
    ///
    /// The overrides are merged over the stored options for this call only.
    /// The field is marked rendered before the view runs, so a failing view
    /// still counts as rendered.
    pub fn render_with(
        &mut self,
        overrides: FieldOptions,
        show_label: bool,
        show_field: bool,
        show_error: bool,
    ) -> Result<String> {
        self.rendered = true;

        let options = self.prepare_options(overrides);
        trace!("Rendering '{}' with options:{}", self.name, Pretty(&options));

        let mut data = FieldOptions::new();
        data.insert("name".to_string(), json!(self.name));
        data.insert("type".to_string(), json!(self.field_type));
        data.insert("options".to_string(), Value::Object(options));
        data.insert("show_label".to_string(), json!(show_label));
        data.insert("show_field".to_string(), json!(show_field));
        data.insert("show_error".to_string(), json!(show_error));

        Ok(self.helper.view().make(self.template.as_str(), data).render()?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Merge `options` over the stored options and keep the result
    pub fn set_options(&mut self, options: FieldOptions) -> &mut Self {
        self.options = self.prepare_options(options);
        self
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    /// Change the type name if the helper recognizes it; otherwise a no-op.
    ///
    /// The kind, and with it the template, stays the one the field was
    /// created with.
    pub fn set_type(&mut self, field_type: impl Into<String>) -> &mut Self {
        let field_type = field_type.into();
        if self.helper.field_type(&field_type).is_some() {
            self.field_type = field_type;
        } else {
            debug!(
                "Ignoring unknown type '{}' for field '{}'",
                field_type, self.name
            );
        }
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The view this field renders through
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Options shared by every field, read from the `defaults` section
    fn all_defaults(&self) -> FieldOptions {
        let config = self.helper.config();
        let class = |key: &str| config.get(key).cloned().unwrap_or(Value::Null);

        crate::options::options(json!({
            "wrapper": { "class": class("defaults.wrapper_class") },
            "attr": { "class": class("defaults.field_class") },
            "default_value": null,
            "label": self.name,
            "label_attr": { "class": class("defaults.label_class") },
            "errors": { "class": class("defaults.error_class") },
        }))
    }

    fn set_default_options(&mut self, options: FieldOptions) {
        let defaults = self.helper.merge_options(
            &self.all_defaults(),
            &self.kind.defaults(self.helper.config()),
        );
        self.options = defaults;
        self.options = self.prepare_options(options);

        match self.options.get("template") {
            None | Some(Value::Null) => {}
            Some(Value::String(template)) => {
                self.template = template.clone();
                self.options.shift_remove("template");
            }
            Some(other) => {
                warn!(
                    "Ignoring non-string template {} for field '{}'",
                    other, self.name
                );
                self.options.shift_remove("template");
            }
        }
    }

    /// Merge `overrides` over the stored options and derive the attribute
    /// strings views use.
    fn prepare_options(&self, overrides: FieldOptions) -> FieldOptions {
        let helper = &self.helper;
        let mut options = helper.merge_options(&self.options, &overrides);

        if has_error(&options) {
            let error_class = helper.config().get("defaults.wrapper_error_class");
            add_wrapper_error_class(&mut options, error_class);
        }

        let attrs = |options: &FieldOptions, key: &str| {
            Value::String(helper.prepare_attributes(options.get(key).unwrap_or(&Value::Null)))
        };
        let wrapper_attrs = attrs(&options, "wrapper");
        let error_attrs = attrs(&options, "errors");
        let label_attrs = attrs(&options, "label_attr");
        let (field_id, field_attrs) = self.field_attributes(&options);
        options.insert("wrapper_attrs".to_string(), wrapper_attrs);
        options.insert("error_attrs".to_string(), error_attrs);
        options.insert("field_attrs".to_string(), Value::String(field_attrs));
        options.insert("label_attrs".to_string(), label_attrs);
        options.insert("field_id".to_string(), field_id);

        self.kind.decorate(&mut options);
        options
    }

    /// The element id labels point at and the field's attribute string.
    ///
    /// The id defaults to the field name; an `id` in `attr` replaces it and
    /// a null `id` suppresses it.
    fn field_attributes(&self, options: &FieldOptions) -> (Value, String) {
        let mut with_id = FieldOptions::new();
        with_id.insert("id".to_string(), json!(self.name));
        let attr = match options.get("attr") {
            Some(Value::Object(attr)) => self.helper.merge_options(&with_id, attr),
            _ => with_id,
        };

        let field_id = attr
            .get("id")
            .and_then(scalar_to_string)
            .map_or(Value::Null, Value::String);
        let field_attrs = self.helper.prepare_attributes(&Value::Object(attr));
        (field_id, field_attrs)
    }
}

fn has_error(options: &FieldOptions) -> bool {
    matches!(options.get("error_message"), Some(Value::String(message)) if !message.is_empty())
}

/// Append the configured error class to the wrapper's class list
fn add_wrapper_error_class(options: &mut FieldOptions, error_class: Option<&Value>) {
    let Some(Value::String(error_class)) = error_class else {
        return;
    };
    let Some(Value::Object(wrapper)) = options.get_mut("wrapper") else {
        return;
    };

    let class = match wrapper.get("class") {
        Some(Value::String(existing)) if existing.split_whitespace().any(|c| c == error_class.as_str()) => {
            return;
        }
        Some(Value::String(existing)) if !existing.is_empty() => {
            format!("{existing} {error_class}")
        }
        _ => error_class.clone(),
    };
    wrapper.insert("class".to_string(), Value::String(class));
}
