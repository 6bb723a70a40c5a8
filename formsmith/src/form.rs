//! The owning form
//!
//! A [`Form`] owns its fields in insertion order and renders them, either one
//! at a time or all the ones not yet rendered. Validation messages set on the
//! form reach the matching field's view as `options.error_message`.

use crate::error::{FormError, Result};
use crate::field::FormField;
use crate::helper::FormHelper;
use crate::options::{self, FieldOptions};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Methods browsers can submit directly; anything else is spoofed via POST
const NATIVE_METHODS: &[&str] = &["GET", "POST"];

#[derive(Debug, Clone)]
pub struct Form {
    helper: Arc<FormHelper>,
    options: FieldOptions,
    fields: IndexMap<String, FormField>,
    errors: IndexMap<String, String>,
}

impl Form {
    pub fn new(helper: Arc<FormHelper>) -> Self {
        Self {
            helper,
            options: options::options(json!({
                "method": "POST",
                "url": null,
                "class": null,
                "attr": {},
            })),
            fields: IndexMap::new(),
            errors: IndexMap::new(),
        }
    }

    /// Merge form-level options (`method`, `url`, `class`, `attr`)
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = self.helper.merge_options(&self.options, &options);
        self
    }

    pub fn helper(&self) -> &Arc<FormHelper> {
        &self.helper
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Add a field; the type must be registered and the name unused
    pub fn add(
        &mut self,
        name: impl Into<String>,
        field_type: &str,
        options: FieldOptions,
    ) -> Result<&mut Self> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(FormError::DuplicateField { name });
        }
        let field = self.make_field(&name, field_type, options)?;
        self.fields.insert(name, field);
        Ok(self)
    }

    /// Replace an existing field in place, keeping its position
    pub fn modify(&mut self, name: &str, field_type: &str, options: FieldOptions) -> Result<&mut Self> {
        if !self.fields.contains_key(name) {
            return Err(FormError::FieldNotFound {
                name: name.to_string(),
            });
        }
        let field = self.make_field(name, field_type, options)?;
        self.fields.insert(name.to_string(), field);
        Ok(self)
    }

    pub fn remove(&mut self, name: &str) -> Option<FormField> {
        self.fields.shift_remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.get_mut(name)
    }

    /// Fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Replace the validation messages shown next to fields
    pub fn set_errors<I, K, V>(&mut self, errors: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.errors = errors
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Render one field, whether or not it was rendered before
    pub fn render_field(&mut self, name: &str) -> Result<String> {
        let overrides = error_overrides(&self.errors, name);
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| FormError::FieldNotFound {
                name: name.to_string(),
            })?;
        field.render_with(overrides, true, true, true)
    }

    /// Render every field not rendered yet, in insertion order
    pub fn render_rest(&mut self) -> Result<String> {
        self.render_pending(self.fields.len())
    }

    /// Render fields not rendered yet, up to and including `name`
    pub fn render_until(&mut self, name: &str) -> Result<String> {
        let Some(last) = self.fields.get_index_of(name) else {
            return Err(FormError::FieldNotFound {
                name: name.to_string(),
            });
        };
        self.render_pending(last + 1)
    }

    /// Render the whole form through the `form` view.
    ///
    /// With `show_fields` the fields not rendered yet are rendered between
    /// the opening and closing tags.
    pub fn render_form(&mut self, show_start: bool, show_fields: bool, show_end: bool) -> Result<String> {
        let fields = if show_fields {
            self.render_rest()?
        } else {
            String::new()
        };

        let (method, spoofed) = self.method();
        let mut data = FieldOptions::new();
        data.insert("form_attrs".to_string(), json!(self.form_attributes()));
        data.insert("method".to_string(), json!(method));
        data.insert("method_field".to_string(), json!(spoofed));
        data.insert("fields".to_string(), json!(fields));
        data.insert("show_start".to_string(), json!(show_start));
        data.insert("show_fields".to_string(), json!(show_fields));
        data.insert("show_end".to_string(), json!(show_end));

        let template = self.helper.config().get_or("templates.form", "form");
        debug!("Rendering form through '{}'", template);
        Ok(self.helper.view().render(&template, data)?)
    }

    /// The attribute string of the opening `<form>` tag
    pub fn form_attributes(&self) -> String {
        let (method, _) = self.method();
        let mut attrs = options::options(json!({
            "method": method,
            "action": self.options.get("url").cloned().unwrap_or(Value::Null),
            "class": self.options.get("class").cloned().unwrap_or(Value::Null),
        }));
        if let Some(Value::Object(extra)) = self.options.get("attr") {
            attrs = self.helper.merge_options(&attrs, extra);
        }
        self.helper.prepare_attributes(&Value::Object(attrs))
    }

    /// Method for the `<form>` tag and the method to spoof, if any
    fn method(&self) -> (String, Option<String>) {
        let method = self
            .options
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or("POST")
            .to_uppercase();

        if NATIVE_METHODS.contains(&method.as_str()) {
            (method, None)
        } else {
            ("POST".to_string(), Some(method))
        }
    }

    fn make_field(&self, name: &str, field_type: &str, options: FieldOptions) -> Result<FormField> {
        let kind = self
            .helper
            .field_type(field_type)
            .ok_or_else(|| FormError::UnknownFieldType {
                name: name.to_string(),
                field_type: field_type.to_string(),
            })?;
        Ok(FormField::new(
            name,
            field_type,
            kind,
            self.helper.clone(),
            options,
        ))
    }

    /// Render the unrendered fields among the first `count`, by position.
    ///
    /// Fields are addressed by the key they were added under, which stays
    /// valid after [`FormField::set_name`].
    fn render_pending(&mut self, count: usize) -> Result<String> {
        let pending: Vec<usize> = (0..count.min(self.fields.len()))
            .filter(|&index| {
                self.fields
                    .get_index(index)
                    .is_some_and(|(_, field)| !field.is_rendered())
            })
            .collect();

        let mut html = String::new();
        for index in pending {
            let Some((key, field)) = self.fields.get_index_mut(index) else {
                continue;
            };
            let overrides = error_overrides(&self.errors, key);
            html.push_str(&field.render_with(overrides, true, true, true)?);
        }
        Ok(html)
    }
}

fn error_overrides(errors: &IndexMap<String, String>, name: &str) -> FieldOptions {
    let mut overrides = FieldOptions::new();
    if let Some(message) = errors.get(name) {
        overrides.insert("error_message".to_string(), json!(message));
    }
    overrides
}
