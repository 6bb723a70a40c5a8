//! # formsmith
//!
//! Form fields that carry their own options and render themselves through
//! Liquid views.
//!
//! Every field merges three layers of options: the cross-field defaults read
//! from configuration, the defaults of its kind, and what the caller passed.
//! Rendering hands the merged options to the view configured for the kind.
//!
//! ```
//! use formsmith::{options, Form, FormHelper};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let helper = Arc::new(FormHelper::builtin()?);
//! let mut form = Form::new(helper);
//! form.add("email", "email", options(json!({ "label": "E-mail" })))?;
//!
//! let html = form.render_field("email")?;
//! assert!(html.contains("<label for=\"email\""));
//! assert!(form.field("email").unwrap().is_rendered());
//! # Ok::<(), formsmith::FormError>(())
//! ```

pub mod error;
pub mod field;
pub mod form;
pub mod helper;
pub mod kinds;
pub mod logging;
pub mod options;

pub use error::{FormError, Result};
pub use field::FormField;
pub use form::Form;
pub use helper::{FormHelper, VIEWS_PATH_KEY};
pub use kinds::{FieldKind, DEFAULT_FIELD_TYPES};
pub use options::{merge_options, options, prepare_attributes, FieldOptions};

pub use formsmith_config::FormConfig;
pub use formsmith_templating::ViewFactory;
