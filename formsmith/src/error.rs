//! Error types for forms and fields

use formsmith_config::ConfigError;
use formsmith_templating::TemplatingError;
use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised by [`crate::Form`] and field rendering.
///
/// Field construction and setters never fail: unknown types passed to
/// [`crate::FormField::set_type`] are ignored and missing configuration keys
/// fall back to literal defaults. Only the owning form's bookkeeping and the
/// view engine produce errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The type name is not registered with the form helper
    #[error("unknown field type '{field_type}' for field '{name}'")]
    UnknownFieldType { name: String, field_type: String },

    /// A field with this name already exists on the form
    #[error("field already exists: {name}")]
    DuplicateField { name: String },

    /// No field with this name exists on the form
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// Resolving or rendering a view failed
    #[error(transparent)]
    Templating(#[from] TemplatingError),

    /// Loading configuration failed
    #[error(transparent)]
    Config(#[from] ConfigError),
}
