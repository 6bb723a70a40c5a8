//! Error types for view loading and rendering

use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors raised while resolving, parsing or rendering a view
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// No loader knows the requested view
    #[error("view not found: {name}")]
    ViewNotFound { name: String },

    /// The view source is not valid Liquid
    #[error("failed to parse view '{view}': {message}")]
    Parse { view: String, message: String },

    /// Rendering failed, e.g. a missing include
    #[error("failed to render view '{view}': {message}")]
    Render { view: String, message: String },

    /// The Liquid parser could not be built
    #[error("failed to build view engine: {0}")]
    Engine(String),

    /// The render data could not be converted into a Liquid object
    #[error("invalid view data: {0}")]
    Data(String),

    /// The view source exceeded the configured limits
    #[error("view rejected: {0}")]
    Security(String),
}
