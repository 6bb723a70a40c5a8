//! formsmith configuration management using Figment
//!
//! Supplies the values form fields read their defaults from: the CSS classes
//! applied to wrappers, inputs, labels and error blocks, and the view each
//! field template key resolves to.
//!
//! # Sources
//!
//! Later sources override earlier ones:
//!
//! - builtin defaults ([`ConfigDefaults`])
//! - `~/.formsmith/forms.{toml,yaml,yml,json}`
//! - `./.formsmith/forms.{toml,yaml,yml,json}`
//! - `FORMSMITH_` environment variables, `__` separating nested keys
//!   (`FORMSMITH_DEFAULTS__FIELD_CLASS=input`)
//!
//! # Example configuration
//!
//! ```toml
//! [defaults]
//! wrapper_class = "mb-3"
//! field_class = "form-control form-control-sm"
//! error_class = "invalid-feedback"
//!
//! [templates]
//! text = "app::fields.text"
//! ```
//!
//! ```no_run
//! use formsmith_config::load_configuration;
//!
//! let config = load_configuration()?;
//! let view = config.get_or("templates.text", "text");
//! # Ok::<(), formsmith_config::ConfigError>(())
//! ```

/// Default configuration values
pub mod defaults;
/// File discovery logic for configuration files
pub mod discovery;
/// Error types and handling
pub mod error;
/// Resolved configuration with dotted lookup
pub mod form_config;
/// Figment-backed configuration loading
pub mod provider;

pub use defaults::{ConfigDefaults, BUILTIN_VIEW_NAMESPACE, TEMPLATE_KEYS};
pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use form_config::FormConfig;
pub use provider::{load_configuration, ConfigProvider, ENV_PREFIX};
