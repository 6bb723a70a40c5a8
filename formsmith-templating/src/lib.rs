//! View rendering for formsmith
//!
//! Views are Liquid templates resolved by name through a [`ViewLoader`].
//! [`ViewFactory`] is the entry point form fields render through:
//!
//! ```
//! use formsmith_templating::{MemoryViews, ViewFactory};
//! use serde_json::{json, Map};
//!
//! let factory = ViewFactory::new(
//!     MemoryViews::new().with_view("app::hello", "Hello {{ name }}"),
//! )?;
//!
//! let mut data = Map::new();
//! data.insert("name".into(), json!("form"));
//! assert_eq!(factory.render("app::hello", data)?, "Hello form");
//! # Ok::<(), formsmith_templating::TemplatingError>(())
//! ```
//!
//! Liquid does not escape output; views are expected to apply the `escape`
//! filter to user-provided values. Attribute strings handed to views are
//! escaped before they get here.

pub mod builtin;
pub mod error;
pub mod factory;
pub mod loader;
pub mod security;

pub use builtin::BuiltinViews;
pub use error::{Result, TemplatingError};
pub use factory::{View, ViewFactory};
pub use loader::{DirectoryViews, LayeredViews, MemoryViews, ViewLoader, VIEW_EXTENSIONS};
pub use security::validate_view_security;
