//! Views shipped with formsmith
//!
//! Bootstrap-style markup for every builtin template key, registered under
//! the `formsmith::` namespace.

use crate::loader::ViewLoader;
use std::borrow::Cow;

/// Namespace the builtin views live under
pub const NAMESPACE: &str = "formsmith";

const VIEWS: &[(&str, &str)] = &[
    ("form", include_str!("views/form.liquid")),
    ("text", include_str!("views/text.liquid")),
    ("textarea", include_str!("views/textarea.liquid")),
    ("select", include_str!("views/select.liquid")),
    ("button", include_str!("views/button.liquid")),
    ("checkable", include_str!("views/checkable.liquid")),
    ("static", include_str!("views/static.liquid")),
];

/// Loader for the builtin views
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinViews;

impl BuiltinViews {
    pub fn new() -> Self {
        Self
    }

    fn lookup(name: &str) -> Option<&'static str> {
        let short = name.strip_prefix(NAMESPACE)?.strip_prefix("::")?;
        VIEWS
            .iter()
            .find(|(key, _)| *key == short)
            .map(|(_, source)| *source)
    }
}

impl ViewLoader for BuiltinViews {
    fn contains(&self, name: &str) -> bool {
        Self::lookup(name).is_some()
    }

    fn names(&self) -> Vec<String> {
        VIEWS
            .iter()
            .map(|(key, _)| format!("{NAMESPACE}::{key}"))
            .collect()
    }

    fn try_get(&self, name: &str) -> Option<Cow<'_, str>> {
        Self::lookup(name).map(Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::validate_view_security;

    #[test]
    fn test_builtin_names_are_namespaced() {
        let names = BuiltinViews.names();
        assert_eq!(names.len(), VIEWS.len());
        assert!(names.iter().all(|n| n.starts_with("formsmith::")));
    }

    #[test]
    fn test_lookup_requires_namespace() {
        assert!(BuiltinViews.contains("formsmith::text"));
        assert!(!BuiltinViews.contains("text"));
        assert!(!BuiltinViews.contains("other::text"));
    }

    #[test]
    fn test_builtin_views_pass_strict_validation() {
        for name in BuiltinViews.names() {
            let source = BuiltinViews.get(&name).unwrap();
            assert!(validate_view_security(&source, false).is_ok(), "{name}");
        }
    }
}
