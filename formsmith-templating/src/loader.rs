//! View loading
//!
//! A view is a named Liquid template. Names may carry a namespace
//! (`formsmith::text`) and dot-separated segments (`fields.text`); loaders
//! decide how a name maps onto their storage. Loaders compose through
//! [`LayeredViews`], so an application can shadow any builtin view by
//! providing one with the same name.

use crate::error::{Result, TemplatingError};
use crate::security::validate_view_security;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// File extensions tried, in order, when a view name has none
pub const VIEW_EXTENSIONS: &[&str] = &[".liquid", ".html.liquid", ".html"];

/// Trait for types that can provide view sources by name
pub trait ViewLoader: Send + Sync + Debug {
    /// Check if a view with the given name exists
    fn contains(&self, name: &str) -> bool;

    /// Names of all views this loader can enumerate
    fn names(&self) -> Vec<String>;

    /// Try to load a view source by name
    fn try_get(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Load a view source by name, returning an error if not found
    fn get(&self, name: &str) -> Result<String> {
        self.try_get(name)
            .map(Cow::into_owned)
            .ok_or_else(|| TemplatingError::ViewNotFound {
                name: name.to_string(),
            })
    }
}

impl<T: ViewLoader + ?Sized> ViewLoader for Arc<T> {
    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }

    fn try_get(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).try_get(name)
    }
}

/// Views held in memory, keyed by exact name
#[derive(Debug, Default, Clone)]
pub struct MemoryViews {
    views: BTreeMap<String, String>,
}

impl MemoryViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a view
    pub fn with_view(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.views.insert(name.into(), source.into());
    }
}

impl ViewLoader for MemoryViews {
    fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        self.views.keys().cloned().collect()
    }

    fn try_get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.views.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

/// Views read from a directory tree.
///
/// `app::fields.text` resolves to `<root>/app/fields/text.liquid` (then
/// `.html.liquid`, then `.html`). Sources are read on every lookup so edits
/// show up without a restart, and are validated as untrusted content.
#[derive(Debug, Clone)]
pub struct DirectoryViews {
    root: PathBuf,
}

impl DirectoryViews {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative path of a view name without extension.
    ///
    /// Every `::` or `.` separated segment must be a single plain path
    /// component, so names never reach outside the root.
    fn relative_stem(name: &str) -> Option<PathBuf> {
        let mut path = PathBuf::new();
        for segment in name.split("::").flat_map(|part| part.split('.')) {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(_)), None) => path.push(segment),
                _ => return None,
            }
        }
        Some(path)
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        // An explicit extension is honored as-is, longest match first
        let explicit = VIEW_EXTENSIONS
            .iter()
            .filter(|ext| name.len() > ext.len() && name.ends_with(**ext))
            .max_by_key(|ext| ext.len());

        let (stem, extensions): (&str, &[&str]) = match explicit {
            Some(ext) => (&name[..name.len() - ext.len()], std::slice::from_ref(ext)),
            None => (name, VIEW_EXTENSIONS),
        };

        let stem = self.root.join(Self::relative_stem(stem)?);
        extensions.iter().find_map(|ext| {
            let mut candidate = stem.clone().into_os_string();
            candidate.push(ext);
            let candidate = PathBuf::from(candidate);
            candidate.is_file().then_some(candidate)
        })
    }

    fn collect_names(&self, dir: &Path, prefix: &str, names: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_dir() {
                let nested = if prefix.is_empty() {
                    format!("{file_name}::")
                } else {
                    format!("{prefix}{file_name}.")
                };
                self.collect_names(&path, &nested, names);
            } else if let Some(stem) = VIEW_EXTENSIONS
                .iter()
                .rev()
                .find_map(|ext| file_name.strip_suffix(ext))
            {
                names.push(format!("{prefix}{stem}"));
            }
        }
    }
}

impl ViewLoader for DirectoryViews {
    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&self.root, "", &mut names);
        names.sort();
        names
    }

    fn try_get(&self, name: &str) -> Option<Cow<'_, str>> {
        let path = self.resolve(name)?;
        match std::fs::read_to_string(&path) {
            Ok(source) => match validate_view_security(&source, false) {
                Ok(()) => Some(Cow::Owned(source)),
                Err(e) => {
                    tracing::warn!("Rejected view {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read view {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// A stack of loaders; the first loader containing a view wins
#[derive(Debug, Default, Clone)]
pub struct LayeredViews {
    layers: Vec<Arc<dyn ViewLoader>>,
}

impl LayeredViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a loader below the existing ones
    pub fn with_layer(mut self, loader: impl ViewLoader + 'static) -> Self {
        self.layers.push(Arc::new(loader));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ViewLoader for LayeredViews {
    fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|layer| layer.contains(name))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layers.iter().flat_map(|l| l.names()).collect();
        names.sort();
        names.dedup();
        names
    }

    fn try_get(&self, name: &str) -> Option<Cow<'_, str>> {
        for layer in &self.layers {
            if let Some(source) = layer.try_get(name) {
                return Some(source);
            }
        }
        None
    }
}

/// Adapter exposing a [`ViewLoader`] to Liquid's `{% include %}` machinery
#[derive(Debug, Clone)]
pub(crate) struct IncludeSource {
    loader: Arc<dyn ViewLoader>,
}

impl IncludeSource {
    pub(crate) fn new(loader: Arc<dyn ViewLoader>) -> Self {
        Self { loader }
    }
}

impl liquid::partials::PartialSource for IncludeSource {
    fn contains(&self, name: &str) -> bool {
        self.loader.contains(name)
    }

    fn names(&self) -> Vec<&str> {
        // Names are computed on demand and cannot be borrowed from here
        Vec::new()
    }

    fn try_get<'a>(&'a self, name: &str) -> Option<Cow<'a, str>> {
        self.loader.try_get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_memory_views() {
        let views = MemoryViews::new().with_view("app::text", "<input>");

        assert!(views.contains("app::text"));
        assert!(!views.contains("app::select"));
        assert_eq!(views.get("app::text").unwrap(), "<input>");
        assert!(matches!(
            views.get("app::select"),
            Err(TemplatingError::ViewNotFound { .. })
        ));
    }

    #[test]
    fn test_directory_views_resolve_namespaced_names() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("app").join("fields")).unwrap();
        fs::write(
            temp_dir.path().join("app").join("fields").join("text.liquid"),
            "text view",
        )
        .unwrap();
        fs::write(temp_dir.path().join("plain.html"), "plain view").unwrap();

        let views = DirectoryViews::new(temp_dir.path());

        assert_eq!(views.get("app::fields.text").unwrap(), "text view");
        assert_eq!(views.get("plain").unwrap(), "plain view");
        assert_eq!(views.get("plain.html").unwrap(), "plain view");
        assert!(!views.contains("app::missing"));
        assert_eq!(views.names(), vec!["app::fields.text", "plain"]);
    }

    #[test]
    fn test_directory_views_reject_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let views = DirectoryViews::new(temp_dir.path().join("root"));

        assert!(!views.contains("..::secret"));
        assert!(!views.contains("a..b"));
        assert!(!views.contains("../secret.html"));
    }

    #[test]
    fn test_directory_views_reject_paths_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir_all(root.join("app")).unwrap();
        fs::write(root.join("app").join("inner.html"), "inner").unwrap();
        let outside = temp_dir.path().join("secret.html");
        fs::write(&outside, "secret").unwrap();

        let views = DirectoryViews::new(&root);

        assert!(!views.contains(&outside.to_string_lossy()));
        assert!(views.try_get(&outside.to_string_lossy()).is_none());
        assert!(!views.contains("/secret.html"));
        assert!(!views.contains("app/../../secret.html"));
        assert!(!views.contains(".html"));
        assert_eq!(views.get("app::inner.html").unwrap(), "inner");
        assert_eq!(views.get("app.inner.html").unwrap(), "inner");
    }

    #[test]
    fn test_layered_views_first_wins() {
        let layered = LayeredViews::new()
            .with_layer(MemoryViews::new().with_view("formsmith::text", "override"))
            .with_layer(
                MemoryViews::new()
                    .with_view("formsmith::text", "builtin")
                    .with_view("formsmith::select", "select"),
            );

        assert_eq!(layered.len(), 2);
        assert_eq!(layered.get("formsmith::text").unwrap(), "override");
        assert_eq!(layered.get("formsmith::select").unwrap(), "select");
        assert_eq!(layered.names(), vec!["formsmith::select", "formsmith::text"]);
    }
}
