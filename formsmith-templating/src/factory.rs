//! View factory: resolves a view by name and renders it with Liquid

use crate::builtin::BuiltinViews;
use crate::error::{Result, TemplatingError};
use crate::loader::{DirectoryViews, IncludeSource, LayeredViews, ViewLoader};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Renders named views.
///
/// The same loader serves top-level views and `{% include %}` partials, so a
/// view can pull in any other view by name.
pub struct ViewFactory {
    parser: liquid::Parser,
    loader: Arc<dyn ViewLoader>,
}

impl ViewFactory {
    /// Create a factory over any loader
    pub fn new(loader: impl ViewLoader + 'static) -> Result<Self> {
        let loader: Arc<dyn ViewLoader> = Arc::new(loader);
        let parser = liquid::ParserBuilder::with_stdlib()
            .partials(liquid::partials::LazyCompiler::new(IncludeSource::new(
                loader.clone(),
            )))
            .build()
            .map_err(|e| TemplatingError::Engine(e.to_string()))?;

        Ok(Self { parser, loader })
    }

    /// Factory serving only the builtin views
    pub fn builtin() -> Result<Self> {
        Self::new(BuiltinViews::new())
    }

    /// Factory serving views from `root`, falling back to the builtin views
    pub fn with_directory(root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(
            LayeredViews::new()
                .with_layer(DirectoryViews::new(root))
                .with_layer(BuiltinViews::new()),
        )
    }

    /// Whether a view with this name can be resolved
    pub fn exists(&self, name: &str) -> bool {
        self.loader.contains(name)
    }

    /// The loader views are resolved through
    pub fn loader(&self) -> &dyn ViewLoader {
        self.loader.as_ref()
    }

    /// Prepare a view for rendering. Resolution happens in [`View::render`].
    pub fn make(&self, name: impl Into<String>, data: Map<String, Value>) -> View<'_> {
        View {
            factory: self,
            name: name.into(),
            data,
        }
    }

    /// Resolve and render a view in one step
    pub fn render(&self, name: &str, data: Map<String, Value>) -> Result<String> {
        self.make(name, data).render()
    }

    fn render_view(&self, name: &str, data: &Map<String, Value>) -> Result<String> {
        let source = self.loader.get(name).inspect_err(|_| {
            warn!("View '{}' not found", name);
        })?;

        let template = self
            .parser
            .parse(&source)
            .map_err(|e| TemplatingError::Parse {
                view: name.to_string(),
                message: e.to_string(),
            })?;

        let globals = match liquid::model::to_value(data) {
            Ok(liquid::model::Value::Object(object)) => object,
            Ok(other) => {
                return Err(TemplatingError::Data(format!(
                    "expected an object, found {other:?}"
                )))
            }
            Err(e) => return Err(TemplatingError::Data(e.to_string())),
        };

        trace!("Rendering view '{}' with {} variables", name, data.len());
        let output = template
            .render(&globals)
            .map_err(|e| TemplatingError::Render {
                view: name.to_string(),
                message: e.to_string(),
            })?;

        debug!("Rendered view '{}' ({} bytes)", name, output.len());
        Ok(output)
    }
}

impl std::fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewFactory")
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

/// A view bound to its render data
#[derive(Debug)]
pub struct View<'a> {
    factory: &'a ViewFactory,
    name: String,
    data: Map<String, Value>,
}

impl View<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Add or replace one variable
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Render the view to markup
    pub fn render(&self) -> Result<String> {
        self.factory.render_view(&self.name, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryViews;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    #[test]
    fn test_render_memory_view() {
        let factory =
            ViewFactory::new(MemoryViews::new().with_view("hello", "Hello {{ name }}!")).unwrap();

        let output = factory.render("hello", data(json!({ "name": "World" }))).unwrap();
        assert_eq!(output, "Hello World!");
    }

    #[test]
    fn test_make_then_with() {
        let factory =
            ViewFactory::new(MemoryViews::new().with_view("pair", "{{ a }}-{{ b }}")).unwrap();

        let view = factory.make("pair", data(json!({ "a": 1 }))).with("b", json!(2));
        assert_eq!(view.name(), "pair");
        assert_eq!(view.data().len(), 2);
        assert_eq!(view.render().unwrap(), "1-2");
    }

    #[test]
    fn test_missing_view_is_not_found() {
        let factory = ViewFactory::new(MemoryViews::new()).unwrap();

        let err = factory.render("nope", Map::new()).unwrap_err();
        assert!(matches!(err, TemplatingError::ViewNotFound { name } if name == "nope"));
    }

    #[test]
    fn test_invalid_view_is_a_parse_error() {
        let factory =
            ViewFactory::new(MemoryViews::new().with_view("broken", "{{ unclosed")).unwrap();

        let err = factory.render("broken", Map::new()).unwrap_err();
        assert!(matches!(err, TemplatingError::Parse { view, .. } if view == "broken"));
    }

    #[test]
    fn test_include_resolves_through_loader() {
        let factory = ViewFactory::new(
            MemoryViews::new()
                .with_view("page", "<main>{% include 'parts::rule' %}</main>")
                .with_view("parts::rule", "<hr>"),
        )
        .unwrap();

        assert_eq!(factory.render("page", Map::new()).unwrap(), "<main><hr></main>");
    }

    #[test]
    fn test_builtin_factory_knows_builtin_views() {
        let factory = ViewFactory::builtin().unwrap();

        assert!(factory.exists("formsmith::text"));
        assert!(!factory.exists("app::text"));
    }
}
