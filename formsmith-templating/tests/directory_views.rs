//! Rendering views from disk layered over the builtin views

use formsmith_templating::{TemplatingError, ViewFactory};
use serde_json::{json, Map, Value};
use std::fs;
use tempfile::TempDir;

fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test data must be an object"),
    }
}

fn field_data(name: &str, field_type: &str) -> Map<String, Value> {
    data(json!({
        "name": name,
        "type": field_type,
        "show_label": true,
        "show_field": true,
        "show_error": true,
        "options": {
            "wrapper": { "class": "form-group" },
            "wrapper_attrs": "class=\"form-group\" ",
            "label": "E-mail <required>",
            "field_id": name,
            "label_attrs": "class=\"control-label\" ",
            "field_attrs": "class=\"form-control\" ",
            "error_attrs": "class=\"text-danger\" ",
            "default_value": null,
        }
    }))
}

#[test_log::test]
fn test_directory_view_shadows_builtin() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("formsmith")).unwrap();
    fs::write(
        temp_dir.path().join("formsmith").join("text.liquid"),
        "custom {{ name }}",
    )
    .unwrap();

    let factory = ViewFactory::with_directory(temp_dir.path()).unwrap();

    assert_eq!(
        factory.render("formsmith::text", field_data("email", "email")).unwrap(),
        "custom email"
    );
    // Views the directory does not provide still come from the builtins
    assert!(factory
        .render("formsmith::textarea", field_data("bio", "textarea"))
        .unwrap()
        .contains("<textarea name=\"bio\""));
}

#[test_log::test]
fn test_builtin_text_view_escapes_label() {
    let factory = ViewFactory::builtin().unwrap();

    let html = factory
        .render("formsmith::text", field_data("email", "email"))
        .unwrap();

    assert!(html.starts_with("<div class=\"form-group\" >"));
    assert!(html.contains("E-mail &lt;required&gt;"));
    assert!(html.contains("<input type=\"email\" name=\"email\" class=\"form-control\" >"));
    assert!(html.ends_with("</div>"));
}

#[test_log::test]
fn test_oversized_directory_view_is_not_served() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("huge.liquid"),
        "x".repeat(formsmith_templating::security::MAX_VIEW_SIZE + 1),
    )
    .unwrap();

    let factory = ViewFactory::with_directory(temp_dir.path()).unwrap();
    let err = factory.render("huge", Map::new()).unwrap_err();

    assert!(matches!(err, TemplatingError::ViewNotFound { .. }));
}
