//! Loading a helper from configuration sources
//!
//! These set process environment variables, so they run serially.

use formsmith::{options, Form, FormHelper};
use serde_json::json;
use serial_test::serial;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const VIEWS_PATH_ENV: &str = "FORMSMITH_VIEWS__PATH";

#[test_log::test]
#[serial]
fn test_views_path_shadows_builtin_views() {
    let temp_dir = TempDir::new().unwrap();
    let views = temp_dir.path().join("views");
    fs::create_dir_all(views.join("formsmith")).unwrap();
    fs::write(
        views.join("formsmith").join("text.liquid"),
        "custom {{ name }}",
    )
    .unwrap();

    std::env::set_var(VIEWS_PATH_ENV, &views);
    let helper = FormHelper::load();
    std::env::remove_var(VIEWS_PATH_ENV);

    let helper = Arc::new(helper.unwrap());
    assert_eq!(
        helper.config().get_str("views.path"),
        Some(views.to_string_lossy().as_ref())
    );

    let mut form = Form::new(helper);
    form.add("email", "email", options(json!({})))
        .unwrap()
        .add("bio", "textarea", options(json!({})))
        .unwrap();

    assert_eq!(form.render_field("email").unwrap(), "custom email");
    // views the directory does not provide still come from the builtins
    assert!(form
        .render_field("bio")
        .unwrap()
        .contains("<textarea name=\"bio\""));
}

#[test_log::test]
#[serial]
fn test_load_without_views_path_uses_builtin_views() {
    std::env::remove_var(VIEWS_PATH_ENV);
    std::env::set_var("FORMSMITH_DEFAULTS__FIELD_CLASS", "input");
    let helper = FormHelper::load();
    std::env::remove_var("FORMSMITH_DEFAULTS__FIELD_CLASS");

    let mut form = Form::new(Arc::new(helper.unwrap()));
    form.add("email", "email", options(json!({}))).unwrap();

    let html = form.render_field("email").unwrap();
    assert!(html.contains("<input type=\"email\" name=\"email\" id=\"email\" class=\"input\" >"));
}
