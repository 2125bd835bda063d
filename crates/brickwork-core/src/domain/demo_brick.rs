//! The built-in demo brick used when a remote install cannot proceed.
//!
//! Content is fixed so the fallback is deterministic: a manifest plus a
//! `demo` module with one route and one template.

/// Directory name of the demo brick under the bricks directory.
pub const DEMO_BRICK_NAME: &str = "demo";

const MANIFEST: &str = r#"name: demo
dependencies: []
django:
  installed_apps:
    - demo
  urls:
    - mount: /demo/
      include: demo.urls
env:
  - key: DEMO_GREETING
    default: Hello from the demo brick
"#;

const APPS: &str = r#"from django.apps import AppConfig


class DemoConfig(AppConfig):
    default_auto_field = "django.db.models.BigAutoField"
    name = "demo"
"#;

const URLS: &str = r#"from django.urls import path

from . import views

app_name = "demo"

urlpatterns = [
    path("", views.index, name="index"),
]
"#;

const VIEWS: &str = r#"import os

from django.shortcuts import render


def index(request):
    greeting = os.environ.get("DEMO_GREETING", "Hello from the demo brick")
    return render(request, "demo/index.html", {"greeting": greeting})
"#;

const TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Demo brick</title>
  </head>
  <body>
    <h1>{{ greeting }}</h1>
    <p>This page was installed by the brickwork demo brick.</p>
  </body>
</html>
"#;

/// Relative path (inside the brick directory) and content of every file.
pub fn files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("brick.yaml", MANIFEST),
        ("demo/__init__.py", ""),
        ("demo/apps.py", APPS),
        ("demo/urls.py", URLS),
        ("demo/views.py", VIEWS),
        ("demo/templates/demo/index.html", TEMPLATE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_brick_has_manifest_module_and_template() {
        let files = files();
        assert_eq!(files[0].0, "brick.yaml");
        assert!(files.iter().any(|(p, _)| p.ends_with("urls.py")));
        assert!(files.iter().any(|(p, _)| p.ends_with(".html")));
    }

    #[test]
    fn demo_manifest_routes_to_module() {
        assert!(MANIFEST.contains("include: demo.urls"));
        assert!(MANIFEST.contains("- demo"));
    }
}
