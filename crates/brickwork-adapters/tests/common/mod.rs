//! Shared fixtures for service-level tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use brickwork_adapters::{MemoryFilesystem, SerdeManifestCodec};
use brickwork_core::application::ports::{
    Checkout, CommandRunner, CommandStatus, ExternalCommand, RepoFetcher,
};
use brickwork_core::prelude::*;
use mockall::mock;

pub const ROOT: &str = "/proj";
pub const BRICK: &str = "/bricks/blog";

mock! {
    pub Runner {}
    impl CommandRunner for Runner {
        fn run(&self, command: &ExternalCommand) -> std::io::Result<CommandStatus>;
    }
}

mock! {
    pub Fetcher {}
    impl RepoFetcher for Fetcher {
        fn fetch(&self, repo: &RepoRef) -> BrickworkResult<Box<dyn Checkout>>;
    }
}

/// Checkout pointing at a directory seeded in a `MemoryFilesystem`.
pub struct FixedCheckout(pub PathBuf);

impl Checkout for FixedCheckout {
    fn path(&self) -> &Path {
        &self.0
    }
}

pub const SETTINGS: &str = r#"INSTALLED_APPS = [
    "django.contrib.admin",
    "django.contrib.auth",
]

MIDDLEWARE = [
    "django.middleware.security.SecurityMiddleware",
]
"#;

pub const URLS: &str = r#"from django.contrib import admin
from django.urls import path

urlpatterns = [
    path("admin/", admin.site.urls),
    # bricks: generated routes end here
]
"#;

pub const BLOG_MANIFEST: &str = r#"name: blog
dependencies:
  - markdown
  - django-taggit==5.0
django:
  installed_apps:
    - blog
  middleware:
    - blog.middleware.ReadingTime
  urls:
    - mount: /blog/
      include: blog.urls
env:
  - key: BLOG_TITLE
    default: My blog
"#;

/// A conventional project with all four surfaces present.
pub fn seeded_project() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(format!("{ROOT}/requirements.txt"), "Django==5.0\n")
        .with_file(format!("{ROOT}/config/settings.py"), SETTINGS)
        .with_file(format!("{ROOT}/config/urls.py"), URLS)
        .with_file(format!("{ROOT}/.env.example"), "SECRET_KEY=change-me\n")
}

/// Add the blog brick (manifest plus module) at `BRICK`.
pub fn with_blog_brick(fs: MemoryFilesystem) -> MemoryFilesystem {
    fs.with_file(format!("{BRICK}/brick.yaml"), BLOG_MANIFEST)
        .with_file(format!("{BRICK}/blog/__init__.py"), "")
        .with_file(format!("{BRICK}/blog/apps.py"), "class BlogConfig: pass\n")
}

pub fn idle_runner() -> MockRunner {
    let mut runner = MockRunner::new();
    runner.expect_run().never();
    runner
}

pub fn service_with(fs: &MemoryFilesystem, runner: MockRunner, hooks: Hooks) -> IntegrationService {
    IntegrationService::new(
        Arc::new(fs.clone()),
        Arc::new(SerdeManifestCodec::new()),
        Arc::new(runner),
        TargetProject::new(ROOT),
        hooks,
    )
}

pub fn service(fs: &MemoryFilesystem) -> IntegrationService {
    service_with(fs, idle_runner(), Hooks::disabled())
}

pub fn read(fs: &MemoryFilesystem, relative: &str) -> String {
    fs.read_file(format!("{ROOT}/{relative}")).unwrap_or_default()
}

pub fn tags(report: &ApplyReport) -> Vec<String> {
    report
        .entry
        .actions
        .iter()
        .map(|a| a.kind.to_string())
        .collect()
}
