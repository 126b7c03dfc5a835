//! Embedded template resources
//!
//! The template trees ship inside the binary and are materialized to a
//! temporary directory at the start of each run, so the template
//! engine can walk them like any other directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

/// Every embedded template file, keyed by its path under the resource
/// root. Kept sorted by path.
pub const RESOURCES: &[(&str, &str)] = &[
    (
        "apscheduler/src/project_name/scheduler.py",
        include_str!("../resources/apscheduler/src/project_name/scheduler.py"),
    ),
    (
        "fastapi_cgi/.env.cgi",
        include_str!("../resources/fastapi_cgi/.env.cgi"),
    ),
    (
        "fastapi_cgi/cgi/index.cgi",
        include_str!("../resources/fastapi_cgi/cgi/index.cgi"),
    ),
    (
        "fastapi_cgi/tasks.json",
        include_str!("../resources/fastapi_cgi/tasks.json"),
    ),
    (
        "plotly/src/components/ExampleChart.vue",
        include_str!("../resources/plotly/src/components/ExampleChart.vue"),
    ),
    (
        "project_template/.env.example",
        include_str!("../resources/project_template/.env.example"),
    ),
    (
        "project_template/.vscode/launch.json",
        include_str!("../resources/project_template/.vscode/launch.json"),
    ),
    (
        "project_template/.vscode/settings.json",
        include_str!("../resources/project_template/.vscode/settings.json"),
    ),
    (
        "project_template/.vscode/tasks.json",
        include_str!("../resources/project_template/.vscode/tasks.json"),
    ),
    (
        "project_template/README.md",
        include_str!("../resources/project_template/README.md"),
    ),
    (
        "project_template/backend/src/project_name/__init__.py",
        include_str!("../resources/project_template/backend/src/project_name/__init__.py"),
    ),
    (
        "project_template/backend/src/project_name/api/__init__.py",
        include_str!("../resources/project_template/backend/src/project_name/api/__init__.py"),
    ),
    (
        "project_template/backend/src/project_name/api/v1/__init__.py",
        include_str!("../resources/project_template/backend/src/project_name/api/v1/__init__.py"),
    ),
    (
        "project_template/backend/src/project_name/api/v1/example.py",
        include_str!("../resources/project_template/backend/src/project_name/api/v1/example.py"),
    ),
    (
        "project_template/backend/src/project_name/cli.py",
        include_str!("../resources/project_template/backend/src/project_name/cli.py"),
    ),
    (
        "project_template/backend/src/project_name/common/logger.py",
        include_str!("../resources/project_template/backend/src/project_name/common/logger.py"),
    ),
    (
        "project_template/backend/src/project_name/common/settings.py",
        include_str!("../resources/project_template/backend/src/project_name/common/settings.py"),
    ),
    (
        "project_template/backend/src/project_name/frontend.py",
        include_str!("../resources/project_template/backend/src/project_name/frontend.py"),
    ),
    (
        "project_template/frontend/.env.development",
        include_str!("../resources/project_template/frontend/.env.development"),
    ),
    (
        "project_template/frontend/.prettierrc.json",
        include_str!("../resources/project_template/frontend/.prettierrc.json"),
    ),
    (
        "project_template/frontend/src/services/api.js",
        include_str!("../resources/project_template/frontend/src/services/api.js"),
    ),
    (
        "project_template/frontend/ts/vite.config.ts",
        include_str!("../resources/project_template/frontend/ts/vite.config.ts"),
    ),
    (
        "project_template/frontend/vue-router/src/pages/About.vue",
        include_str!("../resources/project_template/frontend/vue-router/src/pages/About.vue"),
    ),
    (
        "project_template/frontend/vue-router/src/router/index.js",
        include_str!("../resources/project_template/frontend/vue-router/src/router/index.js"),
    ),
];

/// The embedded resources written out to a temporary directory. The
/// directory lives as long as this value.
pub struct ResourceTree {
    dir: TempDir,
}

impl ResourceTree {
    /// Write every embedded resource under a fresh temporary directory
    pub fn materialize() -> Result<Self> {
        let dir = TempDir::new()?;
        for (path, content) in RESOURCES {
            let target = dir.path().join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
        }
        debug!(
            "Materialized {} template resources at {}",
            RESOURCES.len(),
            dir.path().display()
        );
        Ok(Self { dir })
    }

    /// Root of the materialized tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Resolve a resource-relative path
    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Content of a single embedded resource, without materialization
    pub fn content(relative: &str) -> Option<&'static str> {
        RESOURCES
            .iter()
            .find(|(path, _)| *path == relative)
            .map(|(_, content)| *content)
    }
}

#[cfg(test)]
mod tests {
    use stackgen_templates::render_str;

    use super::*;
    use crate::descriptor::ProjectDescriptor;

    #[test]
    fn test_materialize_writes_every_resource() {
        let tree = ResourceTree::materialize().unwrap();
        for (path, content) in RESOURCES {
            let on_disk = std::fs::read_to_string(tree.join(path)).unwrap();
            assert_eq!(&on_disk, content, "mismatch for {path}");
        }
    }

    #[test]
    fn test_every_resource_renders_against_the_full_variable_table() {
        // Catches stray placeholder tokens in template content: every
        // embedded file must render cleanly with the standard table.
        let descriptor = ProjectDescriptor::new("demo-app", "/tmp", "3.12", vec![]);
        let scheduler = stackgen_features::lookup("scheduler").unwrap();
        let vars = descriptor.build_variables(&[scheduler]);
        for (path, content) in RESOURCES {
            render_str(content, &vars, path)
                .unwrap_or_else(|e| panic!("resource {path} failed to render: {e}"));
        }
    }

    #[test]
    fn test_resource_paths_are_sorted_and_unique() {
        let paths: Vec<&str> = RESOURCES.iter().map(|(path, _)| *path).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_content_lookup() {
        assert!(ResourceTree::content("fastapi_cgi/tasks.json").is_some());
        assert!(ResourceTree::content("missing/file").is_none());
    }
}
