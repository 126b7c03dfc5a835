//! Project descriptor: validated user input for one generation run

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use stackgen_features::FeatureModule;
use stackgen_templates::VarTable;

use crate::error::{PipelineError, Result};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("name pattern is valid"));
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+(\.[0-9]+)?$").expect("version pattern is valid"));

/// Whether `name` is an acceptable project name
pub fn valid_project_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Whether `version` is a dotted-numeric runtime version
pub fn valid_python_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// Whether `dir` is an existing directory
pub fn valid_parent_dir(dir: &Path) -> bool {
    dir.is_dir()
}

/// Validated inputs for one generation run. Created from user input,
/// validated before any filesystem mutation, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Project name (identifier-safe character set)
    pub project_name: String,
    /// Pre-existing directory the project is created under
    pub parent_dir: PathBuf,
    /// Target Python version for the backend
    pub python_version: String,
    /// Enabled feature toggles, as requested (not canonicalized)
    pub features: Vec<String>,
}

impl ProjectDescriptor {
    /// Create a descriptor; call [`validate`](Self::validate) before use
    pub fn new(
        project_name: impl Into<String>,
        parent_dir: impl Into<PathBuf>,
        python_version: impl Into<String>,
        features: Vec<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            parent_dir: parent_dir.into(),
            python_version: python_version.into(),
            features,
        }
    }

    /// The directory the project is generated into
    pub fn project_dir(&self) -> PathBuf {
        self.parent_dir.join(&self.project_name)
    }

    /// Package-safe name: lowercased, dashes replaced by underscores
    pub fn package_name(&self) -> String {
        self.project_name.replace('-', "_").to_lowercase()
    }

    /// Whether a feature toggle is enabled
    pub fn has_feature(&self, key: &str) -> bool {
        self.features.iter().any(|feature| feature == key)
    }

    /// Frontend generator template variant, selected by the language toggle
    pub fn frontend_template(&self) -> &'static str {
        if self.has_feature("typescript") {
            "vue-ts"
        } else {
            "vue"
        }
    }

    /// Validate all fields. Purely local: reads the filesystem but
    /// mutates nothing. Also rejects a pre-existing project directory.
    pub fn validate(&self) -> Result<()> {
        if !valid_project_name(&self.project_name) {
            return Err(PipelineError::Validation(format!(
                "Invalid project name '{}': only a-z, A-Z, 0-9, '_' and '-' are allowed",
                self.project_name
            )));
        }
        if !valid_parent_dir(&self.parent_dir) {
            return Err(PipelineError::Validation(format!(
                "Parent directory does not exist: {}",
                self.parent_dir.display()
            )));
        }
        if !valid_python_version(&self.python_version) {
            return Err(PipelineError::Validation(format!(
                "Invalid Python version '{}': expected a dotted-numeric form like 3.12",
                self.python_version
            )));
        }
        stackgen_features::resolve(&self.features)?;

        let project_dir = self.project_dir();
        if project_dir.exists() {
            return Err(PipelineError::AlreadyExists(project_dir));
        }
        Ok(())
    }

    /// Assemble the variable table for this run. Feature variable
    /// contributions are merged over the empty defaults, so templates
    /// can reference the lifespan hooks whether or not a feature fills
    /// them in.
    pub fn build_variables(&self, modules: &[&'static FeatureModule]) -> VarTable {
        let mut builder = VarTable::builder()
            .set("project_name", &self.project_name)
            .set("project_name_lower", self.project_name.to_lowercase())
            .set("python_version", &self.python_version)
            .set("package_name", self.package_name())
            .set("additional_imports", "")
            .set("lifespan_init", "")
            .set("lifespan_exit", "");
        for module in modules {
            builder = builder.set_all(module.variable_contributions.iter().copied());
        }
        builder.build()
    }
}
