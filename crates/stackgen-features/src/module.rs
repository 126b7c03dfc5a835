//! Feature module descriptor types

/// Where a feature's template subtree is merged in the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtreeTarget {
    /// `frontend/src/`
    FrontendSrc,
    /// The backend package directory, `backend/src/<package_name>/`
    BackendPackage,
    /// The project root
    ProjectRoot,
}

/// A template subtree contributed by a feature
#[derive(Debug, Clone, Copy)]
pub struct TemplateSubtree {
    /// Path under the embedded resource root
    pub resource: &'static str,
    /// Base directory the subtree is merged into
    pub target: SubtreeTarget,
    /// Subdirectory under the target base ("" for the base itself)
    pub dest: &'static str,
}

/// Patch action the pipeline runs after a feature's subtrees and
/// dependencies are in place. Actions are an explicit static set; the
/// pipeline owns their implementation since they touch files produced
/// by earlier steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    /// No post-merge patching
    None,
    /// Splice the tailwind import and plugin entry into `vite.config.js|ts`
    TailwindViteConfig,
    /// Relocate `App.vue` to `pages/Home.vue` and wire the router into
    /// the app entry file
    RouterAppEntry,
    /// Render the CGI env file and concatenate the gateway task list
    /// into the editor task configuration
    CgiEditorTasks,
}

/// Descriptor for one feature toggle
#[derive(Debug, Clone, Copy)]
pub struct FeatureModule {
    /// Registry key, as spelled on the command line
    pub key: &'static str,
    /// Human-readable label for prompts and summaries
    pub label: &'static str,
    /// Template subtrees merged when the feature is enabled
    pub template_subtrees: &'static [TemplateSubtree],
    /// Backend runtime dependencies requested via the package manager
    pub backend_deps: &'static [&'static str],
    /// Backend development dependencies
    pub backend_dev_deps: &'static [&'static str],
    /// Frontend development dependencies
    pub frontend_dev_deps: &'static [&'static str],
    /// Variable-table entries merged before templating begins
    pub variable_contributions: &'static [(&'static str, &'static str)],
    /// Post-merge patch action
    pub patch_action: PatchAction,
}
