//! The static feature registry and its canonical application order

use tracing::debug;

use crate::{
    error::{FeatureError, Result},
    module::{FeatureModule, PatchAction, SubtreeTarget, TemplateSubtree},
};

/// All known features, in canonical application order.
///
/// The order matters: styling is spliced into the vite config before
/// the router rewrites the app entry, and the CGI gateway merges its
/// editor tasks after everything else is on disk.
static REGISTRY: &[FeatureModule] = &[
    FeatureModule {
        key: "typescript",
        label: "TypeScript",
        template_subtrees: &[],
        backend_deps: &[],
        backend_dev_deps: &[],
        frontend_dev_deps: &[],
        variable_contributions: &[],
        // Consulted by the scaffold and configure steps (template
        // variant, ts overlay, tsconfig patch) rather than patched in.
        patch_action: PatchAction::None,
    },
    FeatureModule {
        key: "tailwindcss",
        label: "TailwindCSS",
        template_subtrees: &[],
        backend_deps: &[],
        backend_dev_deps: &[],
        frontend_dev_deps: &["tailwindcss", "@tailwindcss/vite"],
        variable_contributions: &[],
        patch_action: PatchAction::TailwindViteConfig,
    },
    FeatureModule {
        key: "vue-router",
        label: "Vue Router",
        template_subtrees: &[TemplateSubtree {
            resource: "project_template/frontend/vue-router/src",
            target: SubtreeTarget::FrontendSrc,
            dest: "",
        }],
        backend_deps: &[],
        backend_dev_deps: &[],
        frontend_dev_deps: &["vue-router"],
        variable_contributions: &[],
        patch_action: PatchAction::RouterAppEntry,
    },
    FeatureModule {
        key: "plotly",
        label: "vue3-plotly",
        template_subtrees: &[TemplateSubtree {
            resource: "plotly/src",
            target: SubtreeTarget::FrontendSrc,
            dest: "",
        }],
        backend_deps: &[],
        backend_dev_deps: &[],
        frontend_dev_deps: &["vue3-plotly"],
        variable_contributions: &[],
        patch_action: PatchAction::None,
    },
    FeatureModule {
        key: "scheduler",
        label: "APScheduler",
        template_subtrees: &[TemplateSubtree {
            resource: "apscheduler/src/project_name",
            target: SubtreeTarget::BackendPackage,
            dest: "",
        }],
        backend_deps: &["apscheduler", "python-dateutil"],
        backend_dev_deps: &[],
        frontend_dev_deps: &[],
        variable_contributions: &[
            ("additional_imports", "from . import scheduler"),
            ("lifespan_init", "    scheduler.start()"),
            ("lifespan_exit", "    scheduler.stop()"),
        ],
        patch_action: PatchAction::None,
    },
    FeatureModule {
        key: "cgi",
        label: "Apache CGI gateway",
        template_subtrees: &[TemplateSubtree {
            resource: "fastapi_cgi/cgi",
            target: SubtreeTarget::ProjectRoot,
            dest: "cgi",
        }],
        backend_deps: &["a2wsgi"],
        backend_dev_deps: &[],
        frontend_dev_deps: &[],
        variable_contributions: &[],
        patch_action: PatchAction::CgiEditorTasks,
    },
];

/// Known feature keys, in canonical order
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|module| module.key)
}

/// Look up a single feature by key
pub fn lookup(key: &str) -> Option<&'static FeatureModule> {
    REGISTRY.iter().find(|module| module.key == key)
}

/// Validate `enabled` keys and return their descriptors in canonical
/// order, regardless of request order. Unknown keys are a hard error
/// naming every offending key.
pub fn resolve(enabled: &[String]) -> Result<Vec<&'static FeatureModule>> {
    let unknown: Vec<&str> = enabled
        .iter()
        .map(String::as_str)
        .filter(|key| lookup(key).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(FeatureError::UnknownFeature {
            keys: unknown.join(", "),
            known: known_keys().collect::<Vec<_>>().join(", "),
        });
    }

    let resolved: Vec<&'static FeatureModule> = REGISTRY
        .iter()
        .filter(|module| enabled.iter().any(|key| key == module.key))
        .collect();
    debug!(
        features = %resolved.iter().map(|m| m.key).collect::<Vec<_>>().join(", "),
        "Resolved feature modules"
    );
    Ok(resolved)
}
