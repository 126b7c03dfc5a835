//! # stackgen-features
//!
//! **Purpose**: Static registry of optional feature modules
//!
//! Each feature toggle a generated project may enable maps to a
//! descriptor: template subtrees to merge, extra backend/frontend
//! dependencies to request, variable contributions for the template
//! engine, and a patch action the provisioning pipeline runs against
//! already-generated files.
//!
//! Resolution validates requested keys against the known set and
//! returns descriptors in a fixed canonical order regardless of how
//! the user spelled the toggles, so dependent steps stay deterministic.

pub mod error;
pub mod module;
pub mod registry;

pub use error::{FeatureError, Result};
pub use module::{FeatureModule, PatchAction, SubtreeTarget, TemplateSubtree};
pub use registry::{known_keys, lookup, resolve};
