//! # stackgen-templates
//!
//! **Purpose**: Text templating primitives for project generation
//!
//! Provides the variable table, the placeholder-substitution engine
//! (single files and recursive directory merges), and the regex-based
//! text patcher used to splice optional code into generated files.
//!
//! Placeholder tokens use the `{{:name:}}` delimiter form, chosen so
//! they cannot collide with ordinary source, markup, or JSON text.
//! Substitution is format-agnostic: template files are opaque text.
//!
//! ## Usage
//!
//! ```no_run
//! use stackgen_templates::{render_file, VarTable};
//!
//! # fn main() -> stackgen_templates::Result<()> {
//! let vars = VarTable::builder()
//!     .set("project_name", "demo-app")
//!     .build();
//! render_file("templates/README.md", "out/README.md", &vars)?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod patch;
pub mod vars;

pub use engine::{render_file, render_str, render_tree};
pub use error::{Result, TemplateError};
pub use patch::{apply_rules, apply_to_content, PatchMode, PatchRule};
pub use vars::{VarTable, VarTableBuilder};
