//! # stackgen-pipeline
//!
//! **Purpose**: The ordered provisioning pipeline
//!
//! Takes a validated [`ProjectDescriptor`] and produces a complete
//! full-stack project skeleton: backend and frontend subprojects
//! scaffolded by external generator tools, templated files merged over
//! them, optional feature modules applied, and a git history with one
//! commit tagged `v0.0.0`.
//!
//! Steps run strictly in sequence; the first failure aborts the run
//! and is surfaced as a single error. No automatic cleanup of the
//! partial project directory happens unless the caller opted in with
//! [`Pipeline::with_clean_on_failure`].

pub mod descriptor;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod resources;
pub mod tasks;

pub use descriptor::ProjectDescriptor;
pub use error::{PipelineError, Result};
pub use fetch::{BoilerplateFetcher, HttpFetcher, NODE_GITIGNORE_URL, PYTHON_GITIGNORE_URL};
pub use pipeline::Pipeline;
pub use resources::ResourceTree;
