//! # stackgen-process
//!
//! **Purpose**: Synchronous-semantics invocation of external tools
//!
//! The provisioning pipeline treats generator tools and package
//! managers as black-box commands with an exit-code contract. This
//! crate provides that contract behind the [`ToolRunner`] trait so
//! tests can substitute a fake runner, plus `PATH` lookups for
//! prerequisite checks.
//!
//! ## Usage
//!
//! ```no_run
//! use stackgen_process::{ProcessConfig, SystemToolRunner, ToolRunner};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = SystemToolRunner;
//! let config = ProcessConfig::new("npm").args(&["--version"]);
//! let output = runner.run_checked(config).await?;
//! println!("npm {}", output.stdout.trim());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod lookup;
pub mod runner;

pub use config::ProcessConfig;
pub use error::{ProcessError, Result};
pub use lookup::{is_installed, require};
pub use runner::{SystemToolRunner, ToolOutput, ToolRunner};
