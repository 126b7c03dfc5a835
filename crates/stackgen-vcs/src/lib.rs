//! # stackgen-vcs
//!
//! **Purpose**: Version-control initialization for generated projects
//!
//! Wraps git2 to give the provisioning pipeline the one sequence it
//! needs: init a repository with `main` as the initial branch, stage
//! everything, create the initial commit, and tag it.

pub mod error;
pub mod repository;

pub use error::{Result, VcsError};
pub use repository::{ProjectRepository, DEFAULT_BRANCH};
