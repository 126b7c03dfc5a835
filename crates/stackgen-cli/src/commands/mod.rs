//! Command handlers for the stackgen CLI

pub mod new;

pub use new::NewCommand;
