//! Command-line argument definitions

use clap::{Args, Parser, Subcommand};

/// stackgen - full-stack project skeleton generator
#[derive(Parser, Debug)]
#[command(name = "stackgen")]
#[command(bin_name = "stackgen")]
#[command(about = "Generate full-stack FastAPI + Vue3 project skeletons")]
#[command(
    long_about = "stackgen: a full-stack project skeleton generator.\n\nScaffolds a FastAPI backend (managed by uv) and a Vue3 frontend (created by vite) under one project root, wires them together, and commits the result as a tagged initial git revision.\n\nQuick start:\n  stackgen new -n demo-app -d ~/work -p 3.12 -u typescript -u vue-router"
)]
#[command(version)]
#[command(author = "Stackgen Contributors")]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new project
    #[command(about = "Create a new project; omitted values are collected interactively")]
    New(NewArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct NewArgs {
    /// Project name (letters, digits, '-' and '_')
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Existing directory the project is created under
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<String>,

    /// Target Python version, e.g. 3.12
    #[arg(short = 'p', long = "python", value_name = "VERSION")]
    pub python: Option<String>,

    /// Enable a feature module (repeatable)
    #[arg(short = 'u', long = "use", value_name = "FEATURE")]
    pub features: Vec<String>,

    /// Remove the partial project directory if a step fails
    #[arg(long)]
    pub clean_on_failure: bool,
}
