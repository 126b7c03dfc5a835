//! Create a new full-stack project

use std::io::{self, Write};
use std::path::PathBuf;

use stackgen_pipeline::descriptor::{
    valid_parent_dir, valid_project_name, valid_python_version,
};
use stackgen_pipeline::{Pipeline, ProjectDescriptor};
use stackgen_process::{require, ProcessConfig, SystemToolRunner, ToolRunner};

use crate::{
    cli::NewArgs,
    error::{CliError, CliResult},
    output::OutputStyle,
    Outcome,
};

/// Version offered when the user does not enter one
const DEFAULT_PYTHON_VERSION: &str = "3.11";

/// Tools that must be on the search path before anything runs
const REQUIRED_TOOLS: &[&str] = &["uv", "npm"];

/// Create a new project from flags, prompting for anything omitted
pub struct NewCommand {
    args: NewArgs,
}

impl NewCommand {
    pub fn new(args: NewArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self) -> CliResult<Outcome> {
        let style = OutputStyle::default();
        self.check_prerequisites(&style).await?;

        let mut prompted = false;

        let name = match &self.args.name {
            Some(name) if valid_project_name(name) => name.clone(),
            Some(name) => {
                return Err(CliError::InvalidArgument {
                    message: format!(
                        "Invalid project name '{}': only a-z, A-Z, 0-9, '_' and '-' are allowed",
                        name
                    ),
                })
            }
            None => {
                prompted = true;
                self.prompt_project_name(&style)?
            }
        };

        let dir = match &self.args.dir {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                if !valid_parent_dir(&dir) {
                    return Err(CliError::InvalidArgument {
                        message: format!("Parent directory does not exist: {}", dir.display()),
                    });
                }
                dir.canonicalize()?
            }
            None => {
                prompted = true;
                self.prompt_parent_dir(&style)?
            }
        };

        // Fail before the remaining prompts when the target is taken.
        let project_dir = dir.join(&name);
        if project_dir.exists() {
            return Err(CliError::InvalidArgument {
                message: format!(
                    "Project directory already exists: {}",
                    project_dir.display()
                ),
            });
        }

        let python = match &self.args.python {
            Some(version) if valid_python_version(version) => version.clone(),
            Some(version) => {
                return Err(CliError::InvalidArgument {
                    message: format!(
                        "Invalid Python version '{}': expected a dotted-numeric form like 3.12",
                        version
                    ),
                })
            }
            None => {
                prompted = true;
                self.prompt_python_version(&style)?
            }
        };

        let features = if self.args.features.is_empty() {
            prompted = true;
            self.prompt_features(&style)?
        } else {
            for key in &self.args.features {
                if stackgen_features::lookup(key).is_none() {
                    return Err(CliError::InvalidArgument {
                        message: format!(
                            "Unknown feature '{}'. Known features: {}",
                            key,
                            stackgen_features::known_keys()
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    });
                }
            }
            self.args.features.clone()
        };

        self.print_summary(&style, &name, &dir, &python, &features);
        if prompted
            && !self.prompt_yes_no(&style, "Create the project with these settings?")?
        {
            return Ok(Outcome::Cancelled);
        }

        let descriptor = ProjectDescriptor::new(name, dir, python, features);
        let pipeline =
            Pipeline::new(descriptor).with_clean_on_failure(self.args.clean_on_failure);
        let project_dir = pipeline.run().await?;
        Ok(Outcome::Completed(project_dir))
    }

    /// Verify prerequisite tools and echo their versions
    async fn check_prerequisites(&self, style: &OutputStyle) -> CliResult<()> {
        let runner = SystemToolRunner;
        for tool in REQUIRED_TOOLS {
            require(tool)?;
            let output = runner
                .run_checked(ProcessConfig::new(*tool).args(&["--version"]))
                .await?;
            println!(
                "{}",
                style.info(&format!("{} version: {}", tool, output.stdout.trim()))
            );
        }
        Ok(())
    }

    fn print_summary(
        &self,
        style: &OutputStyle,
        name: &str,
        dir: &std::path::Path,
        python: &str,
        features: &[String],
    ) {
        println!("{}", style.section("Settings"));
        println!("{}", style.key_value("Project name", name));
        println!(
            "{}",
            style.key_value("Parent directory", &dir.display().to_string())
        );
        println!("{}", style.key_value("Python version", python));
        for key in stackgen_features::known_keys() {
            let Some(module) = stackgen_features::lookup(key) else {
                continue;
            };
            let state = if features.iter().any(|f| f == key) {
                "enabled"
            } else {
                "disabled"
            };
            println!("{}", style.key_value(module.label, state));
        }
        println!();
    }

    /// Prompt user for input
    fn prompt(&self, style: &OutputStyle, question: &str) -> CliResult<String> {
        print!("{}", style.prompt(question));
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Prompt user for yes/no
    fn prompt_yes_no(&self, style: &OutputStyle, question: &str) -> CliResult<bool> {
        loop {
            let response = self.prompt(style, &format!("{} (y/n):", question))?;
            match response.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please enter 'y' or 'n'"),
            }
        }
    }

    fn prompt_project_name(&self, style: &OutputStyle) -> CliResult<String> {
        loop {
            let value = self.prompt(style, "Project name:")?;
            if valid_project_name(&value) {
                return Ok(value);
            }
            println!(
                "{}",
                style.warning("Only a-z, A-Z, 0-9, '_' and '-' are allowed")
            );
        }
    }

    fn prompt_parent_dir(&self, style: &OutputStyle) -> CliResult<PathBuf> {
        let cwd = std::env::current_dir()?;
        loop {
            let value = self.prompt(
                style,
                &format!("Parent directory [{}]:", cwd.display()),
            )?;
            let dir = if value.is_empty() {
                cwd.clone()
            } else {
                PathBuf::from(value)
            };
            if valid_parent_dir(&dir) {
                return Ok(dir.canonicalize()?);
            }
            println!("{}", style.warning("Enter an existing directory"));
        }
    }

    fn prompt_python_version(&self, style: &OutputStyle) -> CliResult<String> {
        loop {
            let value = self.prompt(
                style,
                &format!("Python version [{}]:", DEFAULT_PYTHON_VERSION),
            )?;
            if value.is_empty() {
                return Ok(DEFAULT_PYTHON_VERSION.to_string());
            }
            if valid_python_version(&value) {
                return Ok(value);
            }
            println!(
                "{}",
                style.warning("Enter a dotted-numeric version like 3.12")
            );
        }
    }

    /// Ask about each known feature in turn; empty input means no
    fn prompt_features(&self, style: &OutputStyle) -> CliResult<Vec<String>> {
        let mut selected = Vec::new();
        for key in stackgen_features::known_keys() {
            let Some(module) = stackgen_features::lookup(key) else {
                continue;
            };
            loop {
                let response =
                    self.prompt(style, &format!("Use {}? (y/N):", module.label))?;
                match response.to_lowercase().as_str() {
                    "y" | "yes" => {
                        selected.push(key.to_string());
                        break;
                    }
                    "" | "n" | "no" => break,
                    _ => println!("Please enter 'y' or 'n'"),
                }
            }
        }
        Ok(selected)
    }
}
