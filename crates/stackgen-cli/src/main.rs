// stackgen CLI entry point

use clap::Parser;
use stackgen_cli::{logging, output, Cli, Outcome};

#[tokio::main]
async fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    match stackgen_cli::run(cli).await {
        Ok(Outcome::Completed(path)) => {
            output::print_success(&format!("Project created: {}", path.display()));
        }
        Ok(Outcome::Cancelled) => {
            output::print_info("Cancelled, nothing was created.");
        }
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
