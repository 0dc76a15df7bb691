mod build;
mod consts;
mod logging;
mod preview;
mod server_utils;

use std::path::PathBuf;
use std::process::ExitCode;

use build::{BuildArgs, start_build};
use clap::{Parser, Subcommand};
use logging::init_logging;
use preview::start_preview_web_server;
use tracing::error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Silence all log output
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site
    Build(BuildArgs),
    /// Serve a built site locally
    Preview {
        /// Directory of the built site
        #[arg(long, default_value = "dist")]
        dir: PathBuf,
        /// Expose the server to the local network
        #[arg(long)]
        host: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.quiet {
        safari::init_logging();
        init_logging();
    }

    match &cli.command {
        Commands::Build(args) => match start_build(args).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                error!(name: "build", "{}", err);
                ExitCode::FAILURE
            }
        },
        Commands::Preview { dir, host } => {
            if !dir.exists() {
                error!(
                    name: "server",
                    "The {} directory does not exist. Please run `safari build` first.",
                    dir.display()
                );
                return ExitCode::FAILURE;
            }

            match start_preview_web_server(dir.clone(), *host).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!(name: "server", "Preview server failed: {}", err);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
