use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod module_manager;

use cli::{execute_command, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();
    module_store::logging::init_tracing(cli.verbose);

    // Execute the appropriate command
    execute_command(&cli)
        .await
        .with_context(|| "command execution failed")
}
