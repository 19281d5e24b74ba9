use std::process::ExitCode;

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dirsync_cli::cli::app::run().await
}
