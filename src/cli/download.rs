use std::path::Path;

use anyhow::{Context, Result};
use dirsync_sync_core::{Downloader, SyncReport};

use crate::cli::context::CliContext;

pub async fn cmd_download(key: &str, target: &Path, ctx: &CliContext) -> Result<SyncReport> {
    let store = ctx.store().await?;
    Downloader::new(store)
        .download(key, target)
        .await
        .context("Download failed")
}
