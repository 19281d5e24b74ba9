use std::path::Path;

use anyhow::{Context, Result};
use dirsync_sync_core::{SyncReport, Uploader};

use crate::cli::context::CliContext;

pub async fn cmd_upload(dir: &Path, ctx: &CliContext) -> Result<SyncReport> {
    let store = ctx.store().await?;
    Uploader::new(store)
        .upload_dir(dir)
        .await
        .context("Upload failed")
}
