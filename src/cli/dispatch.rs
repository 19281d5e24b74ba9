use super::download::cmd_download;
use super::env::SyncMode;
use super::upload::cmd_upload;
use crate::cli::context::CliContext;
use anyhow::Result;
use dirsync_sync_core::SyncReport;

pub async fn dispatch(mode: &SyncMode, ctx: &CliContext) -> Result<SyncReport> {
    match mode {
        SyncMode::Upload { dir } => cmd_upload(dir, ctx).await,
        SyncMode::Download { key, target } => cmd_download(key, target, ctx).await,
    }
}
