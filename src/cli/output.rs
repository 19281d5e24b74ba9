use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use dirsync_sync_core::{SyncDirection, SyncReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

pub fn render_report(report: &SyncReport, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Human => render_human(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Yaml => serde_yaml::to_string(report)?.trim_end().to_string(),
    };
    Ok(rendered)
}

fn render_human(report: &SyncReport) -> String {
    let elapsed = humantime::format_duration(Duration::from_millis(report.elapsed_ms));
    match report.direction {
        SyncDirection::Upload => format!(
            "Uploaded {} file(s), {} byte(s) from '{}' to namespace '{}' in {}",
            report.files,
            report.bytes,
            report.local_path.display(),
            report.namespace,
            elapsed
        ),
        SyncDirection::Download => format!(
            "Downloaded {} file(s), {} byte(s) from namespace '{}' to '{}' in {}",
            report.files,
            report.bytes,
            report.namespace,
            report.local_path.display(),
            elapsed
        ),
    }
}
