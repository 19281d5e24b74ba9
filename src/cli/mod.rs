pub mod app;
pub mod context;
pub mod dispatch;
pub mod download;
pub mod env;
pub mod output;
pub mod runtime;
pub mod upload;

pub use app::run;
pub use env::{CliArgs, SyncMode};
pub use output::OutputFormat;
