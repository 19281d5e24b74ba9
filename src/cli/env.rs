use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use super::output::OutputFormat;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DIRSYNC_GIT_HASH"),
    " ",
    env!("DIRSYNC_BUILD_DATE"),
    ")"
);

/// Long options that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "upload",
    "download",
    "upload-dir",
    "download-key",
    "target-dir",
    "config",
    "log-level",
    "debug",
    "output",
    "store-url",
];

/// Options whose next argument is a value, never a flag.
const VALUE_FLAGS: &[&str] = &[
    "upload-dir",
    "download-key",
    "target-dir",
    "config",
    "log-level",
    "output",
    "store-url",
];
const VALUE_SHORTS: &[&str] = &["-c", "-l", "-o"];

/// Mirror a directory tree into a Redis/Valkey keyspace and back
#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct CliArgs {
    /// Upload files from a directory to the store
    #[arg(short = 'u', long = "upload")]
    pub upload: bool,

    /// Download files from the store to a directory
    #[arg(short = 'd', long = "download")]
    pub download: bool,

    /// Directory to upload (use with -u)
    #[arg(long, value_name = "PATH", allow_hyphen_values = true)]
    pub upload_dir: Option<PathBuf>,

    /// Store key of the directory (use with -d)
    #[arg(long, value_name = "PREFIX", allow_hyphen_values = true)]
    pub download_key: Option<String>,

    /// Target directory for download (use with -d)
    #[arg(long, value_name = "PATH", allow_hyphen_values = true)]
    pub target_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Output format for the run summary
    #[arg(short, long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Store URL, overriding config file and environment
    #[arg(long, value_name = "URL")]
    pub store_url: Option<String>,
}

/// What a valid flag combination asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncMode {
    Upload { dir: PathBuf },
    Download { key: String, target: PathBuf },
}

impl CliArgs {
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Upload wins when both modes are fully specified.
    pub fn mode(&self) -> Option<SyncMode> {
        let upload_dir = self.upload_dir.as_ref().filter(|p| !p.as_os_str().is_empty());
        let download_key = self.download_key.as_ref().filter(|k| !k.is_empty());
        let target_dir = self.target_dir.as_ref().filter(|p| !p.as_os_str().is_empty());

        if self.upload {
            if let Some(dir) = upload_dir {
                return Some(SyncMode::Upload { dir: dir.clone() });
            }
        }
        if self.download {
            if let (Some(key), Some(target)) = (download_key, target_dir) {
                return Some(SyncMode::Download {
                    key: key.clone(),
                    target: target.clone(),
                });
            }
        }
        None
    }
}

/// Rewrites `-upload-dir` style arguments to `--upload-dir`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    let mut value_next = false;
    for (idx, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if idx == 0 || passthrough || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let arg = match arg.to_str().filter(|raw| is_single_dash_long(raw)) {
            Some(raw) => OsString::from(format!("-{raw}")),
            None => arg,
        };
        value_next = arg.to_str().is_some_and(takes_separate_value);
        out.push(arg);
    }
    out
}

fn takes_separate_value(arg: &str) -> bool {
    if VALUE_SHORTS.contains(&arg) {
        return true;
    }
    arg.strip_prefix("--")
        .is_some_and(|name| !name.contains('=') && VALUE_FLAGS.contains(&name))
}

fn is_single_dash_long(raw: &str) -> bool {
    let Some(rest) = raw.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut full = vec!["dirsync"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(normalize_args(full)).expect("valid arguments")
    }

    #[test]
    fn single_dash_long_flags_are_rewritten() {
        let args = normalize_args(["dirsync", "-u", "-upload-dir", "data", "-target-dir=out"]);
        assert_eq!(args, vec!["dirsync", "-u", "--upload-dir", "data", "--target-dir=out"]);
    }

    #[test]
    fn values_and_trailing_args_are_left_alone() {
        let args = normalize_args(["dirsync", "--upload-dir", "-x", "--", "-upload-dir"]);
        assert_eq!(args, vec!["dirsync", "--upload-dir", "-x", "--", "-upload-dir"]);
    }

    #[test]
    fn option_values_that_look_like_flags_are_kept() {
        let args = normalize_args([
            "dirsync",
            "-d",
            "-download-key",
            "-debug",
            "-target-dir",
            "-out",
            "-o",
            "json",
        ]);
        assert_eq!(
            args,
            vec![
                "dirsync",
                "-d",
                "--download-key",
                "-debug",
                "--target-dir",
                "-out",
                "-o",
                "json"
            ]
        );

        let args = normalize_args(["dirsync", "--download-key=-x", "-debug"]);
        assert_eq!(args, vec!["dirsync", "--download-key=-x", "--debug"]);

        let cli = parse(&["-d", "--download-key", "-debug", "-target-dir", "out"]);
        assert!(!cli.debug);
        assert_eq!(
            cli.mode(),
            Some(SyncMode::Download {
                key: "-debug".into(),
                target: PathBuf::from("out"),
            })
        );
    }

    #[test]
    fn upload_mode_from_go_style_flags() {
        let cli = parse(&["-u", "-upload-dir", "data"]);
        assert_eq!(
            cli.mode(),
            Some(SyncMode::Upload {
                dir: PathBuf::from("data")
            })
        );
    }

    #[test]
    fn download_mode_needs_key_and_target() {
        let cli = parse(&["-d", "-download-key", "data", "-target-dir", "/out"]);
        assert_eq!(
            cli.mode(),
            Some(SyncMode::Download {
                key: "data".into(),
                target: PathBuf::from("/out"),
            })
        );

        assert_eq!(parse(&["-d", "--download-key", "data"]).mode(), None);
        assert_eq!(parse(&["-d", "--target-dir", "/out"]).mode(), None);
    }

    #[test]
    fn flags_without_mode_switch_are_invalid() {
        assert_eq!(parse(&["--upload-dir", "data"]).mode(), None);
        assert_eq!(parse(&["-u"]).mode(), None);
        assert_eq!(parse(&["-u", "--upload-dir", ""]).mode(), None);
        assert_eq!(parse(&[]).mode(), None);
    }

    #[test]
    fn upload_takes_precedence_over_download() {
        let cli = parse(&[
            "-u",
            "-d",
            "--upload-dir",
            "data",
            "--download-key",
            "data",
            "--target-dir",
            "out",
        ]);
        assert!(matches!(cli.mode(), Some(SyncMode::Upload { .. })));
    }

    #[test]
    fn global_options_parse() {
        let cli = parse(&["-output", "json", "-store-url", "redis://h:1/0", "--debug"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.store_url.as_deref(), Some("redis://h:1/0"));
        assert!(cli.debug);
        assert_eq!(cli.log_level, "info");
    }
}
