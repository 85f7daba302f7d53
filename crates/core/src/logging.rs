//! Process-wide `tracing` setup shared by the language server and the CLI.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_SUBDIR: &str = ".buildscope/logs";
const DEFAULT_FILTER: &str = "info";

/// Directory holding the rolling log files, under `$HOME` when it is set.
pub fn log_dir() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    log_dir_under(&home)
}

fn log_dir_under(home: &Path) -> PathBuf {
    home.join(LOG_SUBDIR)
}

/// Install the global subscriber: a daily `<component>.<date>` file in
/// [`log_dir`], plus colored stderr output when `to_stderr` is set. `RUST_LOG`
/// overrides the `info` default.
///
/// Buffered file output is flushed when the returned guard drops. Only the
/// first call in a process installs anything.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("cannot create log directory {}: {}", dir.display(), e);
    }

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, component));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let to_file = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);

    let stderr = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(to_file)
        .with(stderr)
        .try_init();

    guard
}
