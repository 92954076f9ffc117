//! Removal of log files written by `--log-dir`.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::terminal::print;

const LOG_FILE_PREFIX: &str = "logfile_";
const LOG_FILE_SUFFIX: &str = ".log";

#[derive(Debug, Default)]
pub struct Cleanup {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

pub fn clear_logs(dir: &Path, assume_yes: bool) -> anyhow::Result<()> {
    if !assume_yes && !confirm(dir, io::stdin().lock())? {
        info!("Nothing was deleted");
        return Ok(());
    }

    let cleanup: Cleanup = remove_log_files(dir)?;

    print::header("deleted log files");
    print::path_list(&cleanup.deleted);

    if !cleanup.failed.is_empty() {
        print::header("not deleted due to errors");
        print::path_list(&cleanup.failed);
    }
    Ok(())
}

/// Deletes every `logfile_*.log` directly inside `dir`.
///
/// Other files are left alone. Files that cannot be removed are collected in
/// [`Cleanup::failed`] instead of aborting the sweep.
pub fn remove_log_files(dir: &Path) -> io::Result<Cleanup> {
    let mut cleanup = Cleanup::default();

    for entry in fs::read_dir(dir)? {
        let path: PathBuf = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_log_file_name);

        if !is_log || !path.is_file() {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => cleanup.deleted.push(path),
            Err(e) => {
                warn!("Failed to delete {}: {e}", path.display());
                cleanup.failed.push(path);
            }
        }
    }

    cleanup.deleted.sort();
    cleanup.failed.sort();
    Ok(cleanup)
}

pub fn is_log_file_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

fn confirm(dir: &Path, mut input: impl BufRead) -> io::Result<bool> {
    print!(
        "Is this the correct directory to delete the logs in: {}? (y/n) ",
        dir.display()
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim_start().to_ascii_lowercase().starts_with('y'))
}
