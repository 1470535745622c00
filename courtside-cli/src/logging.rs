//! Log setup: `timestamp - LEVEL - message` lines to stderr, mirrored into a
//! log file with ANSI colour codes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::CliError;

/// Writes everything to stderr and, if set, a plain-text copy to a file.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Default log file for a run started now: `courtside_<YYYY-MM-DD_HH-MM-SS>.log`.
pub(crate) fn default_log_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "courtside_{}.log",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    ))
}

/// Install the global logger. `RUST_LOG` overrides the level flags.
pub(crate) fn init(quiet: bool, verbose: bool, file: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let file = match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Some(File::create(path)?)
        }
        None => None,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
