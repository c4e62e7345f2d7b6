//! Where sentimento keeps its files: `<config base>/.sentimento/` holds the
//! config, the corpus snapshot and a `logs/` folder.
//!
//! The base is the platform config directory unless `SENTIMENTO_CONFIG_HOME`
//! names another one.

use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

pub const APP_DIR_NAME: &str = ".sentimento";
pub const CONFIG_HOME_ENV: &str = "SENTIMENTO_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("Could not determine a config directory for sentimento")]
    NoBaseDir,
    #[error("Could not create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.sentimento` directory, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// `logs/` under [`app_root_dir`], created on first use.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

fn config_base_dir() -> Option<PathBuf> {
    scoped_base()
        .or_else(|| {
            std::env::var_os(CONFIG_HOME_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

#[cfg(test)]
fn scoped_base() -> Option<PathBuf> {
    test_base::current()
}

#[cfg(not(test))]
fn scoped_base() -> Option<PathBuf> {
    None
}

/// Per-thread base directory for unit tests, so they never touch the real
/// config folder or race on the process environment.
#[cfg(test)]
mod test_base {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    thread_local! {
        static BASE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
    }

    pub(super) fn current() -> Option<PathBuf> {
        BASE.with(|base| base.borrow().clone())
    }

    pub(super) struct Scoped;

    impl Scoped {
        pub(super) fn new(path: &Path) -> Self {
            BASE.with(|base| *base.borrow_mut() = Some(path.to_path_buf()));
            Self
        }
    }

    impl Drop for Scoped {
        fn drop(&mut self) {
            BASE.with(|base| *base.borrow_mut() = None);
        }
    }
}
