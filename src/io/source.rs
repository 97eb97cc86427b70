//! Input source selection
//!
//! Operations are read either from a file or from standard input. Both readers
//! open their source through this module so that a missing file is reported the
//! same way by every strategy.

use crate::types::AuthorizerError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// Where operation lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interpret a command-line input argument; `None` and `-` mean stdin
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }

    /// Human-readable name for log messages
    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Open the source for blocking line reads
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>, AuthorizerError> {
        match self {
            InputSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|e| open_error(path, e))?;
                Ok(Box::new(BufReader::with_capacity(8 * 1024, file)))
            }
        }
    }

    /// Open the source for async reads
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open_async(&self) -> Result<Box<dyn AsyncRead + Unpin + Send>, AuthorizerError> {
        match self {
            InputSource::Stdin => Ok(Box::new(tokio::io::stdin())),
            InputSource::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| open_error(path, e))?;
                Ok(Box::new(file))
            }
        }
    }
}

fn open_error(path: &Path, error: io::Error) -> AuthorizerError {
    if error.kind() == io::ErrorKind::NotFound {
        AuthorizerError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        AuthorizerError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}
