use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-file failure while building a tag. Caught at the batch boundary.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("file size ({size}) greater than max_file_size ({max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{}", strerror(.source))]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TagError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::FileTooLarge { path, .. } => path,
            Self::FileUnavailable { path, .. } => path,
        }
    }
}

/// OS error text without the ` (os error N)` suffix std appends.
fn strerror(err: &io::Error) -> String {
    let text = err.to_string();
    match (err.raw_os_error(), text.rfind(" (os error ")) {
        (Some(_), Some(idx)) => text[..idx].to_string(),
        _ => text,
    }
}
