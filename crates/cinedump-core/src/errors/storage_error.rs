//! Storage errors for saved collections.

use std::path::PathBuf;

use super::error_code::{self, CinedumpErrorCode};

/// Errors raised by the archive store. Existence checks run before any
/// file is created or read.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Directory does not exist: {path}")]
    DirectoryMissing { path: PathBuf },

    #[error("Archive does not exist: {path}")]
    FileMissing { path: PathBuf },

    #[error("Archive already exists: {path}")]
    FileAlreadyExists { path: PathBuf },

    #[error("Invalid archive name: {name:?}")]
    InvalidName { name: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error on {path}: {message}")]
    Serialization { path: PathBuf, message: String },
}

impl CinedumpErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DirectoryMissing { .. } => error_code::DIRECTORY_MISSING,
            Self::FileMissing { .. } => error_code::FILE_MISSING,
            Self::FileAlreadyExists { .. } => error_code::FILE_ALREADY_EXISTS,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
