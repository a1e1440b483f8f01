//! Parse errors. Every variant is terminal for the extraction that raised it.

use super::error_code::{self, CinedumpErrorCode};

/// Errors that can occur while extracting records from a list dump.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Section marker {marker:?} not found")]
    SectionNotFound { marker: String },

    #[error("Malformed line {line_no}: {line:?}")]
    MalformedLine { line_no: usize, line: String },

    #[error("Unknown sub-key {tag:?} on line {line_no}")]
    UnknownSubKey { tag: String, line_no: usize },

    #[error("Invalid {field} {value:?} on line {line_no}")]
    InvalidField {
        field: &'static str,
        value: String,
        line_no: usize,
    },

    #[error("Unknown list format: {name}")]
    UnknownFormat { name: String },

    #[error("IO error reading list: {0}")]
    Io(#[from] std::io::Error),
}

impl CinedumpErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SectionNotFound { .. } => error_code::SECTION_NOT_FOUND,
            Self::MalformedLine { .. } => error_code::MALFORMED_LINE,
            Self::UnknownSubKey { .. } => error_code::UNKNOWN_SUB_KEY,
            Self::InvalidField { .. } => error_code::PARSE_ERROR,
            Self::UnknownFormat { .. } => error_code::UNKNOWN_FORMAT,
            Self::Io(_) => error_code::IO_ERROR,
        }
    }
}
