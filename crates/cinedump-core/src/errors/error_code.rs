//! CinedumpErrorCode trait for stable, greppable error output.

/// Every error enum implements this to provide a structured error code
/// string, printed by the CLI ahead of the message.
pub trait CinedumpErrorCode {
    /// Returns the error code string (e.g., "MALFORMED_LINE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SECTION_NOT_FOUND: &str = "SECTION_NOT_FOUND";
pub const MALFORMED_LINE: &str = "MALFORMED_LINE";
pub const UNKNOWN_SUB_KEY: &str = "UNKNOWN_SUB_KEY";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const DIRECTORY_MISSING: &str = "DIRECTORY_MISSING";
pub const FILE_MISSING: &str = "FILE_MISSING";
pub const FILE_ALREADY_EXISTS: &str = "FILE_ALREADY_EXISTS";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNKNOWN_FORMAT: &str = "UNKNOWN_FORMAT";
