//! Extraction subsystem: section scanning, line matching, per-line outcomes.
//!
//! The scanner positions a stream at the first data line of a section, the
//! matcher applies a format's grammar to one line, and the extractor ties
//! both together into a lazy sequence of raw matches.

pub mod extractor;
pub mod matcher;
pub mod scanner;

pub use extractor::{Extractor, LineOutcome, RawMatch};
pub use matcher::{LineFields, LineMatcher};
pub use scanner::{seek_section, LineSource};
