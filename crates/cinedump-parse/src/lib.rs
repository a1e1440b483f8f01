//! cinedump-parse: structured records from movie metadata list dumps.
//!
//! - Key: `EntityKey`, the identity shared by every list
//! - Catalog: per-list marker, header skip, line layout
//! - Extract: section scanning, per-line matching, boundary detection
//! - Aggregate: folding adjacent lines of one entity into a record
//! - Combine: key intersection across collections, eager and streaming
//! - Readers: typed entry points per list
//!
//! Every reader is a forward-only iterator over a single pass of its input;
//! reading the same list again means opening the source again.

pub mod aggregate;
pub mod catalog;
pub mod combine;
pub mod extract;
pub mod key;
pub mod readers;

pub use aggregate::{
    AnyPayload, BusinessData, Rating, RatingPayload, Record, RecordPayload, Records,
    TechnicalSpecs,
};
pub use catalog::{FormatKind, FormatSpec, Layout};
pub use combine::{combine, combine2, CombinedRecord, StreamingCombiner};
pub use extract::{Extractor, LineMatcher, RawMatch};
pub use key::{EntityKey, ReleaseType, ReleaseYear};
pub use readers::*;
