//! Aggregation subsystem: payload shapes and adjacent-key folding.

pub mod aggregator;
pub mod payload;

pub use aggregator::{Aggregator, Record, Records};
pub use payload::{AnyPayload, BusinessData, Rating, RatingPayload, RecordPayload, TechnicalSpecs};
