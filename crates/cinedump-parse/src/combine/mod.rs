//! Key intersection across collections.
//!
//! `combine` works on materialized collections; `StreamingCombiner` consumes
//! one collection at a time and only keeps keys seen in every collection so
//! far. A single collection passes through unfiltered, repeated keys included.
//! With two or more collections, a key repeated within one collection keeps
//! its last payload.

pub mod eager;
pub mod streaming;

use serde::{Deserialize, Serialize};

use crate::key::EntityKey;

pub use eager::{combine, combine2};
pub use streaming::StreamingCombiner;

/// A key present in every combined collection, with one payload per
/// collection in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord<P> {
    pub key: EntityKey,
    pub payloads: Vec<P>,
}
