//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for the trailing value fields of one line (one or two in practice).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
