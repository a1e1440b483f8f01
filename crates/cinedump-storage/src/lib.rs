//! cinedump-storage: saved record collections.
//!
//! A collection is serialized as JSON and compressed with zstd into
//! `<dir>/<name>.json.zst`. The store never creates its directory.

pub mod archive;
pub mod codec;

pub use archive::ArchiveStore;
