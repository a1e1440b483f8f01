//! JSON through zstd, in both directions.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use cinedump_core::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn serde_error(path: &Path) -> impl FnOnce(serde_json::Error) -> StorageError + '_ {
    move |e| StorageError::Serialization {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Write `value` to `path`, truncating whatever is there. Returns the
/// compressed size in bytes.
pub fn write_compressed<T>(path: &Path, value: &T, level: i32) -> Result<u64, StorageError>
where
    T: Serialize + ?Sized,
{
    let file = File::create(path).map_err(io_error(path))?;
    let mut encoder =
        zstd::stream::write::Encoder::new(BufWriter::new(file), level).map_err(io_error(path))?;
    serde_json::to_writer(&mut encoder, value).map_err(serde_error(path))?;
    let mut writer = encoder.finish().map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    let file = writer.into_inner().map_err(|e| io_error(path)(e.into_error()))?;
    file.sync_all().map_err(io_error(path))?;
    Ok(file.metadata().map_err(io_error(path))?.len())
}

/// Read a value written by [`write_compressed`].
pub fn read_compressed<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let file = File::open(path).map_err(io_error(path))?;
    let decoder = zstd::stream::read::Decoder::new(BufReader::new(file)).map_err(io_error(path))?;
    serde_json::from_reader(decoder).map_err(serde_error(path))
}
