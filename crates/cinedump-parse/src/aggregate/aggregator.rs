//! Folding adjacent raw matches of one entity into a record.

use cinedump_core::errors::ParseError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::payload::{AnyPayload, RecordPayload};
use crate::extract::{Extractor, RawMatch};
use crate::key::EntityKey;

/// One entity and everything its lines carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<P> {
    pub key: EntityKey,
    pub payload: P,
}

impl<P> Record<P> {
    pub fn new(key: EntityKey, payload: P) -> Self {
        Self { key, payload }
    }

    pub fn into_any(self) -> Record<AnyPayload>
    where
        P: Into<AnyPayload>,
    {
        Record {
            key: self.key,
            payload: self.payload.into(),
        }
    }
}

/// Groups consecutive raw matches with equal keys.
///
/// Only the immediately preceding group is compared: an entity whose lines
/// are interrupted by another entity yields two records. The open group is
/// flushed when input ends. On error the open group is abandoned, the error
/// is yielded, and nothing follows it.
pub struct Aggregator<I, P> {
    inner: I,
    open: Option<Record<P>>,
    done: bool,
    emitted: usize,
}

/// Records of one list read from `R`.
pub type Records<R, P> = Aggregator<Extractor<R>, P>;

impl<I, P> Aggregator<I, P>
where
    I: Iterator<Item = Result<RawMatch, ParseError>>,
    P: RecordPayload,
{
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            open: None,
            done: false,
            emitted: 0,
        }
    }

    /// Fold `raw` into the open group, or open a new one and hand back the
    /// group it replaces.
    fn fold(&mut self, raw: RawMatch) -> Result<Option<Record<P>>, ParseError> {
        let key = EntityKey::from_fields(&raw.key, raw.line_no)?;
        if let Some(open) = self.open.as_mut() {
            if open.key == key {
                open.payload.absorb(&raw.values, raw.line_no)?;
                return Ok(None);
            }
        }
        let payload = P::from_values(&raw.values, raw.line_no)?;
        Ok(self.open.replace(Record::new(key, payload)))
    }

    fn fail(&mut self, error: ParseError) -> Option<Result<Record<P>, ParseError>> {
        self.done = true;
        if let Some(open) = self.open.take() {
            warn!(entity = %open.key, error = %error, "abandoning in-flight record");
        }
        Some(Err(error))
    }

    fn emit(&mut self, record: Record<P>) -> Option<Result<Record<P>, ParseError>> {
        self.emitted += 1;
        Some(Ok(record))
    }
}

impl<I, P> Iterator for Aggregator<I, P>
where
    I: Iterator<Item = Result<RawMatch, ParseError>>,
    P: RecordPayload,
{
    type Item = Result<Record<P>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.next() {
                Some(Ok(raw)) => match self.fold(raw) {
                    Ok(Some(finished)) => return self.emit(finished),
                    Ok(None) => {}
                    Err(e) => return self.fail(e),
                },
                Some(Err(e)) => return self.fail(e),
                None => {
                    self.done = true;
                    let last = self.open.take()?;
                    let out = self.emit(last);
                    info!(records = self.emitted, "finished aggregating");
                    return out;
                }
            }
        }
    }
}
