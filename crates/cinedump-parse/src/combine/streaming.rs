//! Intersection that holds one running key set instead of every collection.

use std::convert::Infallible;

use cinedump_core::types::collections::FxHashMap;
use tracing::{debug, warn};

use super::CombinedRecord;
use crate::aggregate::Record;
use crate::key::EntityKey;

/// Running state: nothing yet, the first collection as pushed, or the
/// intersection of two or more collections.
enum Running<P> {
    Empty,
    Single(Vec<Record<P>>),
    Joined(FxHashMap<EntityKey, Vec<P>>),
}

/// Consumes collections one at a time, keeping only keys present in every
/// collection pushed so far.
///
/// Peak memory is the size of the first collection plus the running
/// intersection, so pushing the smallest collection first keeps it lowest.
/// Results come out ordered by key. With a single collection pushed, every
/// record comes back, repeated keys included; once a second collection
/// arrives, a key repeated within one collection keeps its last payload.
pub struct StreamingCombiner<P> {
    running: Running<P>,
    sources: usize,
    peak: usize,
}

impl<P> Default for StreamingCombiner<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> StreamingCombiner<P> {
    pub fn new() -> Self {
        Self {
            running: Running::Empty,
            sources: 0,
            peak: 0,
        }
    }

    /// Number of collections pushed.
    pub fn sources(&self) -> usize {
        self.sources
    }

    /// Records held for the next push: the whole first collection, then the
    /// keys that survived every collection so far.
    pub fn len(&self) -> usize {
        match &self.running {
            Running::Empty => 0,
            Running::Single(records) => records.len(),
            Running::Joined(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest number of entries held at once.
    pub fn peak_len(&self) -> usize {
        self.peak
    }

    /// Intersect the running set with `collection`.
    pub fn push<I>(&mut self, collection: I)
    where
        I: IntoIterator<Item = Record<P>>,
    {
        let result: Result<(), Infallible> = self.try_push(collection.into_iter().map(Ok));
        if let Err(never) = result {
            match never {}
        }
    }

    /// Intersect the running set with a fallible collection, such as a
    /// reader that has not been drained yet.
    ///
    /// On error the running set is cleared: the failed collection's keys
    /// are unknown, so nothing can be said to be in it.
    pub fn try_push<I, E>(&mut self, collection: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<Record<P>, E>>,
    {
        let outcome = match std::mem::replace(&mut self.running, Running::Empty) {
            Running::Empty => collection
                .into_iter()
                .collect::<Result<Vec<_>, E>>()
                .map(Running::Single),
            Running::Single(first) => {
                Self::narrow(Self::index(first), collection).map(Running::Joined)
            }
            Running::Joined(prev) => Self::narrow(prev, collection).map(Running::Joined),
        };
        self.sources += 1;
        match outcome {
            Ok(next) => {
                self.running = next;
                self.peak = self.peak.max(self.len());
                debug!(source = self.sources, held = self.len(), "intersected collection");
                Ok(())
            }
            Err(e) => {
                warn!(source = self.sources, "collection failed, discarding running set");
                self.running = Running::Joined(FxHashMap::default());
                Err(e)
            }
        }
    }

    fn index(records: Vec<Record<P>>) -> FxHashMap<EntityKey, Vec<P>> {
        let mut map = FxHashMap::default();
        map.reserve(records.len());
        for Record { key, payload } in records {
            map.insert(key, vec![payload]);
        }
        map
    }

    fn narrow<I, E>(
        mut prev: FxHashMap<EntityKey, Vec<P>>,
        collection: I,
    ) -> Result<FxHashMap<EntityKey, Vec<P>>, E>
    where
        I: IntoIterator<Item = Result<Record<P>, E>>,
    {
        let mut next: FxHashMap<EntityKey, Vec<P>> = FxHashMap::default();
        for record in collection {
            let Record { key, payload } = record?;
            if let Some(mut payloads) = prev.remove(&key) {
                payloads.push(payload);
                next.insert(key, payloads);
            } else if let Some(slot) = next.get_mut(&key).and_then(|p| p.last_mut()) {
                *slot = payload;
            }
        }
        Ok(next)
    }

    /// The surviving keys with their payloads, ordered by key.
    pub fn finish(self) -> Vec<CombinedRecord<P>> {
        let mut out: Vec<CombinedRecord<P>> = match self.running {
            Running::Empty => Vec::new(),
            Running::Single(records) => records
                .into_iter()
                .map(|Record { key, payload }| CombinedRecord {
                    key,
                    payloads: vec![payload],
                })
                .collect(),
            Running::Joined(map) => map
                .into_iter()
                .map(|(key, payloads)| CombinedRecord { key, payloads })
                .collect(),
        };
        // stable: repeated keys of a single collection keep their order
        out.sort_by(|a, b| a.key.cmp(&b.key));
        out
    }
}
