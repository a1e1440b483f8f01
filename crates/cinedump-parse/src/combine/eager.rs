//! Intersection of fully materialized collections.

use cinedump_core::types::collections::{FxHashMap, FxHashSet};

use super::CombinedRecord;
use crate::aggregate::Record;
use crate::key::EntityKey;

fn index<P>(records: &[Record<P>]) -> FxHashMap<&EntityKey, &P> {
    let mut map = FxHashMap::default();
    map.reserve(records.len());
    for record in records {
        map.insert(&record.key, &record.payload);
    }
    map
}

/// Join `collections` on their keys, keeping keys present in all of them.
///
/// Output follows the first collection's order, and a key repeated within
/// one collection keeps its last payload. A single collection comes back
/// record for record in tuple form, repeats included; no collections give
/// no records.
pub fn combine<P, C>(collections: &[C]) -> Vec<CombinedRecord<P>>
where
    P: Clone,
    C: AsRef<[Record<P>]>,
{
    let first = match collections {
        [] => return Vec::new(),
        [only] => {
            return only
                .as_ref()
                .iter()
                .map(|record| CombinedRecord {
                    key: record.key.clone(),
                    payloads: vec![record.payload.clone()],
                })
                .collect()
        }
        [first, ..] => first,
    };
    let indexes: Vec<FxHashMap<&EntityKey, &P>> =
        collections.iter().map(|c| index(c.as_ref())).collect();

    let mut survivors: FxHashSet<&EntityKey> = indexes[0]
        .keys()
        .copied()
        .filter(|key| indexes[1..].iter().all(|idx| idx.contains_key(key)))
        .collect();

    let mut out = Vec::with_capacity(survivors.len());
    for record in first.as_ref() {
        if !survivors.remove(&record.key) {
            continue;
        }
        let payloads = indexes
            .iter()
            .filter_map(|idx| idx.get(&record.key).map(|p| (*p).clone()))
            .collect();
        out.push(CombinedRecord {
            key: record.key.clone(),
            payloads,
        });
    }
    out
}

/// Join two collections of different payload types.
pub fn combine2<A, B>(a: &[Record<A>], b: &[Record<B>]) -> Vec<(EntityKey, A, B)>
where
    A: Clone,
    B: Clone,
{
    let index_a = index(a);
    let index_b = index(b);
    let mut emitted: FxHashSet<&EntityKey> = FxHashSet::default();

    let mut out = Vec::new();
    for record in a {
        let Some(payload_b) = index_b.get(&record.key) else {
            continue;
        };
        if !emitted.insert(&record.key) {
            continue;
        }
        if let Some(payload_a) = index_a.get(&record.key) {
            out.push((record.key.clone(), (*payload_a).clone(), (*payload_b).clone()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ReleaseYear;

    fn rec(title: &str, value: u32) -> Record<u32> {
        Record::new(EntityKey::new(title, ReleaseYear::Known(2000)), value)
    }

    #[test]
    fn test_intersection_in_first_order() {
        let a = vec![rec("C", 1), rec("A", 2), rec("B", 3)];
        let b = vec![rec("A", 20), rec("C", 10), rec("D", 40)];
        let out = combine(&[a, b]);
        let titles: Vec<_> = out.iter().map(|r| r.key.title().to_string()).collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert_eq!(out[0].payloads, vec![1, 10]);
        assert_eq!(out[1].payloads, vec![2, 20]);
    }

    #[test]
    fn test_single_collection_is_unfiltered() {
        let a = vec![rec("A", 1), rec("B", 2)];
        let out = combine(&[a.clone()]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].key, a[1].key);
        assert_eq!(out[1].payloads, vec![2]);
    }

    #[test]
    fn test_single_collection_keeps_repeated_keys() {
        let a = vec![rec("A", 1), rec("B", 2), rec("A", 3)];
        let out = combine(&[a]);
        let flat: Vec<_> = out
            .iter()
            .map(|r| (r.key.title().to_string(), r.payloads.clone()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("A".to_string(), vec![1]),
                ("B".to_string(), vec![2]),
                ("A".to_string(), vec![3]),
            ]
        );
    }

    #[test]
    fn test_no_collections() {
        let none: [Vec<Record<u32>>; 0] = [];
        assert!(combine(&none).is_empty());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let a = vec![rec("A", 1), rec("B", 2), rec("A", 3)];
        let b = vec![rec("A", 9)];
        let out = combine(&[a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payloads, vec![3, 9]);
    }

    #[test]
    fn test_combine2_mixed_types() {
        let a = vec![rec("A", 1), rec("B", 2)];
        let b = vec![Record::new(
            EntityKey::new("B", ReleaseYear::Known(2000)),
            "drama".to_string(),
        )];
        let out = combine2(&a, &b);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1, 2);
        assert_eq!(out[0].2, "drama");
    }
}
