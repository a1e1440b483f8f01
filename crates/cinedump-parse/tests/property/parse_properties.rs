use cinedump_parse::{
    combine, read_genres, EntityKey, Record, ReleaseType, ReleaseYear, StreamingCombiner,
};
use proptest::prelude::*;

const TITLES: [&str; 4] = ["Heat", "Ronin", "Alien", "Brazil"];

fn genres_dump(lines: &[(usize, u8)]) -> String {
    let mut text = String::from("THE GENRES LIST\n===============\n\n");
    for (title, value) in lines {
        text.push_str(&format!("{} (1990)\tg{}\n", TITLES[*title], value));
    }
    text
}

fn arb_key() -> impl Strategy<Value = EntityKey> {
    (
        "[A-Z][a-z]{0,8}( [A-Z][a-z]{0,8}){0,2}",
        prop_oneof![Just(ReleaseYear::Unknown), (1890u16..2030).prop_map(ReleaseYear::Known)],
        proptest::option::of(prop_oneof![Just("I"), Just("II"), Just("IV")]),
        proptest::option::of("[A-Z][a-z]{0,6}( #[1-9]\\.[1-9])?"),
        proptest::option::of(prop_oneof![
            Just(ReleaseType::Tv),
            Just(ReleaseType::Video),
            Just(ReleaseType::VideoGame)
        ]),
    )
        .prop_map(|(title, year, counter, episode, kind)| {
            let mut key = EntityKey::new(title, year);
            if let Some(counter) = counter {
                key = key.with_disambiguation(counter);
            }
            if let Some(episode) = episode {
                key = key.with_episode(episode);
            }
            if let Some(kind) = kind {
                key = key.with_release_type(kind);
            }
            key
        })
}

fn collection(ids: &[u8]) -> Vec<Record<u8>> {
    ids.iter()
        .map(|id| Record::new(EntityKey::new(format!("T{id}"), ReleaseYear::Known(2000)), *id))
        .collect()
}

proptest! {
    #[test]
    fn rendered_key_parses_back(key in arb_key()) {
        let text = format!("THE GENRES LIST\n===\n\n{key}\tDrama\n");
        let records: Vec<_> = read_genres(text.as_bytes())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].key, &key);
    }

    #[test]
    fn one_record_per_run_of_equal_keys(lines in prop::collection::vec((0usize..4, 0u8..50), 0..40)) {
        let records: Vec<_> = read_genres(genres_dump(&lines).as_bytes())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        let runs = lines.windows(2).filter(|w| w[0].0 != w[1].0).count()
            + usize::from(!lines.is_empty());
        prop_assert_eq!(records.len(), runs);

        // adjacent records never share a key
        for pair in records.windows(2) {
            prop_assert_ne!(&pair[0].key, &pair[1].key);
        }

        // values come out in input order
        let flat: Vec<String> = records.iter().flat_map(|r| r.payload.clone()).collect();
        let expected: Vec<String> = lines.iter().map(|(_, v)| format!("g{v}")).collect();
        prop_assert_eq!(flat, expected);
    }

    #[test]
    fn streaming_matches_eager(
        a in prop::collection::vec(0u8..30, 0..25),
        b in prop::collection::vec(0u8..30, 0..25),
        c in prop::collection::vec(0u8..30, 0..25),
    ) {
        let (a, b, c) = (collection(&a), collection(&b), collection(&c));
        let mut eager = combine(&[a.clone(), b.clone(), c.clone()]);
        eager.sort_by(|x, y| x.key.cmp(&y.key));

        let mut streaming = StreamingCombiner::new();
        streaming.push(a);
        streaming.push(b);
        streaming.push(c);
        prop_assert_eq!(streaming.finish(), eager);
    }

    #[test]
    fn single_collection_passes_through(ids in prop::collection::vec(0u8..10, 0..30)) {
        let records = collection(&ids);
        let eager = combine(&[records.clone()]);
        let payloads: Vec<Vec<u8>> = eager.iter().map(|r| r.payloads.clone()).collect();
        let expected: Vec<Vec<u8>> = ids.iter().map(|id| vec![*id]).collect();
        prop_assert_eq!(payloads, expected);

        let mut sorted = eager;
        sorted.sort_by(|x, y| x.key.cmp(&y.key));
        let mut streaming = StreamingCombiner::new();
        streaming.push(records);
        prop_assert_eq!(streaming.finish(), sorted);
    }

    #[test]
    fn intersection_ignores_collection_order(
        a in prop::collection::vec(0u8..30, 0..25),
        b in prop::collection::vec(0u8..30, 0..25),
    ) {
        let (a, b) = (collection(&a), collection(&b));
        let mut ab: Vec<EntityKey> = combine(&[a.clone(), b.clone()]).into_iter().map(|r| r.key).collect();
        let mut ba: Vec<EntityKey> = combine(&[b, a]).into_iter().map(|r| r.key).collect();
        ab.sort();
        ba.sort();
        prop_assert_eq!(ab, ba);
    }
}
