//! Property tests for dimension key invariants.

use std::collections::HashSet;

use hiring_model::{ApplicationRecord, SourceColumn};
use hiring_transform::{build_date_dimension, build_text_dimension};
use proptest::prelude::*;

fn country_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "Brazil", "Colombia", "Ecuador", "Peru", "Chile", " ",
    ]))
    .prop_map(|value| value.map(str::to_string))
}

fn date_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of((2018i32..2023, 1u32..13, 1u32..29, any::<bool>()).prop_map(
        |(y, m, d, padded)| {
            if padded {
                format!("{y}-{m:02}-{d:02}")
            } else {
                format!("{y}-{m}-{d}")
            }
        },
    ))
}

proptest! {
    #[test]
    fn text_keys_are_dense_and_values_distinct(countries in prop::collection::vec(country_strategy(), 0..60)) {
        let records: Vec<ApplicationRecord> = countries
            .iter()
            .map(|country| ApplicationRecord { country: country.clone(), ..ApplicationRecord::default() })
            .collect();
        let dimension = build_text_dimension(&records, SourceColumn::Country);

        let keys: Vec<u32> = dimension.entries().map(|e| e.key.get()).collect();
        let expected: Vec<u32> = (1..=dimension.len() as u32).collect();
        prop_assert_eq!(keys, expected);

        let values: HashSet<&String> = dimension.entries().map(|e| e.value).collect();
        prop_assert_eq!(values.len(), dimension.len());

        for country in countries.iter().flatten() {
            let trimmed = country.trim();
            if !trimmed.is_empty() {
                prop_assert!(dimension.lookup(trimmed).is_some());
            }
        }
    }

    #[test]
    fn date_keys_are_dense_and_dates_distinct(dates in prop::collection::vec(date_strategy(), 0..60)) {
        let records: Vec<ApplicationRecord> = dates
            .iter()
            .map(|date| ApplicationRecord { application_date: date.clone(), ..ApplicationRecord::default() })
            .collect();
        let dimension = build_date_dimension(&records);

        let keys: Vec<u32> = dimension.entries().map(|e| e.key.get()).collect();
        let expected: Vec<u32> = (1..=dimension.len() as u32).collect();
        prop_assert_eq!(keys, expected);

        let distinct: HashSet<_> = dimension.entries().map(|e| *e.value).collect();
        prop_assert_eq!(distinct.len(), dimension.len());
    }
}
