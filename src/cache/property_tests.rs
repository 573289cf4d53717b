//! Property-Based Tests
//!
//! Uses proptest to check the cache-aside engine, the filter/paginate
//! pipeline and word counting against simple reference models.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use proptest::prelude::*;
use serde_json::json;
use tokio_test::block_on;

use crate::analytics::WordFrequencyTable;
use crate::cache::{CacheAside, CacheBackend, MemoryStore, SqliteStore};
use crate::resources::{apply_filter, apply_pagination, Record};

// == Strategies ==
/// Generates display names from a small alphabet so filters actually match
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-cA-C ]{0,8}".prop_map(|s| s)
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(name_strategy(), 0..40).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| serde_json::from_value(json!({ "name": name, "idx": i })).unwrap())
            .collect()
    })
}

fn crawl_strategy() -> impl Strategy<Value = String> {
    "[ab \n\t]{0,30}".prop_map(|s| s)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Pagination returns exactly the [start, end) window of the input.
    #[test]
    fn prop_pagination_matches_slice(
        records in records_strategy(),
        page in 0usize..8,
        limit in 0usize..15
    ) {
        let out = apply_pagination(records.clone(), page, limit);

        let expected: Vec<Record> = if page == 0 {
            Vec::new()
        } else {
            let start = ((page - 1) * limit).min(records.len());
            let end = (page * limit).min(records.len());
            records[start..end].to_vec()
        };
        prop_assert_eq!(out, expected);
    }

    // Filtering keeps input order and only keeps matching records.
    #[test]
    fn prop_filter_is_order_preserving_subset(
        records in records_strategy(),
        needle in "[a-cA-C]{1,2}"
    ) {
        let out = apply_filter(records.clone(), Some(&needle));
        let lowered = needle.to_lowercase();

        let expected: Vec<Record> = records
            .into_iter()
            .filter(|r| r.display_name().is_some_and(|n| n.to_lowercase().contains(&lowered)))
            .collect();
        prop_assert_eq!(out, expected);
    }

    // Counts add up to the number of whitespace tokens and the sorted view
    // is non-increasing.
    #[test]
    fn prop_word_counts_cover_all_tokens(crawls in prop::collection::vec(crawl_strategy(), 0..6)) {
        let table = WordFrequencyTable::from_crawls(&crawls);
        let tokens = crawls.iter().map(|c| c.split_whitespace().count() as u64).sum::<u64>();

        let sorted = table.sorted();
        prop_assert_eq!(sorted.iter().map(|w| w.count).sum::<u64>(), tokens);
        prop_assert_eq!(sorted.len(), table.len());
        prop_assert!(sorted.windows(2).all(|w| w[0].count >= w[1].count));
    }

    // Repeated upserts of one key leave a single entry holding the last value.
    #[test]
    fn prop_upsert_keeps_last_value(values in prop::collection::vec("[a-z]{0,10}", 1..10)) {
        let store = MemoryStore::new();
        block_on(async {
            for value in &values {
                store.put("key", value, Utc::now()).await.unwrap();
            }
        });

        let entry = block_on(store.get("key")).unwrap().unwrap();
        prop_assert_eq!(&entry.value, values.last().unwrap());
        prop_assert_eq!(block_on(store.len()), 1);
    }

    // An entry of age A under TTL D is a hit iff A < D. Ages stay at least
    // two seconds away from the boundary to keep the check clock-safe.
    #[test]
    fn prop_expiry_boundary(ttl_secs in 5u64..100_000, offset in 2i64..1_000, stale in any::<bool>()) {
        let age = if stale {
            ttl_secs as i64 + offset
        } else {
            (ttl_secs as i64 - offset).max(0)
        };
        prop_assume!(stale || age + 2 <= ttl_secs as i64);

        let store = Arc::new(MemoryStore::new());
        block_on(store.put("k", "\"cached\"", Utc::now() - chrono::Duration::seconds(age))).unwrap();

        let cache = CacheAside::new(store);
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let value: String = block_on(cache.get_or_compute("k", Duration::from_secs(ttl_secs), || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>("fresh".to_string())
        }))
        .unwrap();

        if stale {
            prop_assert_eq!(value, "fresh");
            prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        } else {
            prop_assert_eq!(value, "cached");
            prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }
}

// == Concurrent Misses ==

/// Races `tasks` cache-aside calls on one key. Task `i` produces
/// `vec![i; width]`. Returns every caller's value and the final stored row.
async fn race_one_key(
    backend: Arc<dyn CacheBackend>,
    tasks: u32,
    width: usize,
) -> (Vec<Vec<u32>>, Vec<u32>, CacheAside) {
    let cache = CacheAside::new(backend.clone());

    let handles: Vec<_> = (0..tasks)
        .map(|i| {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .get_or_compute("k", Duration::from_secs(60), move || async move {
                        tokio::task::yield_now().await;
                        Ok::<_, ()>(vec![i; width])
                    })
                    .await
            })
        })
        .collect();

    let mut returned = Vec::with_capacity(handles.len());
    for handle in handles {
        returned.push(handle.await.unwrap().unwrap());
    }

    let row = backend.get("k").await.unwrap().unwrap();
    let stored: Vec<u32> = serde_json::from_str(&row.value).unwrap();
    (returned, stored, cache)
}

fn is_whole(value: &[u32], tasks: u32, width: usize) -> bool {
    value.len() == width && value.first().map_or(true, |first| *first < tasks && value.iter().all(|v| v == first))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // Concurrent callers on one key each get one producer's whole output, and
    // the surviving row is exactly one producer's output (last write wins).
    #[test]
    fn prop_concurrent_misses_store_one_whole_value(
        tasks in 2u32..48,
        width in 1usize..64,
        durable in any::<bool>()
    ) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        let backend: Arc<dyn CacheBackend> = if durable {
            Arc::new(SqliteStore::open_in_memory().unwrap())
        } else {
            Arc::new(MemoryStore::new())
        };

        let (returned, stored, cache) = rt.block_on(race_one_key(backend, tasks, width));

        prop_assert_eq!(returned.len(), tasks as usize);
        for value in &returned {
            prop_assert!(is_whole(value, tasks, width), "torn value {:?}", value);
        }
        prop_assert!(is_whole(&stored, tasks, width), "torn row {:?}", stored);

        let stats = rt.block_on(cache.stats());
        prop_assert_eq!(stats.lookups(), tasks as u64);
        prop_assert_eq!(stats.write_failures, 0);
        prop_assert_eq!(stats.invalid + stats.read_failures, 0);
    }
}
