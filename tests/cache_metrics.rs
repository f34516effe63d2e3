use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use blogdesk::cache::{
    CacheConfig, CacheKey, CacheLookup, Cacheable, MutationKind, QueryCache, ResourceKind,
};
use blogdesk_api_types::Tag;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use time::OffsetDateTime;

fn tags(name: &str) -> Vec<Tag> {
    vec![Tag {
        id: 1,
        name: name.to_string(),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
        post_count: 0,
    }]
}

#[test]
fn cache_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");
    blogdesk::infra::telemetry::describe_metrics();

    let config = CacheConfig {
        list_limit: 1,
        ..Default::default()
    };
    let cache = Arc::new(QueryCache::new(&config));
    let tags_key = CacheKey::list(ResourceKind::Tags, &());
    let categories_key = CacheKey::list(ResourceKind::Categories, &());

    // miss, then hit
    assert_eq!(cache.lookup::<Vec<Tag>>(&tags_key), CacheLookup::Missing);
    assert!(cache.begin(&tags_key).resolve(Ok(tags("rust").into_cached())));
    assert!(matches!(
        cache.lookup::<Vec<Tag>>(&tags_key),
        CacheLookup::Fresh(_)
    ));

    // a second list entry pushes the first one out
    let pending = cache.begin(&categories_key);
    drop(pending);
    assert_eq!(cache.lookup::<Vec<Tag>>(&tags_key), CacheLookup::Missing);

    cache.apply_mutation(MutationKind::created(ResourceKind::Tags, 1));

    let snapshot = snapshotter.snapshot().into_vec();
    let names: HashSet<String> = snapshot
        .iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();

    let expected = [
        "blogdesk_cache_lookup_total",
        "blogdesk_cache_evict_total",
        "blogdesk_cache_invalidation_total",
    ];
    for metric in expected {
        assert!(names.contains(metric), "missing metric: {metric}");
    }

    let lookups: HashMap<String, u64> = snapshot
        .iter()
        .filter(|(key, _, _, _)| key.key().name() == "blogdesk_cache_lookup_total")
        .filter_map(|(key, _, _, value)| {
            let outcome = key
                .key()
                .labels()
                .find(|label| label.key() == "outcome")?
                .value()
                .to_string();
            match value {
                DebugValue::Counter(count) => Some((outcome, *count)),
                _ => None,
            }
        })
        .collect();
    assert_eq!(lookups.get("hit"), Some(&1));
    assert_eq!(lookups.get("miss"), Some(&2));
}
