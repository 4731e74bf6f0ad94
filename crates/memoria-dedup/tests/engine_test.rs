use memoria_dedup::{DedupEngine, MatchLevel};
use memoria_metadata::MetadataStore;

#[test]
fn exact_duplicate_is_detected_first() {
    let store = MetadataStore::open_in_memory().unwrap();
    let engine = DedupEngine::new(&store);
    engine.register("mem-1", "proj", "hello world", None).unwrap();

    let check = engine.check("mem-2", "hello world", None).unwrap();
    assert!(check.is_duplicate);
    assert_eq!(check.match_level, Some(MatchLevel::Exact));
    assert_eq!(check.matched_id.as_deref(), Some("mem-1"));
    assert!((check.confidence - 1.0).abs() < 1e-9);
}

#[test]
fn normalized_duplicate_catches_formatting_variants() {
    let store = MetadataStore::open_in_memory().unwrap();
    let engine = DedupEngine::new(&store);
    engine.register("mem-1", "proj", "Hello, World!", None).unwrap();

    let check = engine.check("mem-2", "hello   world", None).unwrap();
    assert!(check.is_duplicate);
    assert_eq!(check.match_level, Some(MatchLevel::Normalized));
}

#[test]
fn unrelated_content_is_not_a_duplicate() {
    let store = MetadataStore::open_in_memory().unwrap();
    let engine = DedupEngine::new(&store);
    engine.register("mem-1", "proj", "rust ownership notes", None).unwrap();

    let check = engine.check("mem-2", "totally different content here", None).unwrap();
    assert!(!check.is_duplicate);
    assert!(check.matched_id.is_none());
}

#[test]
fn groups_reports_sets_sharing_normalized_hash() {
    let store = MetadataStore::open_in_memory().unwrap();
    let engine = DedupEngine::new(&store);
    engine.register("a", "proj", "same text", None).unwrap();
    engine.register("b", "proj", "Same   Text!!", None).unwrap();
    engine.register("c", "proj", "different", None).unwrap();

    let groups = engine.groups().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}
