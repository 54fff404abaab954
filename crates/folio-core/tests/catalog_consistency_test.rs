//! End-to-end consistency tests for the catalog engine.
//!
//! These suites drive the public `Catalog` surface the way the harness
//! does and verify that the primary store and the index set never drift
//! apart — the core contract of the engine.

use folio_core::{Catalog, CatalogError, CatalogStats, Record};

fn record(key: &str, author: &str, year: i32, category: &str) -> Record {
    Record::new(format!("Title {key}"), author, year, category, key)
}

/// Build the five-record scenario catalog: keys K1..K5, years 2000..2004,
/// authors A1..A5.
fn scenario_catalog() -> Catalog {
    let mut catalog = Catalog::new("scenario");
    for i in 1..=5 {
        catalog
            .add_record(record(
                &format!("K{i}"),
                &format!("A{i}"),
                1999 + i,
                "Fiction",
            ))
            .expect("scenario record is well-formed");
    }
    catalog
}

#[test]
fn test_no_drift_across_add_remove_sequences() {
    let mut catalog = Catalog::new("drift");

    for i in 0..20 {
        catalog.add_record(record(&format!("K{i}"), &format!("A{}", i % 4), 2000 + (i % 7), "Science")).unwrap();
        assert_eq!(catalog.collection().len(), catalog.index().len());
        catalog.verify_integrity().unwrap();
    }
    for i in (0..20).step_by(3) {
        assert!(catalog.remove_record(&format!("K{i}")).unwrap());
        assert_eq!(catalog.collection().len(), catalog.index().len());
        catalog.verify_integrity().unwrap();
    }

    println!("✅ No drift across add/remove sequences");
}

#[test]
fn test_removed_record_is_absent_everywhere() {
    let mut catalog = Catalog::new("purge");
    catalog.add_record(record("K1", "Asimov", 1951, "Science")).unwrap();
    catalog.add_record(record("K2", "Asimov", 1951, "Science")).unwrap();

    assert!(catalog.remove_record("K1").unwrap());

    assert!(catalog.find_by_key("K1").is_none());
    let asimov: Vec<_> = catalog.find_by_author("Asimov").into_iter().map(|r| r.key.clone()).collect();
    assert_eq!(asimov, vec!["K2"]);
    let y1951: Vec<_> = catalog.find_by_year(1951).into_iter().map(|r| r.key.clone()).collect();
    assert_eq!(y1951, vec!["K2"]);
    catalog.verify_integrity().unwrap();
}

#[test]
fn test_removing_absent_key_is_idempotent() {
    let mut catalog = scenario_catalog();
    let before = catalog.statistics();

    assert!(!catalog.remove_record("K9").unwrap());
    assert!(!catalog.remove_record("K9").unwrap());

    assert_eq!(catalog.statistics(), before);
    catalog.verify_integrity().unwrap();
}

#[test]
fn test_equality_is_structural() {
    let a = record("K1", "A1", 2000, "Fiction");
    let b = record("K1", "Completely Different", 1900, "Science");

    assert_eq!(a, b);
    assert_eq!(a, a.clone());

    // A record stored in the catalog still equals the instance it was cloned from.
    let mut catalog = Catalog::new("eq");
    catalog.add_record(a.clone()).unwrap();
    assert_eq!(catalog.find_by_key("K1").unwrap(), &a);
}

#[test]
fn test_category_filter_returns_exactly_matching_records() {
    let mut catalog = Catalog::new("categories");
    catalog.add_record(record("K1", "Asimov", 1951, "Science")).unwrap();
    catalog.add_record(record("K2", "Clarke", 1968, "Fiction")).unwrap();
    catalog.add_record(record("K3", "Sagan", 1980, "Science")).unwrap();

    let science = catalog.find_by_category("Science");
    assert_eq!(science.len(), 2);
    assert!(science.iter().all(|r| r.category == "Science"));

    let fiction = catalog.find_by_category("Fiction");
    assert_eq!(fiction.len(), 1);
    assert_eq!(fiction[0].key, "K2");
}

#[test]
fn test_scenario_remove_k3() {
    let mut catalog = scenario_catalog();

    assert!(catalog.remove_record("K3").unwrap());

    assert_eq!(catalog.statistics().total_records, 4);
    assert!(catalog.find_by_key("K3").is_none());
    assert!(catalog.find_by_year(2002).is_empty());
    assert_eq!(catalog.find_by_year(2000).len(), 1);
    catalog.verify_integrity().unwrap();

    println!("✅ Scenario: remove K3 leaves a consistent four-record catalog");
}

#[test]
fn test_empty_catalog_statistics() {
    let catalog = Catalog::new("empty");
    let stats = catalog.statistics();

    assert_eq!(
        stats,
        CatalogStats {
            total_records: 0,
            unique_authors: 0,
            year_range: None,
            categories: Vec::new(),
        }
    );
}

#[test]
fn test_positional_range_is_half_open() {
    let catalog = scenario_catalog();

    let slice = catalog.collection().range(1..3).unwrap();
    assert_eq!(slice.len(), 2);
    assert_eq!(slice[0].key, "K2");
    assert_eq!(slice[1].key, "K3");
}

#[test]
fn test_positional_get_bounds() {
    let catalog = scenario_catalog();

    assert_eq!(catalog.get(0).unwrap().key, "K1");
    assert_eq!(catalog.get(4).unwrap().key, "K5");
    assert_eq!(
        catalog.get(5).unwrap_err(),
        CatalogError::IndexOutOfRange { index: 5, len: 5 }
    );
}

#[test]
fn test_duplicate_key_add_leaves_no_orphans() {
    let mut catalog = Catalog::new("dup");
    catalog.add_record(record("K1", "Asimov", 1951, "Science")).unwrap();
    catalog.add_record(record("K1", "Sagan", 1980, "Fiction")).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.find_by_key("K1").unwrap().author, "Sagan");
    assert!(catalog.find_by_author("Asimov").is_empty());
    assert!(catalog.find_by_year(1951).is_empty());
    assert_eq!(catalog.find_by_year(1980).len(), 1);
    catalog.verify_integrity().unwrap();

    // Removing the surviving record leaves a genuinely empty catalog.
    assert!(catalog.remove_record("K1").unwrap());
    assert!(catalog.is_empty());
    assert_eq!(catalog.statistics().total_records, 0);
    catalog.verify_integrity().unwrap();
}

#[test]
fn test_statistics_are_fresh_not_snapshotted() {
    let mut catalog = scenario_catalog();

    let first = catalog.statistics();
    assert_eq!(first.year_range, Some((2000, 2004)));
    assert_eq!(first.unique_authors, 5);

    catalog.remove_record("K5").unwrap();
    catalog.add_record(record("K6", "A1", 2010, "History")).unwrap();

    let second = catalog.statistics();
    assert_eq!(second.total_records, 5);
    assert_eq!(second.year_range, Some((2000, 2010)));
    // A5 left and K6 repeats A1, so four distinct authors remain.
    assert_eq!(second.unique_authors, 4);
    assert_eq!(second.categories, vec!["Fiction", "History"]);
}

#[test]
fn test_categories_are_sorted_lexicographically() {
    let mut catalog = Catalog::new("sorting");
    for (i, category) in ["Technology", "Biography", "Science", "Fiction"].iter().enumerate() {
        catalog.add_record(record(&format!("K{i}"), "A", 2000, category)).unwrap();
    }

    assert_eq!(
        catalog.statistics().categories,
        vec!["Biography", "Fiction", "Science", "Technology"]
    );
}
