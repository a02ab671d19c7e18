// vpsdeals - tests/e2e_catalog.rs
//
// End-to-end tests for the catalog pipeline: bundled data loading, user
// data-directory overrides, the filter engine over the real catalog, and
// export to disk. These tests exercise the real filesystem and the real
// bundled JSON, no mocks.

use std::fs;

use tempfile::TempDir;
use vpsdeals::app::data_mgr::load_catalog;
use vpsdeals::app::state::SessionState;
use vpsdeals::app::store::CatalogStore;
use vpsdeals::core::export::{export_csv, export_json};
use vpsdeals::core::filter::FilterState;
use vpsdeals::core::model::{CategoryFilter, Tab};
use vpsdeals::core::stats::catalog_stats;
use vpsdeals::util::constants;

// =============================================================================
// Bundled catalog E2E
// =============================================================================

/// The bundled data must load without errors and normalise every record:
/// after ingestion no deal is missing an id and no provider ref lacks a
/// name, whatever shape the raw JSON used.
#[test]
fn e2e_bundled_catalog_is_fully_normalised() {
    let (data, errors) = load_catalog(None);
    assert!(errors.is_empty(), "bundled data must be clean: {errors:?}");
    assert!(data.deals.len() >= 5, "expected a populated bundled catalog");

    for deal in &data.deals {
        assert!(!deal.id.is_empty(), "deal {:?} has empty id", deal.title);
        assert!(!deal.title.is_empty());
        assert!(
            !deal.provider.name.is_empty(),
            "deal {} has no provider name",
            deal.id
        );
    }
}

/// A query typed into the search box reaches a bundled deal through the
/// whole pipeline: load, store, session, filter.
#[test]
fn e2e_query_finds_bundled_deal() {
    let (data, _) = load_catalog(None);
    let store = CatalogStore::new(data);
    let mut session = SessionState::new(store);

    session.filter_state.query = "vultr".to_string();
    session.apply_filters();

    let titles: Vec<_> = session.filtered_deals().map(|d| d.title.as_str()).collect();
    assert!(
        titles.iter().any(|t| t.contains("Vultr")),
        "expected a Vultr deal in {titles:?}"
    );
}

/// Category toggles and tabs compose over the bundled catalog: every deal
/// surviving {SSD category} + {Featured tab} is actually featured and
/// actually mentions SSD somewhere.
#[test]
fn e2e_category_and_tab_compose_over_bundled_catalog() {
    let (data, _) = load_catalog(None);
    let store = CatalogStore::new(data);
    let mut session = SessionState::new(store);

    session.filter_state.categories.insert(CategoryFilter::Ssd);
    session.filter_state.tab = Tab::Featured;
    session.apply_filters();

    assert!(
        !session.filtered_indices.is_empty(),
        "bundled catalog should contain a featured SSD deal"
    );
    for deal in session.filtered_deals() {
        assert!(deal.featured, "{} passed Featured tab but is not featured", deal.id);
        assert!(
            deal.tags.iter().any(|t| t.contains("SSD")) || deal.specs.storage.contains("SSD"),
            "{} passed SSD category without an SSD tag or spec",
            deal.id
        );
    }
}

// =============================================================================
// User data directory overrides E2E
// =============================================================================

/// A deals.json in the user data directory replaces the bundled deals
/// while every other collection still comes from the bundle.
#[test]
fn e2e_user_deals_file_overrides_bundle() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(constants::DEALS_FILE_NAME),
        r#"[
            {"title":"Custom Box","provider":"Acme","price":"1.00",
             "location":"USA","tags":["US Datacenter"]}
        ]"#,
    )
    .unwrap();

    let (data, errors) = load_catalog(Some(dir.path()));
    assert!(errors.is_empty(), "override should parse: {errors:?}");
    assert_eq!(data.deals.len(), 1);
    assert_eq!(data.deals[0].title, "Custom Box");
    // Missing id falls back to a positional one.
    assert_eq!(data.deals[0].id, "deal-1");
    assert!(!data.providers.is_empty(), "providers still bundled");
    assert!(!data.faqs.is_empty(), "faqs still bundled");
}

/// A malformed override degrades that one collection to empty, reports the
/// error, and leaves the rest of the catalog intact.
#[test]
fn e2e_malformed_override_degrades_single_collection() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(constants::DEALS_FILE_NAME), "not json at all").unwrap();

    let (data, errors) = load_catalog(Some(dir.path()));
    assert!(data.deals.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(!data.providers.is_empty());
    assert!(!data.pages.is_empty());
}

// =============================================================================
// Stats E2E
// =============================================================================

/// Stats over the bundled catalog reflect its real composition.
#[test]
fn e2e_stats_over_bundled_catalog() {
    let (data, _) = load_catalog(None);
    let stats = catalog_stats(&data.deals);

    assert_eq!(stats.total_deals, data.deals.len());
    assert!(stats.featured_deals >= 1);
    assert!(stats.total_providers >= 3);
    // Multi-location deals split on '/' into individual regions.
    assert!(
        stats.region_counts.iter().any(|(region, _)| region == "USA"),
        "expected USA region in {:?}",
        stats.region_counts
    );
    assert!(
        stats.tag_counts.iter().any(|(tag, _)| tag == "SSD"),
        "expected SSD tag in {:?}",
        stats.tag_counts
    );
}

// =============================================================================
// Export E2E
// =============================================================================

/// Export a filtered view to a real CSV file and read it back.
#[test]
fn e2e_export_filtered_view_to_csv() {
    let (data, _) = load_catalog(None);
    let store = CatalogStore::new(data);
    let mut session = SessionState::new(store);

    session.filter_state = FilterState {
        query: String::new(),
        categories: [CategoryFilter::Budget].into_iter().collect(),
        tab: Tab::All,
    };
    session.apply_filters();
    let snapshot = session.filtered_snapshot();
    assert!(!snapshot.is_empty(), "bundled catalog should have budget deals");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deals.csv");
    let file = fs::File::create(&path).unwrap();
    let written = export_csv(&snapshot, file, &path).unwrap();
    assert_eq!(written, snapshot.len());

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,title,provider,price,currency,location,storage,tags,featured,link"
    );
    assert_eq!(lines.count(), snapshot.len());
}

/// Export to JSON round-trips through serde as an array of the same length.
#[test]
fn e2e_export_catalog_to_json() {
    let (data, _) = load_catalog(None);
    let deal_count = data.deals.len();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deals.json");
    let file = fs::File::create(&path).unwrap();
    let written = export_json(&data.deals, file, &path).unwrap();
    assert_eq!(written, deal_count);

    let content = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(deal_count));
}
