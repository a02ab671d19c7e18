// vpsdeals - core/filter.rs
//
// Filter/search engine for the deals catalog.
// Three stages applied in sequence, each narrowing the previous result:
// free-text query, OR-combined category filters, single active tab.
// Core layer: pure logic, no I/O.

use crate::core::model::{CategoryFilter, Deal, Tab};
use std::collections::HashSet;

/// Complete filter state: one query, any number of category toggles, and
/// exactly one active tab.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Substring text search (case-insensitive). Empty = no filter.
    pub query: String,

    /// Selected category filters (empty = stage skipped).
    pub categories: HashSet<CategoryFilter>,

    /// Active tab. `Tab::All` applies no narrowing.
    pub tab: Tab,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.categories.is_empty() && self.tab == Tab::All
    }

    /// Create a quick-filter for featured deals only.
    pub fn featured_only() -> Self {
        Self {
            tab: Tab::Featured,
            ..Default::default()
        }
    }
}

/// Apply filters to a slice of deals, returning indices of matching deals.
///
/// Returns a Vec of indices into the original slice, in source order.
/// The computation is pure and idempotent: identical inputs always produce
/// the identical index list, and no stage ever re-sorts.
pub fn apply_filters(deals: &[Deal], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..deals.len()).collect();
    }

    let query_lower = filter.query.to_lowercase();

    deals
        .iter()
        .enumerate()
        .filter(|(_, deal)| matches_all(deal, filter, &query_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single deal survives every active stage.
fn matches_all(deal: &Deal, filter: &FilterState, query_lower: &str) -> bool {
    // Stage 1: free-text query (case-insensitive substring)
    if !query_lower.is_empty() && !matches_query(deal, query_lower) {
        return false;
    }

    // Stage 2: category filters, OR-combined
    if !filter.categories.is_empty()
        && !filter
            .categories
            .iter()
            .any(|category| matches_category(deal, *category))
    {
        return false;
    }

    // Stage 3: active tab
    matches_tab(deal, filter.tab)
}

/// Query stage predicate: title, provider name, location, or any tag.
fn matches_query(deal: &Deal, query_lower: &str) -> bool {
    deal.title.to_lowercase().contains(query_lower)
        || deal.provider.name.to_lowercase().contains(query_lower)
        || deal.location.to_lowercase().contains(query_lower)
        || deal
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query_lower))
}

/// Category stage predicate for a single toggle.
///
/// Tag and location matching here is case-sensitive substring containment;
/// only the query stage lowercases. The ssd check covers both raw specs
/// shapes because normalisation collapses them into one storage field.
fn matches_category(deal: &Deal, category: CategoryFilter) -> bool {
    match category {
        CategoryFilter::Featured => deal.featured,
        CategoryFilter::NorthAmerica => {
            deal.location.contains("USA")
                || deal.location.contains("Canada")
                || deal.tags.iter().any(|tag| tag.contains("North America"))
        }
        CategoryFilter::Europe => {
            deal.location.contains("Germany")
                || deal.location.contains("France")
                || deal.location.contains("UK")
                || deal.tags.iter().any(|tag| tag.contains("Europe"))
        }
        CategoryFilter::Ssd => {
            deal.tags.iter().any(|tag| tag.contains("SSD")) || deal.specs.storage.contains("SSD")
        }
        CategoryFilter::HighPerformance => deal
            .tags
            .iter()
            .any(|tag| tag.contains("High Performance") || tag.contains("High Speed")),
        CategoryFilter::Budget => deal
            .tags
            .iter()
            .any(|tag| tag.contains("Budget") || tag.contains("Value")),
    }
}

/// Tab stage predicate.
fn matches_tab(deal: &Deal, tab: Tab) -> bool {
    match tab {
        Tab::All => true,
        Tab::Featured => deal.featured,
        other => {
            let label = other.label();
            deal.tags.iter().any(|tag| tag.contains(label)) || deal.location.contains(label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ProviderRef, Specs};

    fn make_deal(id: &str, title: &str, provider: &str, location: &str, tags: &[&str]) -> Deal {
        Deal {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            price: "2.50".to_string(),
            price_value: Some(2.5),
            original_price: None,
            original_price_value: None,
            currency: "$".to_string(),
            location: location.to_string(),
            provider: ProviderRef {
                id: provider.to_lowercase(),
                name: provider.to_string(),
                logo: None,
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            features: Vec::new(),
            link: None,
            affiliate_link: None,
            coupon_code: None,
            expiry_date: None,
            featured: false,
            discount: None,
            specs: Specs::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// The single-deal scenario from the product requirements: featured
    /// Vultr deal with US/SSD tags.
    fn vultr_deal() -> Deal {
        let mut deal = make_deal(
            "1",
            "Vultr High Performance Cloud Server",
            "Vultr",
            "USA/Japan/Singapore",
            &["US Datacenter", "SSD", "Hourly Billing"],
        );
        deal.featured = true;
        deal
    }

    #[test]
    fn test_empty_filter_returns_all_in_order() {
        let deals = vec![
            make_deal("1", "A", "P1", "USA", &[]),
            make_deal("2", "B", "P2", "Germany", &[]),
        ];
        let result = apply_filters(&deals, &FilterState::default());
        assert_eq!(result, vec![0, 1]);
    }

    #[test]
    fn test_empty_deal_list_is_not_an_error() {
        let filter = FilterState {
            query: "anything".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&[], &filter).is_empty());
    }

    #[test]
    fn test_query_matches_title_provider_location_and_tags() {
        let deals = vec![
            make_deal("1", "Cheap KVM Box", "Vultr", "USA", &[]),
            make_deal("2", "Cloud Server", "Hetzner", "Germany", &[]),
            make_deal("3", "Bare Metal", "OVH", "France", &["Cloud Native"]),
        ];

        let by_title = FilterState {
            query: "kvm".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &by_title), vec![0]);

        let by_provider = FilterState {
            query: "hetzner".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &by_provider), vec![1]);

        let by_location = FilterState {
            query: "france".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &by_location), vec![2]);

        let by_tag = FilterState {
            query: "native".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &by_tag), vec![2]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let deals = vec![vultr_deal()];
        let upper = FilterState {
            query: "VULTR".to_string(),
            ..Default::default()
        };
        let lower = FilterState {
            query: "vultr".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &upper), apply_filters(&deals, &lower));
        assert_eq!(apply_filters(&deals, &upper), vec![0]);
    }

    #[test]
    fn test_category_filters_are_or_combined() {
        let mut featured = make_deal("1", "Featured Box", "A", "Singapore", &[]);
        featured.featured = true;
        let mut ssd = make_deal("2", "SSD Box", "B", "Japan", &[]);
        ssd.specs.storage = "20GB SSD".to_string();
        let neither = make_deal("3", "Plain Box", "C", "Japan", &[]);

        let deals = vec![featured, ssd, neither];
        let filter = FilterState {
            categories: [CategoryFilter::Featured, CategoryFilter::Ssd]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        // Union of both predicates, never their intersection.
        assert_eq!(apply_filters(&deals, &filter), vec![0, 1]);
    }

    #[test]
    fn test_category_region_predicates() {
        let deals = vec![
            make_deal("1", "A", "P", "USA/Japan", &[]),
            make_deal("2", "B", "P", "Toronto, Canada", &[]),
            make_deal("3", "C", "P", "Singapore", &["North America Route"]),
            make_deal("4", "D", "P", "Germany", &[]),
            make_deal("5", "E", "P", "Singapore", &["Europe Network"]),
        ];

        let na = FilterState {
            categories: [CategoryFilter::NorthAmerica].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &na), vec![0, 1, 2]);

        let eu = FilterState {
            categories: [CategoryFilter::Europe].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &eu), vec![3, 4]);
    }

    #[test]
    fn test_ssd_matches_tag_or_storage_spec() {
        let tagged = make_deal("1", "A", "P", "USA", &["SSD"]);
        let mut spec_only = make_deal("2", "B", "P", "USA", &[]);
        spec_only.specs.storage = "40GB SSD".to_string();
        let hdd = make_deal("3", "C", "P", "USA", &["HDD"]);

        let deals = vec![tagged, spec_only, hdd];
        let filter = FilterState {
            categories: [CategoryFilter::Ssd].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &filter), vec![0, 1]);
    }

    #[test]
    fn test_tab_all_applies_no_narrowing() {
        let deals = vec![vultr_deal()];
        let filter = FilterState {
            tab: Tab::All,
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &filter), vec![0]);
    }

    #[test]
    fn test_tab_featured_keeps_only_featured() {
        let deals = vec![vultr_deal(), make_deal("2", "B", "P", "USA", &[])];
        let filter = FilterState {
            tab: Tab::Featured,
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &filter), vec![0]);
    }

    #[test]
    fn test_featured_only_quick_filter() {
        let deals = vec![make_deal("1", "Plain", "P", "USA", &[]), vultr_deal()];
        let result = apply_filters(&deals, &FilterState::featured_only());
        assert_eq!(result, vec![1]);
    }

    #[test]
    fn test_tab_matches_tag_substring_or_location() {
        // "SSD" tab matches the Vultr deal through its tag.
        let deals = vec![vultr_deal()];
        let by_tag = FilterState {
            tab: Tab::Ssd,
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &by_tag), vec![0]);

        // "US Datacenter" via location substring when no tag matches.
        let located = vec![make_deal("2", "B", "P", "Dallas US Datacenter", &[])];
        let by_location = FilterState {
            tab: Tab::UsDatacenter,
            ..Default::default()
        };
        assert_eq!(apply_filters(&located, &by_location), vec![0]);
    }

    #[test]
    fn test_vultr_scenario_matrix() {
        let deals = vec![vultr_deal()];

        // No query, no filters, tab All: the deal is returned.
        assert_eq!(apply_filters(&deals, &FilterState::default()), vec![0]);

        // Europe filter: no tag or location match.
        let europe = FilterState {
            categories: [CategoryFilter::Europe].into_iter().collect(),
            ..Default::default()
        };
        assert!(apply_filters(&deals, &europe).is_empty());

        // SSD tab: tag contains "SSD".
        let ssd_tab = FilterState {
            tab: Tab::Ssd,
            ..Default::default()
        };
        assert_eq!(apply_filters(&deals, &ssd_tab), vec![0]);

        // Query with no match anywhere.
        let miss = FilterState {
            query: "nonexistent".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&deals, &miss).is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut deals = vec![
            vultr_deal(),
            make_deal("2", "Hetzner Cloud", "Hetzner", "Germany", &["Europe"]),
            make_deal("3", "Budget VPS", "RackNerd", "USA", &["Budget", "SSD"]),
        ];
        deals[2].specs.storage = "30GB SSD".to_string();

        let filter = FilterState {
            query: "s".to_string(),
            categories: [CategoryFilter::Ssd, CategoryFilter::Featured]
                .into_iter()
                .collect(),
            tab: Tab::All,
        };

        let first: Vec<Deal> = apply_filters(&deals, &filter)
            .into_iter()
            .map(|i| deals[i].clone())
            .collect();

        // Re-running over the already-filtered subset keeps every element.
        let second = apply_filters(&first, &filter);
        assert_eq!(second, (0..first.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_optional_fields_do_not_match_and_do_not_panic() {
        // Deal with no tags, empty specs, empty provider name.
        let mut bare = make_deal("1", "Bare", "", "", &[]);
        bare.provider.name = String::new();

        let deals = vec![bare];
        for category in CategoryFilter::all() {
            let filter = FilterState {
                categories: [*category].into_iter().collect(),
                ..Default::default()
            };
            assert!(
                apply_filters(&deals, &filter).is_empty(),
                "bare deal must not match {category:?}"
            );
        }
    }
}
