// vpsdeals - core/stats.rs
//
// Catalog aggregation for the admin dashboard: totals plus per-provider,
// per-region, and per-tag deal counts.

use crate::core::model::{CatalogStats, Deal};
use crate::util::constants;
use std::collections::HashMap;

/// Compute catalog statistics over the current deal list.
///
/// Count lists are sorted by count descending, then name ascending so
/// equal counts have a stable order.
pub fn catalog_stats(deals: &[Deal]) -> CatalogStats {
    let mut providers: HashMap<String, usize> = HashMap::new();
    let mut regions: HashMap<String, usize> = HashMap::new();
    let mut tags: HashMap<String, usize> = HashMap::new();
    let mut featured = 0usize;

    for deal in deals {
        if is_featured(deal) {
            featured += 1;
        }

        let provider_name = if deal.provider.name.is_empty() {
            "Unknown"
        } else {
            &deal.provider.name
        };
        *providers.entry(provider_name.to_string()).or_default() += 1;

        // Location strings pack several regions separated by '/'.
        for region in deal.location.split('/') {
            let region = region.trim();
            if !region.is_empty() {
                *regions.entry(region.to_string()).or_default() += 1;
            }
        }

        for tag in &deal.tags {
            *tags.entry(tag.clone()).or_default() += 1;
        }
    }

    let total_providers = providers.len();

    CatalogStats {
        total_deals: deals.len(),
        featured_deals: featured,
        total_providers,
        provider_counts: ranked(providers, constants::MAX_PROVIDER_STATS),
        region_counts: ranked(regions, usize::MAX),
        tag_counts: ranked(tags, constants::MAX_TAG_STATS),
    }
}

/// A deal counts as featured when it carries the explicit flag, or when
/// its original price exceeds the current price by the discount factor
/// (legacy data has no flags and marks bargains by discount depth).
fn is_featured(deal: &Deal) -> bool {
    if deal.featured {
        return true;
    }
    match (deal.original_price_value, deal.price_value) {
        (Some(original), Some(price)) => original > price * constants::FEATURED_DISCOUNT_FACTOR,
        _ => false,
    }
}

fn ranked(counts: HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ProviderRef, Specs};

    fn deal(provider: &str, location: &str, tags: &[&str], featured: bool) -> Deal {
        Deal {
            id: String::new(),
            title: "t".to_string(),
            description: String::new(),
            price: "5".to_string(),
            price_value: Some(5.0),
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
            featured,
            discount: None,
            specs: Specs::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_counts_and_ordering() {
        let deals = vec![
            deal("Vultr", "USA/Japan", &["SSD"], true),
            deal("Vultr", "USA", &["SSD", "Budget"], false),
            deal("Hetzner", "Germany", &["Europe"], false),
        ];
        let stats = catalog_stats(&deals);

        assert_eq!(stats.total_deals, 3);
        assert_eq!(stats.featured_deals, 1);
        assert_eq!(stats.total_providers, 2);
        assert_eq!(stats.provider_counts[0], ("Vultr".to_string(), 2));
        assert_eq!(stats.region_counts[0], ("USA".to_string(), 2));
        assert_eq!(stats.tag_counts[0], ("SSD".to_string(), 2));
    }

    #[test]
    fn test_deep_discount_counts_as_featured() {
        let mut discounted = deal("Vultr", "USA", &[], false);
        discounted.price_value = Some(2.5);
        discounted.original_price_value = Some(5.0);

        let mut shallow = deal("Vultr", "USA", &[], false);
        shallow.price_value = Some(5.0);
        shallow.original_price_value = Some(5.5);

        let stats = catalog_stats(&[discounted, shallow]);
        assert_eq!(stats.featured_deals, 1);
    }

    #[test]
    fn test_empty_catalog() {
        let stats = catalog_stats(&[]);
        assert_eq!(stats.total_deals, 0);
        assert!(stats.provider_counts.is_empty());
        assert!(stats.region_counts.is_empty());
    }

    #[test]
    fn test_blank_provider_grouped_as_unknown() {
        let mut anonymous = deal("", "USA", &[], false);
        anonymous.provider.name = String::new();
        let stats = catalog_stats(&[anonymous]);
        assert_eq!(stats.provider_counts[0].0, "Unknown");
    }
}
