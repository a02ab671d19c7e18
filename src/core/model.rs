// vpsdeals - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// filesystem dependencies.
//
// Every record here is the canonical post-normalisation shape: the legacy
// JSON inconsistencies (provider as string vs object, specs nested vs
// flattened, price as number vs string) are resolved once by
// `core::catalog` and never leak past this module.

use crate::util::constants;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Deal (normalised catalog record)
// =============================================================================

/// Provider reference embedded in a deal.
///
/// Always carries a display name; `id` is derived from the name when the
/// source record only gave a plain string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderRef {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Hardware specification block. Fields are free-text strings as shown on
/// the deal card ("1 vCPU", "512MB", "10GB SSD"); absent specs are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Specs {
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub ram: String,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub bandwidth: String,
}

/// A single advertised VPS hosting offer.
///
/// This is the core data unit that flows through filtering, display,
/// stats, and export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Unique deal identifier.
    pub id: String,

    /// Offer headline, e.g. "Vultr High Performance Cloud Server".
    pub title: String,

    /// Longer free-text description.
    pub description: String,

    /// Price exactly as the source record spelled it ("2.50", "$2.50/mo").
    pub price: String,

    /// Numeric price parsed from `price`. `None` when unparseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_value: Option<f64>,

    /// Pre-discount price string, when the source carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,

    /// Numeric pre-discount price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price_value: Option<f64>,

    /// Currency code or symbol ("USD", "$").
    pub currency: String,

    /// Free-text datacenter location string, regions separated by '/'.
    pub location: String,

    /// Normalised provider reference.
    pub provider: ProviderRef,

    /// Ordered tag list used for filtering and search.
    pub tags: Vec<String>,

    /// Marketing feature bullet points.
    pub features: Vec<String>,

    /// Purchase link. Falls back to the affiliate link at normalisation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Affiliate tracking link, when distinct from `link`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,

    /// Coupon code to apply at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,

    /// Date the offer expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,

    /// Whether the deal is pinned as featured.
    pub featured: bool,

    /// Display discount label, e.g. "50%".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    /// Hardware specification block (never absent after normalisation;
    /// unknown fields are empty strings).
    pub specs: Specs,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Category filters
// =============================================================================

/// Fixed enumeration of category filter toggles.
///
/// Any subset can be active at once; a deal passes the category stage when
/// it matches ANY selected filter (OR semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    Featured,
    NorthAmerica,
    Europe,
    Ssd,
    HighPerformance,
    Budget,
}

impl CategoryFilter {
    /// Returns all variants in display order.
    pub fn all() -> &'static [CategoryFilter] {
        &[
            CategoryFilter::Featured,
            CategoryFilter::NorthAmerica,
            CategoryFilter::Europe,
            CategoryFilter::Ssd,
            CategoryFilter::HighPerformance,
            CategoryFilter::Budget,
        ]
    }

    /// Stable kebab-case identifier used in CLI flags and data files.
    pub fn id(&self) -> &'static str {
        match self {
            CategoryFilter::Featured => "featured",
            CategoryFilter::NorthAmerica => "north-america",
            CategoryFilter::Europe => "europe",
            CategoryFilter::Ssd => "ssd",
            CategoryFilter::HighPerformance => "high-performance",
            CategoryFilter::Budget => "budget",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::Featured => "Featured",
            CategoryFilter::NorthAmerica => "North America",
            CategoryFilter::Europe => "Europe",
            CategoryFilter::Ssd => "SSD Storage",
            CategoryFilter::HighPerformance => "High Performance",
            CategoryFilter::Budget => "Budget Friendly",
        }
    }

    /// Parse a kebab-case identifier. Returns `None` for unknown ids.
    pub fn from_id(id: &str) -> Option<CategoryFilter> {
        CategoryFilter::all().iter().copied().find(|c| c.id() == id)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Tabs
// =============================================================================

/// The single-select tab row above the deals grid.
///
/// Exactly one tab is active at a time; `All` applies no narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    All,
    Featured,
    UsDatacenter,
    Ssd,
    Cn2,
    AnnualDiscount,
}

impl Tab {
    /// Returns all variants in display order.
    pub fn all() -> &'static [Tab] {
        &[
            Tab::All,
            Tab::Featured,
            Tab::UsDatacenter,
            Tab::Ssd,
            Tab::Cn2,
            Tab::AnnualDiscount,
        ]
    }

    /// Display label; also the substring matched against tags and location
    /// for the non-special tabs.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Featured => "Featured",
            Tab::UsDatacenter => "US Datacenter",
            Tab::Ssd => "SSD",
            Tab::Cn2 => "CN2",
            Tab::AnnualDiscount => "Annual Discount",
        }
    }

    /// Parse a display label (case-insensitive). Returns `None` for
    /// unknown labels.
    pub fn from_label(label: &str) -> Option<Tab> {
        let wanted = label.trim().to_lowercase();
        Tab::all()
            .iter()
            .copied()
            .find(|t| t.label().to_lowercase() == wanted)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Provider (standalone directory record)
// =============================================================================

/// A hosting company referenced by one or more deals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// =============================================================================
// Site content records
// =============================================================================

/// A static content page (about, terms, privacy, affiliate disclosure).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A frequently-asked question entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
    /// Display position, ascending.
    #[serde(default)]
    pub order: u32,
}

/// A site-wide announcement banner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub message: String,
    /// Banner kind: "info", "warning", or "promo".
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<NaiveDate>,
}

// =============================================================================
// Site settings
// =============================================================================

/// Global site configuration edited through the admin settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub default_language: String,
    pub enabled_languages: Vec<String>,
    pub featured_deals_count: usize,
    pub deals_per_page: usize,
    pub theme: String,
    pub logo_url: String,
    pub favicon_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "VPS Deals".to_string(),
            site_description: "Find the best VPS server deals worldwide".to_string(),
            contact_email: "contact@vpsdeals.com".to_string(),
            default_language: "en".to_string(),
            enabled_languages: vec!["en".to_string()],
            featured_deals_count: constants::DEFAULT_FEATURED_DEALS_COUNT,
            deals_per_page: constants::DEFAULT_DEALS_PER_PAGE,
            theme: "dark".to_string(),
            logo_url: "/logo.png".to_string(),
            favicon_url: "/favicon.ico".to_string(),
        }
    }
}

// =============================================================================
// Catalog stats
// =============================================================================

/// Aggregated catalog statistics for the admin dashboard.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Total deals in the catalog.
    pub total_deals: usize,

    /// Deals counted as featured: explicit flag, or a discount deep enough
    /// to qualify per `constants::FEATURED_DISCOUNT_FACTOR`.
    pub featured_deals: usize,

    /// Number of distinct providers across all deals.
    pub total_providers: usize,

    /// Deal count per provider name, descending, top N.
    pub provider_counts: Vec<(String, usize)>,

    /// Deal count per region (locations split on '/'), descending.
    pub region_counts: Vec<(String, usize)>,

    /// Deal count per tag, descending, top N.
    pub tag_counts: Vec<(String, usize)>,
}
