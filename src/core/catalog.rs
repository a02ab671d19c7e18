// vpsdeals - core/catalog.rs
//
// Catalog ingestion: raw JSON record shapes and their normalisation into
// the canonical model. The legacy data files are inconsistent (provider as
// string vs object, specs nested vs flattened, price as number vs string);
// every inconsistency is resolved exactly once here so no consumer ever
// branches on shape.
//
// Core layer: accepts JSON strings, never touches the filesystem. I/O is
// handled by app::data_mgr which feeds content here.

use crate::core::model::{
    Announcement, Deal, FaqEntry, Page, Provider, ProviderRef, SiteSettings, Specs,
};
use crate::util::error::CatalogError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

// =============================================================================
// Raw deserialisation structures (tolerant input shapes)
// =============================================================================

/// Provider field as it appears in legacy deal records: either a plain
/// name string or an embedded object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawProvider {
    Name(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        logo: Option<String>,
    },
}

/// Price field as it appears in legacy records: JSON number or string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

/// Raw deal record. Every field is optional or defaulted; malformed
/// optional data degrades to "absent" rather than failing the record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDeal {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<RawPrice>,
    pub original_price: Option<RawPrice>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub provider: Option<RawProvider>,
    pub provider_id: Option<String>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub link: Option<String>,
    pub affiliate_link: Option<String>,
    pub coupon_code: Option<String>,
    pub expiry_date: Option<String>,
    pub featured: Option<bool>,
    pub discount: Option<String>,
    /// Nested specs block.
    pub specs: Option<Specs>,
    // Flattened specs fields used by older records instead of `specs`.
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub bandwidth: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProviderRecord {
    id: Option<String>,
    name: Option<String>,
    logo: Option<String>,
    description: Option<String>,
    website: Option<String>,
    locations: Vec<String>,
    features: Vec<String>,
    tags: Vec<String>,
}

// =============================================================================
// Normalisation helpers
// =============================================================================

/// Derive a stable kebab-case id from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Parse a numeric value out of a price string.
///
/// Tolerates a leading currency symbol and a trailing unit suffix
/// ("$2.50/month" parses as 2.5). Returns `None` when no leading numeric
/// prefix exists.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let trimmed = text.trim().trim_start_matches(['$', '€', '£', '¥']).trim();
    let numeric: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if numeric.is_empty() {
        return None;
    }
    numeric.parse::<f64>().ok()
}

fn normalize_price(raw: Option<RawPrice>) -> (Option<String>, Option<f64>) {
    match raw {
        None => (None, None),
        Some(RawPrice::Number(n)) => (Some(format_price(n)), Some(n)),
        Some(RawPrice::Text(s)) => {
            let value = parse_price_text(&s);
            (Some(s), value)
        }
    }
}

/// Render a numeric price the way the site displays it: two decimals for
/// fractional amounts, no trailing ".00" for whole ones.
fn format_price(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn normalize_provider(
    provider: Option<RawProvider>,
    provider_id: Option<String>,
) -> ProviderRef {
    match provider {
        Some(RawProvider::Name(name)) => {
            let id = provider_id.unwrap_or_else(|| slugify(&name));
            ProviderRef {
                id,
                name,
                logo: None,
            }
        }
        Some(RawProvider::Object { id, name, logo }) => {
            let id = id
                .filter(|s| !s.is_empty())
                .or(provider_id)
                .unwrap_or_else(|| slugify(&name));
            ProviderRef { id, name, logo }
        }
        None => ProviderRef {
            id: provider_id.unwrap_or_default(),
            name: String::new(),
            logo: None,
        },
    }
}

/// Merge the nested specs block with flattened legacy fields.
/// Nested wins field-by-field; absent fields become empty strings.
fn normalize_specs(raw: &mut RawDeal) -> Specs {
    let nested = raw.specs.take().unwrap_or_default();
    let pick = |nested: String, flat: Option<String>| {
        if nested.is_empty() {
            flat.unwrap_or_default()
        } else {
            nested
        }
    };
    Specs {
        cpu: pick(nested.cpu, raw.cpu.take()),
        ram: pick(nested.ram, raw.ram.take()),
        storage: pick(nested.storage, raw.storage.take()),
        bandwidth: pick(nested.bandwidth, raw.bandwidth.take()),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Normalise a raw deal record into the canonical shape.
///
/// Returns `None` only when the record has no title (nothing to display).
/// `position` seeds the fallback id for records missing one.
pub fn normalize_deal(mut raw: RawDeal, position: usize) -> Option<Deal> {
    let title = raw.title.take().filter(|t| !t.trim().is_empty())?;

    let specs = normalize_specs(&mut raw);
    let (price, price_value) = normalize_price(raw.price.take());
    let (original_price, original_price_value) = normalize_price(raw.original_price.take());

    let expiry_date = raw.expiry_date.as_deref().and_then(|text| {
        let parsed = parse_date(text);
        if parsed.is_none() {
            tracing::debug!(value = text, "Unparseable expiry date dropped");
        }
        parsed
    });

    // Keep the original link when present, otherwise fall back to the
    // affiliate link so every deal has at most one canonical target.
    let affiliate_link = raw.affiliate_link.take().filter(|s| !s.is_empty());
    let link = raw
        .link
        .take()
        .filter(|s| !s.is_empty())
        .or_else(|| affiliate_link.clone());

    Some(Deal {
        id: raw
            .id
            .take()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("deal-{}", position + 1)),
        title,
        description: raw.description.take().unwrap_or_default(),
        price: price.unwrap_or_default(),
        price_value,
        original_price,
        original_price_value,
        currency: raw
            .currency
            .take()
            .unwrap_or_else(|| crate::util::constants::DEFAULT_CURRENCY.to_string()),
        location: raw.location.take().unwrap_or_default(),
        provider: normalize_provider(raw.provider.take(), raw.provider_id.take()),
        tags: raw.tags,
        features: raw.features,
        link,
        affiliate_link,
        coupon_code: raw.coupon_code.take().filter(|s| !s.is_empty()),
        expiry_date,
        featured: raw.featured.unwrap_or(false),
        discount: raw.discount.take().filter(|s| !s.is_empty()),
        specs,
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        updated_at: raw.updated_at.as_deref().and_then(parse_timestamp),
    })
}

// =============================================================================
// Collection parsing (tolerant, element-wise)
// =============================================================================

/// Parse and normalise a deals JSON array.
///
/// The whole file failing to parse is an error; individual malformed
/// records are logged and skipped.
pub fn parse_deals(content: &str, source_name: &str) -> Result<Vec<Deal>, CatalogError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| CatalogError::Json {
            source_name: source_name.to_string(),
            source: e,
        })?;

    let mut deals = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawDeal>(value) {
            Ok(raw) => match normalize_deal(raw, idx) {
                Some(deal) => deals.push(deal),
                None => {
                    tracing::warn!(
                        source = source_name,
                        index = idx,
                        "Skipping deal record with no title"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    source = source_name,
                    index = idx,
                    error = %e,
                    "Skipping malformed deal record"
                );
            }
        }
    }
    Ok(deals)
}

/// Parse a providers JSON array. Records with no name are skipped.
pub fn parse_providers(content: &str, source_name: &str) -> Result<Vec<Provider>, CatalogError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| CatalogError::Json {
            source_name: source_name.to_string(),
            source: e,
        })?;

    let mut providers = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawProviderRecord>(value) {
            Ok(raw) => {
                let Some(name) = raw.name.filter(|n| !n.trim().is_empty()) else {
                    tracing::warn!(
                        source = source_name,
                        index = idx,
                        "Skipping provider record with no name"
                    );
                    continue;
                };
                providers.push(Provider {
                    id: raw
                        .id
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| slugify(&name)),
                    name,
                    logo: raw.logo,
                    description: raw.description,
                    website: raw.website,
                    locations: raw.locations,
                    features: raw.features,
                    tags: raw.tags,
                });
            }
            Err(e) => {
                tracing::warn!(
                    source = source_name,
                    index = idx,
                    error = %e,
                    "Skipping malformed provider record"
                );
            }
        }
    }
    Ok(providers)
}

/// Parse a homogeneous JSON array of directly-deserialisable records,
/// skipping malformed elements. Used for pages, FAQs, and announcements.
pub fn parse_records<T: serde::de::DeserializeOwned>(
    content: &str,
    source_name: &str,
    kind: &'static str,
) -> Result<Vec<T>, CatalogError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| CatalogError::Json {
            source_name: source_name.to_string(),
            source: e,
        })?;

    let mut records = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    source = source_name,
                    index = idx,
                    kind,
                    error = %e,
                    "Skipping malformed record"
                );
            }
        }
    }
    Ok(records)
}

/// Parse pages.json.
pub fn parse_pages(content: &str, source_name: &str) -> Result<Vec<Page>, CatalogError> {
    parse_records(content, source_name, "page")
}

/// Parse faqs.json, sorted by display order.
pub fn parse_faqs(content: &str, source_name: &str) -> Result<Vec<FaqEntry>, CatalogError> {
    let mut faqs: Vec<FaqEntry> = parse_records(content, source_name, "faq")?;
    faqs.sort_by_key(|f| f.order);
    Ok(faqs)
}

/// Parse announcements.json.
pub fn parse_announcements(
    content: &str,
    source_name: &str,
) -> Result<Vec<Announcement>, CatalogError> {
    parse_records(content, source_name, "announcement")
}

/// Parse settings.json. Unknown keys are ignored; missing keys fall back
/// to defaults via serde.
pub fn parse_settings(content: &str, source_name: &str) -> Result<SiteSettings, CatalogError> {
    serde_json::from_str(content).map_err(|e| CatalogError::Json {
        source_name: source_name.to_string(),
        source: e,
    })
}

// =============================================================================
// Tests
// =============================================================================
