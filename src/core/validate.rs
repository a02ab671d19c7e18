// vpsdeals - core/validate.rs
//
// Admin form validation. Drafts are the editable, all-strings shape the
// admin screens submit; validation produces a field -> message map so the
// caller can surface every problem at once. A clean draft converts into a
// canonical record.

use crate::core::catalog::{parse_price_text, slugify};
use crate::core::model::{Deal, Provider, ProviderRef, Specs};
use crate::util::constants;
use crate::util::error::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Link fields must be absolute http(s) URLs.
fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://.+").expect("static URL pattern is valid"))
}

/// Accumulated validation failures, keyed by field name.
///
/// BTreeMap keeps reporting order deterministic.
#[derive(Debug, Default)]
pub struct ValidationIssues {
    issues: BTreeMap<String, String>,
}

impl ValidationIssues {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.issues.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.issues.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.issues.insert(field.to_string(), message.into());
    }

    /// Convert into the error type carried by store results.
    pub fn into_error(self) -> ValidationError {
        ValidationError {
            issues: self.issues.into_iter().collect(),
        }
    }
}

// =============================================================================
// Deal drafts
// =============================================================================

/// Editable deal form data. All fields are strings exactly as typed;
/// parsing happens during validation.
#[derive(Debug, Clone, Default)]
pub struct DealDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub original_price: String,
    pub currency: String,
    pub location: String,
    pub provider_id: String,
    pub provider_name: String,
    pub cpu: String,
    pub ram: String,
    pub storage: String,
    pub bandwidth: String,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub link: String,
    pub coupon_code: String,
    pub expiry_date: String,
    pub featured: bool,
}

impl DealDraft {
    /// Start a draft pre-filled from an existing deal (the admin edit flow).
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            title: deal.title.clone(),
            description: deal.description.clone(),
            price: deal.price.clone(),
            original_price: deal.original_price.clone().unwrap_or_default(),
            currency: deal.currency.clone(),
            location: deal.location.clone(),
            provider_id: deal.provider.id.clone(),
            provider_name: deal.provider.name.clone(),
            cpu: deal.specs.cpu.clone(),
            ram: deal.specs.ram.clone(),
            storage: deal.specs.storage.clone(),
            bandwidth: deal.specs.bandwidth.clone(),
            tags: deal.tags.clone(),
            features: deal.features.clone(),
            link: deal.link.clone().unwrap_or_default(),
            coupon_code: deal.coupon_code.clone().unwrap_or_default(),
            expiry_date: deal
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            featured: deal.featured,
        }
    }

    /// Validate the draft. An empty result means it can become a deal.
    pub fn validate(&self) -> ValidationIssues {
        let mut issues = ValidationIssues::default();

        if self.title.trim().is_empty() {
            issues.add("title", "Title must not be empty");
        }
        if self.description.trim().is_empty() {
            issues.add("description", "Description must not be empty");
        }
        if self.location.trim().is_empty() {
            issues.add("location", "Location must not be empty");
        }
        if self.provider_name.trim().is_empty() {
            issues.add("provider", "A provider must be selected");
        }

        // Price: required, parseable, positive.
        if self.price.trim().is_empty() {
            issues.add("price", "Price must not be empty");
        } else {
            match parse_price_text(&self.price) {
                Some(value) if value > 0.0 => {}
                Some(_) => issues.add("price", "Price must be greater than 0"),
                None => issues.add("price", "Price must be a number"),
            }
        }

        // Original price: optional, but when present it must parse and
        // exceed the discounted price.
        if !self.original_price.trim().is_empty() {
            match (
                parse_price_text(&self.original_price),
                parse_price_text(&self.price),
            ) {
                (None, _) => issues.add("originalPrice", "Original price must be a number"),
                (Some(original), Some(price)) if original <= price => {
                    issues.add(
                        "originalPrice",
                        "Original price must be higher than the deal price",
                    );
                }
                _ => {}
            }
        }

        // Link: required, absolute http(s) URL.
        if self.link.trim().is_empty() {
            issues.add("link", "Purchase link must not be empty");
        } else if !url_pattern().is_match(self.link.trim()) {
            issues.add(
                "link",
                "Link must be a valid URL starting with http:// or https://",
            );
        }

        // Specs: all four fields required.
        if self.cpu.trim().is_empty() {
            issues.add("specs.cpu", "CPU spec must not be empty");
        }
        if self.ram.trim().is_empty() {
            issues.add("specs.ram", "RAM spec must not be empty");
        }
        if self.storage.trim().is_empty() {
            issues.add("specs.storage", "Storage spec must not be empty");
        }
        if self.bandwidth.trim().is_empty() {
            issues.add("specs.bandwidth", "Bandwidth spec must not be empty");
        }

        if self.tags.len() > constants::MAX_TAGS_PER_DEAL {
            issues.add(
                "tags",
                format!("At most {} tags allowed", constants::MAX_TAGS_PER_DEAL),
            );
        }
        if self.features.len() > constants::MAX_FEATURES_PER_DEAL {
            issues.add(
                "features",
                format!(
                    "At most {} features allowed",
                    constants::MAX_FEATURES_PER_DEAL
                ),
            );
        }

        // Expiry date: optional; when present it must parse. A date in the
        // past is accepted with a warning so expired promos can still be
        // edited.
        if !self.expiry_date.trim().is_empty() {
            match NaiveDate::parse_from_str(self.expiry_date.trim(), "%Y-%m-%d") {
                Ok(date) => {
                    if date < Utc::now().date_naive() {
                        tracing::warn!(expiry = %date, "Deal expiry date is in the past");
                    }
                }
                Err(_) => issues.add("expiryDate", "Expiry date must be YYYY-MM-DD"),
            }
        }

        issues
    }

    /// Convert a validated draft into a canonical deal.
    ///
    /// Returns the validation error when the draft is not clean, so the
    /// conversion can never produce a half-valid record.
    pub fn into_deal(self, id: String, now: DateTime<Utc>) -> Result<Deal, ValidationError> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(issues.into_error());
        }

        let price_value = parse_price_text(&self.price);
        let original_price = {
            let trimmed = self.original_price.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let original_price_value = original_price.as_deref().and_then(parse_price_text);
        let expiry_date = {
            let trimmed = self.expiry_date.trim();
            (!trimmed.is_empty())
                .then(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
                .flatten()
        };

        let provider_id = if self.provider_id.is_empty() {
            slugify(&self.provider_name)
        } else {
            self.provider_id
        };

        Ok(Deal {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().to_string(),
            price_value,
            original_price,
            original_price_value,
            currency: if self.currency.trim().is_empty() {
                constants::DEFAULT_CURRENCY.to_string()
            } else {
                self.currency.trim().to_string()
            },
            location: self.location.trim().to_string(),
            provider: ProviderRef {
                id: provider_id,
                name: self.provider_name.trim().to_string(),
                logo: None,
            },
            tags: self.tags,
            features: self.features,
            link: Some(self.link.trim().to_string()),
            affiliate_link: None,
            coupon_code: {
                let trimmed = self.coupon_code.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            },
            expiry_date,
            featured: self.featured,
            discount: None,
            specs: Specs {
                cpu: self.cpu.trim().to_string(),
                ram: self.ram.trim().to_string(),
                storage: self.storage.trim().to_string(),
                bandwidth: self.bandwidth.trim().to_string(),
            },
            created_at: Some(now),
            updated_at: Some(now),
        })
    }
}

// =============================================================================
// Provider drafts
// =============================================================================

/// Editable provider form data.
#[derive(Debug, Clone, Default)]
pub struct ProviderDraft {
    pub name: String,
    pub logo: String,
    pub description: String,
    pub website: String,
    pub locations: Vec<String>,
    pub features: Vec<String>,
    pub tags: Vec<String>,
}

impl ProviderDraft {
    pub fn from_provider(provider: &Provider) -> Self {
        Self {
            name: provider.name.clone(),
            logo: provider.logo.clone().unwrap_or_default(),
            description: provider.description.clone().unwrap_or_default(),
            website: provider.website.clone().unwrap_or_default(),
            locations: provider.locations.clone(),
            features: provider.features.clone(),
            tags: provider.tags.clone(),
        }
    }

    pub fn validate(&self) -> ValidationIssues {
        let mut issues = ValidationIssues::default();

        if self.name.trim().is_empty() {
            issues.add("name", "Name must not be empty");
        }
        if !self.website.trim().is_empty() && !url_pattern().is_match(self.website.trim()) {
            issues.add(
                "website",
                "Website must be a valid URL starting with http:// or https://",
            );
        }

        issues
    }

    pub fn into_provider(self, id: String) -> Result<Provider, ValidationError> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(issues.into_error());
        }

        let opt = |s: String| {
            let trimmed = s.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        Ok(Provider {
            id,
            name: self.name.trim().to_string(),
            logo: opt(self.logo),
            description: opt(self.description),
            website: opt(self.website),
            locations: self.locations,
            features: self.features,
            tags: self.tags,
        })
    }
}
