// vpsdeals - app/store.rs
//
// In-memory admin store: CRUD over every catalog collection. There is no
// persistence layer behind it; mutations live exactly as long as the
// store does and the next load starts from the data files again.

use crate::app::data_mgr::CatalogData;
use crate::core::model::{
    Announcement, CatalogStats, Deal, FaqEntry, Page, Provider, SiteSettings,
};
use crate::core::stats;
use crate::core::validate::{DealDraft, ProviderDraft};
use crate::util::constants;
use crate::util::error::StoreError;
use chrono::Utc;

/// The live catalog plus admin-editable collections.
#[derive(Debug, Default)]
pub struct CatalogStore {
    deals: Vec<Deal>,
    providers: Vec<Provider>,
    pages: Vec<Page>,
    faqs: Vec<FaqEntry>,
    announcements: Vec<Announcement>,
    settings: SiteSettings,
}

impl CatalogStore {
    pub fn new(data: CatalogData) -> Self {
        Self {
            deals: data.deals,
            providers: data.providers,
            pages: data.pages,
            faqs: data.faqs,
            announcements: data.announcements,
            settings: data.settings,
        }
    }

    // -------------------------------------------------------------------
    // Deals
    // -------------------------------------------------------------------

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn deal(&self, id: &str) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    /// Validate and insert a new deal. Returns the assigned id.
    pub fn create_deal(&mut self, draft: DealDraft) -> Result<String, StoreError> {
        let id = self.next_id("deal", |store, candidate| {
            store.deals.iter().any(|d| d.id == candidate)
        });
        let deal = draft
            .into_deal(id.clone(), Utc::now())
            .map_err(StoreError::Validation)?;
        tracing::info!(id = %deal.id, title = %deal.title, "Deal created");
        self.deals.push(deal);
        Ok(id)
    }

    /// Validate and replace an existing deal, preserving its id and
    /// creation timestamp.
    pub fn update_deal(&mut self, id: &str, draft: DealDraft) -> Result<(), StoreError> {
        let position = self
            .deals
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "deal",
                id: id.to_string(),
            })?;

        let mut updated = draft
            .into_deal(id.to_string(), Utc::now())
            .map_err(StoreError::Validation)?;
        updated.created_at = self.deals[position].created_at;

        tracing::info!(id, "Deal updated");
        self.deals[position] = updated;
        Ok(())
    }

    /// Remove a deal, returning the removed record.
    pub fn delete_deal(&mut self, id: &str) -> Result<Deal, StoreError> {
        let position = self
            .deals
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "deal",
                id: id.to_string(),
            })?;
        tracing::info!(id, "Deal deleted");
        Ok(self.deals.remove(position))
    }

    // -------------------------------------------------------------------
    // Providers
    // -------------------------------------------------------------------

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn create_provider(&mut self, draft: ProviderDraft) -> Result<String, StoreError> {
        let base = crate::core::catalog::slugify(&draft.name);
        let id = if !base.is_empty() && !self.providers.iter().any(|p| p.id == base) {
            base
        } else {
            self.next_id("provider", |store, candidate| {
                store.providers.iter().any(|p| p.id == candidate)
            })
        };
        let provider = draft
            .into_provider(id.clone())
            .map_err(StoreError::Validation)?;
        tracing::info!(id = %provider.id, name = %provider.name, "Provider created");
        self.providers.push(provider);
        Ok(id)
    }

    pub fn update_provider(&mut self, id: &str, draft: ProviderDraft) -> Result<(), StoreError> {
        let position = self
            .providers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "provider",
                id: id.to_string(),
            })?;
        let updated = draft
            .into_provider(id.to_string())
            .map_err(StoreError::Validation)?;
        tracing::info!(id, "Provider updated");
        self.providers[position] = updated;
        Ok(())
    }

    /// Remove a provider. Deals keep their denormalised provider name, so
    /// nothing else changes.
    pub fn delete_provider(&mut self, id: &str) -> Result<Provider, StoreError> {
        let position = self
            .providers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "provider",
                id: id.to_string(),
            })?;
        tracing::info!(id, "Provider deleted");
        Ok(self.providers.remove(position))
    }

    // -------------------------------------------------------------------
    // Pages
    // -------------------------------------------------------------------

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn create_page(&mut self, mut page: Page) -> String {
        if page.id.is_empty() {
            page.id = self.next_id("page", |store, candidate| {
                store.pages.iter().any(|p| p.id == candidate)
            });
        }
        let now = Utc::now();
        page.created_at = Some(now);
        page.updated_at = Some(now);
        let id = page.id.clone();
        self.pages.push(page);
        id
    }

    pub fn update_page(&mut self, page: Page) -> Result<(), StoreError> {
        let position = self
            .pages
            .iter()
            .position(|p| p.id == page.id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "page",
                id: page.id.clone(),
            })?;
        let mut updated = page;
        updated.created_at = self.pages[position].created_at;
        updated.updated_at = Some(Utc::now());
        self.pages[position] = updated;
        Ok(())
    }

    pub fn delete_page(&mut self, id: &str) -> Result<Page, StoreError> {
        let position = self
            .pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "page",
                id: id.to_string(),
            })?;
        Ok(self.pages.remove(position))
    }

    // -------------------------------------------------------------------
    // FAQs
    // -------------------------------------------------------------------

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    pub fn create_faq(&mut self, mut faq: FaqEntry) -> String {
        if faq.id.is_empty() {
            faq.id = self.next_id("faq", |store, candidate| {
                store.faqs.iter().any(|f| f.id == candidate)
            });
        }
        let id = faq.id.clone();
        self.faqs.push(faq);
        self.faqs.sort_by_key(|f| f.order);
        id
    }

    pub fn update_faq(&mut self, faq: FaqEntry) -> Result<(), StoreError> {
        let position = self
            .faqs
            .iter()
            .position(|f| f.id == faq.id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "faq",
                id: faq.id.clone(),
            })?;
        self.faqs[position] = faq;
        self.faqs.sort_by_key(|f| f.order);
        Ok(())
    }

    pub fn delete_faq(&mut self, id: &str) -> Result<FaqEntry, StoreError> {
        let position = self
            .faqs
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "faq",
                id: id.to_string(),
            })?;
        Ok(self.faqs.remove(position))
    }

    // -------------------------------------------------------------------
    // Announcements
    // -------------------------------------------------------------------

    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn create_announcement(&mut self, mut announcement: Announcement) -> String {
        if announcement.id.is_empty() {
            announcement.id = self.next_id("announcement", |store, candidate| {
                store.announcements.iter().any(|a| a.id == candidate)
            });
        }
        let id = announcement.id.clone();
        self.announcements.push(announcement);
        id
    }

    pub fn update_announcement(&mut self, announcement: Announcement) -> Result<(), StoreError> {
        let position = self
            .announcements
            .iter()
            .position(|a| a.id == announcement.id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "announcement",
                id: announcement.id.clone(),
            })?;
        self.announcements[position] = announcement;
        Ok(())
    }

    pub fn delete_announcement(&mut self, id: &str) -> Result<Announcement, StoreError> {
        let position = self
            .announcements
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "announcement",
                id: id.to_string(),
            })?;
        Ok(self.announcements.remove(position))
    }

    // -------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Replace the site settings. Out-of-range numeric fields fall back
    /// to their previous value; returns a warning per rejected field.
    pub fn update_settings(&mut self, mut settings: SiteSettings) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(constants::MIN_DEALS_PER_PAGE..=constants::MAX_DEALS_PER_PAGE)
            .contains(&settings.deals_per_page)
        {
            warnings.push(format!(
                "dealsPerPage = {} is out of range ({}-{}). Keeping {}.",
                settings.deals_per_page,
                constants::MIN_DEALS_PER_PAGE,
                constants::MAX_DEALS_PER_PAGE,
                self.settings.deals_per_page,
            ));
            settings.deals_per_page = self.settings.deals_per_page;
        }

        if !(constants::MIN_FEATURED_DEALS_COUNT..=constants::MAX_FEATURED_DEALS_COUNT)
            .contains(&settings.featured_deals_count)
        {
            warnings.push(format!(
                "featuredDealsCount = {} is out of range ({}-{}). Keeping {}.",
                settings.featured_deals_count,
                constants::MIN_FEATURED_DEALS_COUNT,
                constants::MAX_FEATURED_DEALS_COUNT,
                self.settings.featured_deals_count,
            ));
            settings.featured_deals_count = self.settings.featured_deals_count;
        }

        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        self.settings = settings;
        warnings
    }

    // -------------------------------------------------------------------
    // Stats
    // -------------------------------------------------------------------

    /// Compute dashboard statistics from the live deal list.
    pub fn stats(&self) -> CatalogStats {
        stats::catalog_stats(&self.deals)
    }

    // -------------------------------------------------------------------

    /// Generate a collection-unique id of the form "{prefix}-{n}".
    fn next_id(&self, prefix: &str, taken: impl Fn(&Self, &str) -> bool) -> String {
        let mut n = self.collection_len(prefix) + 1;
        loop {
            let candidate = format!("{prefix}-{n}");
            if !taken(self, &candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn collection_len(&self, prefix: &str) -> usize {
        match prefix {
            "deal" => self.deals.len(),
            "provider" => self.providers.len(),
            "page" => self.pages.len(),
            "faq" => self.faqs.len(),
            "announcement" => self.announcements.len(),
            _ => 0,
        }
    }
}
