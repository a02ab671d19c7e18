// vpsdeals - app/state.rs
//
// Session state: the loaded store, the current filter configuration, and
// the filtered view derived from them. Owned by the CLI entry point.

use crate::app::store::CatalogStore;
use crate::core::filter::{self, FilterState};
use crate::core::model::Deal;

/// Top-level session state.
#[derive(Debug, Default)]
pub struct SessionState {
    /// The loaded catalog store.
    pub store: CatalogStore,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Indices of deals matching the current filter (into `store.deals()`).
    pub filtered_indices: Vec<usize>,
}

impl SessionState {
    /// Create session state over a loaded store, with the full catalog
    /// visible until a filter is applied.
    pub fn new(store: CatalogStore) -> Self {
        let filtered_indices = (0..store.deals().len()).collect();
        Self {
            store,
            filter_state: FilterState::default(),
            filtered_indices,
        }
    }

    /// Recompute the filtered view from the current deals and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(self.store.deals(), &self.filter_state);
    }

    /// Iterate the deals in the current filtered view, in source order.
    pub fn filtered_deals(&self) -> impl Iterator<Item = &Deal> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.store.deals().get(idx))
    }

    /// Clone the current filtered view into an owned list (for export).
    pub fn filtered_snapshot(&self) -> Vec<Deal> {
        self.filtered_deals().cloned().collect()
    }

    /// Reset query, category toggles, and tab, restoring the full view.
    pub fn clear_filters(&mut self) {
        self.filter_state = FilterState::default();
        self.apply_filters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data_mgr::CatalogData;
    use crate::core::model::Tab;
    use crate::core::validate::DealDraft;

    fn session_with_deals() -> SessionState {
        let mut store = CatalogStore::new(CatalogData::default());
        for (title, featured) in [("Vultr Cloud", true), ("Hetzner Cloud", false)] {
            let draft = DealDraft {
                title: title.to_string(),
                description: "d".to_string(),
                price: "3.00".to_string(),
                location: "USA".to_string(),
                provider_name: "P".to_string(),
                cpu: "1".to_string(),
                ram: "1".to_string(),
                storage: "1".to_string(),
                bandwidth: "1".to_string(),
                link: "https://example.com".to_string(),
                featured,
                ..Default::default()
            };
            store.create_deal(draft).unwrap();
        }
        SessionState::new(store)
    }

    #[test]
    fn test_new_session_shows_everything() {
        let session = session_with_deals();
        assert_eq!(session.filtered_indices, vec![0, 1]);
    }

    #[test]
    fn test_apply_and_clear_filters() {
        let mut session = session_with_deals();
        session.filter_state.tab = Tab::Featured;
        session.apply_filters();
        assert_eq!(session.filtered_indices, vec![0]);

        session.clear_filters();
        assert_eq!(session.filtered_indices, vec![0, 1]);
    }

    #[test]
    fn test_filtered_snapshot_matches_view() {
        let mut session = session_with_deals();
        session.filter_state.query = "hetzner".to_string();
        session.apply_filters();

        let snapshot = session.filtered_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "Hetzner Cloud");
    }
}
