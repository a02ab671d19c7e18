// vpsdeals - app/data_mgr.rs
//
// Catalog data loading: bundled collections embedded in the binary, with
// optional per-file overrides from a user data directory. A collection
// that fails to parse degrades to empty (or default settings) with a
// warning; loading never aborts.

use crate::core::catalog;
use crate::core::model::{Announcement, Deal, FaqEntry, Page, Provider, SiteSettings};
use crate::util::constants;
use crate::util::error::CatalogError;
use std::path::Path;

/// Everything the application knows at startup.
#[derive(Debug, Default)]
pub struct CatalogData {
    pub deals: Vec<Deal>,
    pub providers: Vec<Provider>,
    pub pages: Vec<Page>,
    pub faqs: Vec<FaqEntry>,
    pub announcements: Vec<Announcement>,
    pub settings: SiteSettings,
}

/// Embedded JSON content for the bundled collections.
/// Each tuple is (file name, JSON content).
pub fn bundled_data_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            constants::DEALS_FILE_NAME,
            include_str!("../../data/deals.json"),
        ),
        (
            constants::PROVIDERS_FILE_NAME,
            include_str!("../../data/providers.json"),
        ),
        (
            constants::PAGES_FILE_NAME,
            include_str!("../../data/pages.json"),
        ),
        (
            constants::FAQS_FILE_NAME,
            include_str!("../../data/faqs.json"),
        ),
        (
            constants::ANNOUNCEMENTS_FILE_NAME,
            include_str!("../../data/announcements.json"),
        ),
        (
            constants::SETTINGS_FILE_NAME,
            include_str!("../../data/settings.json"),
        ),
    ]
}

/// Pick the content for one collection: the user file when it exists and
/// is readable, otherwise the bundled copy.
///
/// Returns `(source_name, content)`; read failures are recorded and fall
/// back to the bundled copy.
fn select_source(
    file_name: &'static str,
    user_dir: Option<&Path>,
    errors: &mut Vec<CatalogError>,
) -> (String, String) {
    let bundled = bundled_data_sources()
        .into_iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, content)| content)
        .unwrap_or("[]");

    if let Some(dir) = user_dir {
        let path = dir.join(file_name);
        if path.is_file() {
            match std::fs::metadata(&path) {
                Ok(meta) if meta.len() > constants::MAX_DATA_FILE_SIZE => {
                    errors.push(CatalogError::FileTooLarge {
                        path: path.clone(),
                        size: meta.len(),
                        max_size: constants::MAX_DATA_FILE_SIZE,
                    });
                }
                _ => match std::fs::read_to_string(&path) {
                    Ok(content) => {
                        tracing::debug!(path = %path.display(), "User data file overrides bundled");
                        return (path.display().to_string(), content);
                    }
                    Err(e) => {
                        errors.push(CatalogError::Io {
                            path: path.clone(),
                            source: e,
                        });
                    }
                },
            }
        }
    }

    (format!("<bundled>/{file_name}"), bundled.to_string())
}

/// Parse one collection, degrading to the provided fallback on failure.
fn load_collection<T>(
    file_name: &'static str,
    user_dir: Option<&Path>,
    errors: &mut Vec<CatalogError>,
    fallback: T,
    parse: impl FnOnce(&str, &str) -> Result<T, CatalogError>,
) -> T {
    let (source_name, content) = select_source(file_name, user_dir, errors);
    match parse(&content, &source_name) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(source = %source_name, error = %e, "Collection failed to parse; using fallback");
            errors.push(e);
            fallback
        }
    }
}

/// Load the full catalog: bundled data plus user-dir overrides.
///
/// Returns the catalog and any non-fatal errors encountered. Every
/// collection independently degrades, so a broken deals file does not
/// take the provider directory down with it.
pub fn load_catalog(user_data_dir: Option<&Path>) -> (CatalogData, Vec<CatalogError>) {
    let mut errors = Vec::new();

    if let Some(dir) = user_data_dir {
        if !dir.is_dir() {
            tracing::debug!(
                dir = %dir.display(),
                "User data directory does not exist (using bundled data)"
            );
        }
    }

    let deals = load_collection(
        constants::DEALS_FILE_NAME,
        user_data_dir,
        &mut errors,
        Vec::new(),
        catalog::parse_deals,
    );
    let providers = load_collection(
        constants::PROVIDERS_FILE_NAME,
        user_data_dir,
        &mut errors,
        Vec::new(),
        catalog::parse_providers,
    );
    let pages = load_collection(
        constants::PAGES_FILE_NAME,
        user_data_dir,
        &mut errors,
        Vec::new(),
        catalog::parse_pages,
    );
    let faqs = load_collection(
        constants::FAQS_FILE_NAME,
        user_data_dir,
        &mut errors,
        Vec::new(),
        catalog::parse_faqs,
    );
    let announcements = load_collection(
        constants::ANNOUNCEMENTS_FILE_NAME,
        user_data_dir,
        &mut errors,
        Vec::new(),
        catalog::parse_announcements,
    );
    let settings = load_collection(
        constants::SETTINGS_FILE_NAME,
        user_data_dir,
        &mut errors,
        SiteSettings::default(),
        catalog::parse_settings,
    );

    tracing::info!(
        deals = deals.len(),
        providers = providers.len(),
        pages = pages.len(),
        faqs = faqs.len(),
        announcements = announcements.len(),
        errors = errors.len(),
        "Catalog loaded"
    );

    (
        CatalogData {
            deals,
            providers,
            pages,
            faqs,
            announcements,
            settings,
        },
        errors,
    )
}
