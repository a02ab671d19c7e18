// vpsdeals - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "vpsdeals";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "vpsdeals";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Data files
// =============================================================================

/// Deal collection file name (bundled and user-dir override).
pub const DEALS_FILE_NAME: &str = "deals.json";

/// Provider collection file name.
pub const PROVIDERS_FILE_NAME: &str = "providers.json";

/// Static page collection file name.
pub const PAGES_FILE_NAME: &str = "pages.json";

/// FAQ collection file name.
pub const FAQS_FILE_NAME: &str = "faqs.json";

/// Announcement collection file name.
pub const ANNOUNCEMENTS_FILE_NAME: &str = "announcements.json";

/// Site settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Maximum size of a single user data file in bytes. Larger files are
/// rejected before parsing so a stray multi-gigabyte file cannot be
/// slurped into memory.
pub const MAX_DATA_FILE_SIZE: u64 = 8 * 1024 * 1024; // 8 MB

// =============================================================================
// Site settings ranges
// =============================================================================

/// Default number of deals shown per page.
pub const DEFAULT_DEALS_PER_PAGE: usize = 12;

/// Minimum configurable deals-per-page value.
pub const MIN_DEALS_PER_PAGE: usize = 1;

/// Maximum configurable deals-per-page value.
pub const MAX_DEALS_PER_PAGE: usize = 100;

/// Default number of featured deals on the home view.
pub const DEFAULT_FEATURED_DEALS_COUNT: usize = 6;

/// Minimum configurable featured-deals count.
pub const MIN_FEATURED_DEALS_COUNT: usize = 1;

/// Maximum configurable featured-deals count.
pub const MAX_FEATURED_DEALS_COUNT: usize = 24;

/// Default currency code for deals that do not declare one.
pub const DEFAULT_CURRENCY: &str = "USD";

// =============================================================================
// Stats
// =============================================================================

/// Maximum provider rows in the per-provider deal-count breakdown.
pub const MAX_PROVIDER_STATS: usize = 10;

/// Maximum tag rows in the per-tag deal-count breakdown.
pub const MAX_TAG_STATS: usize = 15;

/// A deal with no explicit featured flag still counts as featured in stats
/// when its original price exceeds the current price by this factor.
pub const FEATURED_DISCOUNT_FACTOR: f64 = 1.2;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of deals that can be exported in a single operation.
pub const MAX_EXPORT_DEALS: usize = 100_000;

// =============================================================================
// CLI display
// =============================================================================

/// Default maximum number of deal rows printed by the CLI.
pub const DEFAULT_DISPLAY_ROWS: usize = 50;

/// Minimum configurable display row limit.
pub const MIN_DISPLAY_ROWS: usize = 1;

/// Maximum configurable display row limit.
pub const MAX_DISPLAY_ROWS: usize = 10_000;

// =============================================================================
// Validation
// =============================================================================

/// Maximum number of tags accepted on a single deal draft.
pub const MAX_TAGS_PER_DEAL: usize = 20;

/// Maximum number of feature strings accepted on a single deal draft.
pub const MAX_FEATURES_PER_DEAL: usize = 20;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
