// vpsdeals - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Config and catalog loading
// 4. Filter application, display, stats, and export

use clap::Parser;
use std::path::PathBuf;
use vpsdeals::app::{data_mgr, state::SessionState, store::CatalogStore};
use vpsdeals::core::export;
use vpsdeals::core::model::{CategoryFilter, Tab};
use vpsdeals::platform::config::{load_config, PlatformPaths};
use vpsdeals::util::{constants, error::ExportError, logging};

/// vpsdeals - VPS hosting deals catalog.
///
/// Browse, search, and filter the bundled deal catalog, or point it at a
/// directory of override data files.
#[derive(Parser, Debug)]
#[command(name = "vpsdeals", version, about)]
struct Cli {
    /// Directory containing catalog override files (deals.json etc.).
    data_dir: Option<PathBuf>,

    /// Free-text search over title, provider, location, and tags.
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Category filter id, repeatable (featured, north-america, europe,
    /// ssd, high-performance, budget). Multiple filters are OR-combined.
    #[arg(short = 'f', long = "filter")]
    filters: Vec<String>,

    /// Active tab (All, Featured, "US Datacenter", SSD, CN2,
    /// "Annual Discount").
    #[arg(short = 't', long = "tab")]
    tab: Option<String>,

    /// Print catalog statistics instead of the deal list.
    #[arg(long)]
    stats: bool,

    /// Export the filtered deals to this path (.json exports JSON,
    /// anything else CSV).
    #[arg(long)]
    export: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and config before logging so the configured
    // level can take effect.
    let platform_paths = PlatformPaths::resolve();
    let (config, config_warnings) = load_config(&platform_paths.config_dir);

    logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "vpsdeals starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    // Data directory: CLI argument > config > platform data dir.
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| platform_paths.data_dir.clone());

    let (catalog, load_errors) = data_mgr::load_catalog(Some(&data_dir));
    for err in &load_errors {
        tracing::warn!(error = %err, "Catalog loading warning");
    }

    let mut session = SessionState::new(CatalogStore::new(catalog));

    // Assemble the filter state from CLI arguments. Unknown filter ids
    // and tab labels are reported and ignored rather than fatal.
    if let Some(query) = cli.query {
        session.filter_state.query = query;
    }
    for id in &cli.filters {
        match CategoryFilter::from_id(id) {
            Some(filter) => {
                session.filter_state.categories.insert(filter);
            }
            None => {
                let known: Vec<&str> = CategoryFilter::all().iter().map(|c| c.id()).collect();
                eprintln!("Warning: unknown filter '{id}' ignored (known: {})", known.join(", "));
            }
        }
    }
    if let Some(ref label) = cli.tab {
        match Tab::from_label(label) {
            Some(tab) => session.filter_state.tab = tab,
            None => {
                let known: Vec<&str> = Tab::all().iter().map(|t| t.label()).collect();
                eprintln!("Warning: unknown tab '{label}' ignored (known: {})", known.join(", "));
            }
        }
    }

    session.apply_filters();

    if cli.stats {
        print_stats(&session);
    } else {
        print_deals(&session, config.max_rows);
    }

    if let Some(ref path) = cli.export {
        match run_export(&session, path) {
            Ok(count) => println!("Exported {count} deals to {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn print_deals(session: &SessionState, max_rows: usize) {
    let total = session.store.deals().len();
    let matched = session.filtered_indices.len();
    println!("Found {matched} of {total} deals");

    for deal in session.filtered_deals().take(max_rows) {
        let featured = if deal.featured { " [featured]" } else { "" };
        println!(
            "  {:<12} {} | {} | {} {} | {}{}",
            deal.id,
            deal.title,
            if deal.provider.name.is_empty() {
                "(no provider)"
            } else {
                &deal.provider.name
            },
            deal.price,
            deal.currency,
            deal.location,
            featured,
        );
    }

    if matched > max_rows {
        println!("  ... {} more (raise [display] max_rows to see them)", matched - max_rows);
    }
}

fn print_stats(session: &SessionState) {
    let stats = session.store.stats();
    println!("Catalog statistics");
    println!("  Total deals:     {}", stats.total_deals);
    println!("  Featured deals:  {}", stats.featured_deals);
    println!("  Providers:       {}", stats.total_providers);

    println!("  Deals by provider:");
    for (name, count) in &stats.provider_counts {
        println!("    {count:>4}  {name}");
    }
    println!("  Deals by region:");
    for (name, count) in &stats.region_counts {
        println!("    {count:>4}  {name}");
    }
    println!("  Deals by tag:");
    for (name, count) in &stats.tag_counts {
        println!("    {count:>4}  {name}");
    }
}

fn run_export(session: &SessionState, path: &PathBuf) -> Result<usize, ExportError> {
    let deals = session.filtered_snapshot();
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.clone(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        export::export_json(&deals, writer, path)
    } else {
        export::export_csv(&deals, writer, path)
    }
}
