// vpsdeals - core/export.rs
//
// CSV and JSON export of a filtered deal view.
// Core layer: writes to any Write trait object; the path parameter is
// used for error context only.

use crate::core::model::Deal;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export deals to CSV format.
///
/// Writes: id, title, provider, price, currency, location, storage, tags,
/// featured, link. Tags are joined with '|'.
pub fn export_csv<W: Write>(deals: &[Deal], writer: W, export_path: &Path) -> Result<usize, ExportError> {
    check_limit(deals.len())?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id", "title", "provider", "price", "currency", "location", "storage", "tags",
            "featured", "link",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for deal in deals {
        let tags = deal.tags.join("|");
        csv_writer
            .write_record([
                deal.id.as_str(),
                deal.title.as_str(),
                deal.provider.name.as_str(),
                deal.price.as_str(),
                deal.currency.as_str(),
                deal.location.as_str(),
                deal.specs.storage.as_str(),
                tags.as_str(),
                if deal.featured { "true" } else { "false" },
                deal.link.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export deals to JSON format (pretty-printed array of canonical records).
pub fn export_json<W: Write>(deals: &[Deal], writer: W, export_path: &Path) -> Result<usize, ExportError> {
    check_limit(deals.len())?;

    serde_json::to_writer_pretty(writer, deals).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(deals.len())
}

fn check_limit(count: usize) -> Result<(), ExportError> {
    if count > constants::MAX_EXPORT_DEALS {
        return Err(ExportError::TooManyDeals {
            count,
            max: constants::MAX_EXPORT_DEALS,
        });
    }
    Ok(())
}
