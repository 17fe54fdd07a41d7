use crate::scraper::{Listing, ScraperError};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "olx_car_covers";

/// Write the run's listings to a timestamped CSV under `out_dir`, creating
/// the directory if needed. Header row then one row per listing, input
/// order. Returns the path of the written file.
///
/// Callers skip this entirely for an empty run; the filesystem is only
/// touched once there is something to save.
pub fn export_listings_csv(listings: &[Listing], out_dir: &Path) -> Result<PathBuf, ScraperError> {
    fs::create_dir_all(out_dir).map_err(|e| ScraperError::Io(e.to_string()))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = out_dir.join(format!("{FILE_PREFIX}_{timestamp}.csv"));

    let mut writer =
        csv::Writer::from_path(&path).map_err(|e| ScraperError::Csv(e.to_string()))?;

    for listing in listings {
        writer
            .serialize(listing)
            .map_err(|e| ScraperError::Csv(e.to_string()))?;
    }

    writer.flush().map_err(|e| ScraperError::Io(e.to_string()))?;

    Ok(path)
}
