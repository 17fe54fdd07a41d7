use crate::scraper::{OlxScraper, ScrapeOutcome};
use std::path::Path;

mod export;
mod scraper;

const OUTPUT_DIR: &str = "output";

fn main() {
    println!("🚗 OLX car cover scraper");

    let olx = match OlxScraper::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Scraper init failed: {e}");
            return;
        }
    };

    match olx.run(Path::new(OUTPUT_DIR)) {
        Ok(ScrapeOutcome::Saved { path, count }) => {
            println!("✅ Success! Saved {count} listings to {}", path.display());
        }
        Ok(ScrapeOutcome::NoData) => {
            println!("No data scraped, nothing to write.");
        }
        Ok(ScrapeOutcome::NoListings) => {
            eprintln!("❌ No listings found. Possible issues:");
            eprintln!("   - OLX updated their HTML structure");
            eprintln!("   - The page requires JavaScript rendering");
        }
        Ok(ScrapeOutcome::Blocked { reason }) => {
            eprintln!("❌ Access denied ({reason}). OLX might be blocking scrapers.");
        }
        Ok(ScrapeOutcome::Exhausted { attempts }) => {
            eprintln!("❌ Max retries reached ({attempts}). Possible solutions:");
            eprintln!("   1. Try again later (OLX might be rate-limiting)");
            eprintln!("   2. Use a VPN or a different network path");
            eprintln!("   3. Render the page with a scripting-capable browser");
        }
        Err(e) => {
            eprintln!("❌ An error occurred: {e}");
        }
    }
}
