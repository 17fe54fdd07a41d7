mod extract;
mod models;
mod scraper;
mod scraper_error;

pub use models::Listing;
pub use scraper::{OlxScraper, ScrapeOutcome};
pub use scraper_error::ScraperError;
