use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScraperError {
    Network(String),
    Blocked(String),
    NoListings,
    BadListing(String),
    Selector(String),
    Io(String),
    Csv(String),
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::Network(msg) => write!(f, "Network error: {msg}"),
            ScraperError::Blocked(msg) => write!(f, "Blocked by site: {msg}"),
            ScraperError::NoListings => write!(f, "No listing containers found"),
            ScraperError::BadListing(msg) => write!(f, "Unreadable listing: {msg}"),
            ScraperError::Selector(msg) => write!(f, "Selector parse error: {msg}"),
            ScraperError::Io(msg) => write!(f, "IO error: {msg}"),
            ScraperError::Csv(msg) => write!(f, "CSV write error: {msg}"),
        }
    }
}

impl Error for ScraperError {}
