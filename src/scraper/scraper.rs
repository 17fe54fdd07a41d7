// scraper.rs
use crate::export::export_listings_csv;
use crate::scraper::extract::{extract_listings, ListingSelectors};
use crate::scraper::ScraperError;
use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LISTINGS_URL: &str = "https://www.olx.in/items/q-car-cover";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY_SECS: u64 = 5;

// OLX rejects the default reqwest identity outright; rotate between a few
// real browser strings instead.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0",
];

/// Where a bounded fetch loop ended up.
#[derive(Debug)]
pub enum RetryOutcome {
    Succeeded(String),
    Blocked(String),
    Exhausted {
        attempts: u32,
        last_error: ScraperError,
    },
}

/// Terminal result of one full pipeline run.
#[derive(Debug)]
pub enum ScrapeOutcome {
    Saved { path: PathBuf, count: usize },
    NoData,
    NoListings,
    Blocked { reason: String },
    Exhausted { attempts: u32 },
}

pub struct OlxScraper {
    client: Client,
}

impl OlxScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch, extract and persist one results page.
    ///
    /// Every outcome that is not a hard internal failure comes back as a
    /// `ScrapeOutcome` so the caller can log it; only IO/CSV trouble after a
    /// successful extraction surfaces as `Err`. Nothing is written unless at
    /// least one record survived extraction.
    pub fn run(&self, out_dir: &Path) -> Result<ScrapeOutcome, ScraperError> {
        let selectors = ListingSelectors::new()?;

        let html = match self.fetch_page_with_retry() {
            RetryOutcome::Succeeded(html) => html,
            RetryOutcome::Blocked(reason) => return Ok(ScrapeOutcome::Blocked { reason }),
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                eprintln!("❌ Giving up after {attempts} attempts: {last_error}");
                return Ok(ScrapeOutcome::Exhausted { attempts });
            }
        };

        #[cfg(debug_assertions)]
        {
            std::fs::write("olx_debug.html", &html).map_err(|e| ScraperError::Io(e.to_string()))?;
        }

        let listings = match extract_listings(&html, &selectors) {
            Ok(listings) => listings,
            Err(ScraperError::NoListings) => return Ok(ScrapeOutcome::NoListings),
            Err(e) => return Err(e),
        };

        if listings.is_empty() {
            return Ok(ScrapeOutcome::NoData);
        }

        let count = listings.len();
        let path = export_listings_csv(&listings, out_dir)?;

        Ok(ScrapeOutcome::Saved { path, count })
    }

    fn fetch_page_with_retry(&self) -> RetryOutcome {
        fetch_with_retry(
            MAX_ATTEMPTS,
            Duration::from_secs(RETRY_DELAY_SECS),
            |_attempt| self.fetch_listing_page(),
        )
    }

    /// One GET of the listings page. 403 is terminal; every other failure
    /// mode (transport errors, other non-2xx statuses) is worth a retry.
    fn fetch_listing_page(&self) -> Result<String, ScraperError> {
        let user_agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let response = self
            .client
            .get(LISTINGS_URL)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(ScraperError::Blocked(format!(
                "HTTP 403 from {LISTINGS_URL}"
            )));
        }
        if !status.is_success() {
            return Err(ScraperError::Network(format!(
                "HTTP {status} from {LISTINGS_URL}"
            )));
        }

        response
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))
    }
}

/// Drive `attempt_fn` up to `max_attempts` times with a fixed delay between
/// transport failures. A `Blocked` error ends the loop at once; anything
/// else retries until the ceiling.
pub fn fetch_with_retry<F>(max_attempts: u32, delay: Duration, mut attempt_fn: F) -> RetryOutcome
where
    F: FnMut(u32) -> Result<String, ScraperError>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        eprintln!("📡 Attempt {attempt}/{max_attempts}: fetching listings...");

        match attempt_fn(attempt) {
            Ok(html) => {
                eprintln!("✅ Attempt {attempt} succeeded ({} bytes)", html.len());
                return RetryOutcome::Succeeded(html);
            }
            Err(ScraperError::Blocked(reason)) => {
                return RetryOutcome::Blocked(reason);
            }
            Err(e) => {
                eprintln!("⚠️ Attempt {attempt} failed: {e}");
                last_error = Some(e);

                if attempt < max_attempts {
                    eprintln!("⏳ Waiting {}s before retry...", delay.as_secs());
                    std::thread::sleep(delay);
                }
            }
        }
    }

    RetryOutcome::Exhausted {
        attempts: max_attempts,
        last_error: last_error
            .unwrap_or_else(|| ScraperError::Network("retry loop made no attempts".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_success_makes_one_call() {
        let mut calls = 0;
        let outcome = fetch_with_retry(3, Duration::ZERO, |_| {
            calls += 1;
            Ok("<html></html>".to_string())
        });

        assert_eq!(calls, 1);
        match outcome {
            RetryOutcome::Succeeded(html) => assert_eq!(html, "<html></html>"),
            other => panic!("expected Succeeded, got {other:?}"),
        }
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let mut calls = 0;
        let outcome = fetch_with_retry(3, Duration::ZERO, |_| {
            calls += 1;
            if calls < 3 {
                Err(ScraperError::Network("connection reset".to_string()))
            } else {
                Ok("page".to_string())
            }
        });

        assert_eq!(calls, 3);
        assert!(matches!(outcome, RetryOutcome::Succeeded(_)));
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let mut calls = 0;
        let outcome = fetch_with_retry(3, Duration::ZERO, |_| {
            calls += 1;
            Err(ScraperError::Network("timed out".to_string()))
        });

        assert_eq!(calls, 3);
        match outcome {
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(matches!(last_error, ScraperError::Network(_)));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[test]
    fn blocked_ends_the_loop_immediately() {
        let mut calls = 0;
        let outcome = fetch_with_retry(5, Duration::ZERO, |_| {
            calls += 1;
            Err(ScraperError::Blocked("HTTP 403".to_string()))
        });

        assert_eq!(calls, 1);
        match outcome {
            RetryOutcome::Blocked(reason) => assert_eq!(reason, "HTTP 403"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn non_forbidden_statuses_retry_as_transport_failures() {
        // 500s and friends are classified as Network by fetch_listing_page;
        // the loop must keep retrying them rather than bail.
        let mut calls = 0;
        let outcome = fetch_with_retry(2, Duration::ZERO, |attempt| {
            calls += 1;
            if attempt == 1 {
                Err(ScraperError::Network(
                    "HTTP 503 Service Unavailable".to_string(),
                ))
            } else {
                Ok("recovered".to_string())
            }
        });

        assert_eq!(calls, 2);
        assert!(matches!(outcome, RetryOutcome::Succeeded(_)));
    }
}
