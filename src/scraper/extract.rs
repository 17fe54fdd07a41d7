// extract.rs
use crate::scraper::models::{Listing, NOT_AVAILABLE};
use crate::scraper::ScraperError;
use scraper::{ElementRef, Html, Selector};

pub const SITE_ORIGIN: &str = "https://www.olx.in";

// Current listing marker first, then the one from before the last markup
// change.
const CONTAINER_CHAIN: &[&str] = &["li.EIR5N", "div._2grJG"];

// Obfuscated marker classes rotate when OLX redeploys; the semantic class
// fragments tend to survive, so each chain falls back to those across more
// than one tag type.
const TITLE_CHAIN: &[&str] = &[
    "span._2poNJ",
    "h4._2poNJ",
    r#"span[class*="title"]"#,
    r#"h4[class*="title"]"#,
];
const PRICE_CHAIN: &[&str] = &[
    "span._2Ks63",
    "div._2Ks63",
    r#"span[class*="price"]"#,
    r#"div[class*="price"]"#,
];
const LOCATION_CHAIN: &[&str] = &[
    "span._2VQu4",
    "div._2VQu4",
    r#"span[class*="location"]"#,
    r#"div[class*="location"]"#,
];

/// Selector chains parsed once per run. Each chain is tried in order and
/// the first selector with a match wins.
pub struct ListingSelectors {
    containers: Vec<Selector>,
    title: Vec<Selector>,
    price: Vec<Selector>,
    location: Vec<Selector>,
    anchor: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            containers: parse_chain(CONTAINER_CHAIN)?,
            title: parse_chain(TITLE_CHAIN)?,
            price: parse_chain(PRICE_CHAIN)?,
            location: parse_chain(LOCATION_CHAIN)?,
            anchor: parse_selector("a")?,
        })
    }
}

fn parse_selector(source: &str) -> Result<Selector, ScraperError> {
    Selector::parse(source).map_err(|e| ScraperError::Selector(e.to_string()))
}

fn parse_chain(sources: &[&str]) -> Result<Vec<Selector>, ScraperError> {
    sources.iter().copied().map(parse_selector).collect()
}

/// Pull every listing out of a results page, in document order.
///
/// Fails with `NoListings` when no selector in the container chain matches
/// anything — markup drift, not a thin result set. A container that cannot
/// be read is skipped with a warning and never aborts the rest.
pub fn extract_listings(
    html: &str,
    selectors: &ListingSelectors,
) -> Result<Vec<Listing>, ScraperError> {
    let document = Html::parse_document(html);

    let containers: Vec<ElementRef<'_>> = selectors
        .containers
        .iter()
        .map(|sel| document.select(sel).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    if containers.is_empty() {
        return Err(ScraperError::NoListings);
    }

    let mut listings = Vec::with_capacity(containers.len());
    for container in &containers {
        match extract_listing(container, selectors) {
            Ok(listing) => listings.push(listing),
            Err(e) => eprintln!("⚠️ Skipping listing: {e}"),
        }
    }

    Ok(listings)
}

fn extract_listing(
    container: &ElementRef<'_>,
    selectors: &ListingSelectors,
) -> Result<Listing, ScraperError> {
    let link = extract_link(container, &selectors.anchor)?;

    Ok(Listing {
        title: field_text(container, &selectors.title),
        price: field_text(container, &selectors.price),
        location: field_text(container, &selectors.location),
        link,
    })
}

fn first_match<'a>(scope: &ElementRef<'a>, chain: &[Selector]) -> Option<ElementRef<'a>> {
    chain.iter().find_map(|sel| scope.select(sel).next())
}

fn field_text(scope: &ElementRef<'_>, chain: &[Selector]) -> String {
    match first_match(scope, chain) {
        Some(el) => {
            let text = el.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                text
            }
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

fn extract_link(scope: &ElementRef<'_>, anchor: &Selector) -> Result<String, ScraperError> {
    let element = match scope.select(anchor).next() {
        Some(el) => el,
        None => return Ok(NOT_AVAILABLE.to_string()),
    };

    let href = element
        .value()
        .attr("href")
        .ok_or_else(|| ScraperError::BadListing("anchor without href".to_string()))?;

    if href.starts_with("http") {
        Ok(href.to_string())
    } else {
        Ok(format!("{SITE_ORIGIN}{href}"))
    }
}
