use serde::Serialize;

/// Sentinel written when the source markup omits a node, keeping the
/// column shape intact.
pub const NOT_AVAILABLE: &str = "N/A";

// listing
//  ├── title     (span._2poNJ, or any *title* class)
//  ├── price     (span._2Ks63, or any *price* class)
//  ├── location  (span._2VQu4, or any *location* class)
//  └── link      (first anchor href, absolutized)

/// One classified-ad entry from the results page. The serde renames
/// double as the CSV header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Link")]
    pub link: String,
}
