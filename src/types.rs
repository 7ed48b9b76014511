//! Core types for artvee-dl

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single artwork record scraped from the catalog.
///
/// Constructed by the listing-page parser with `url`, `title` and `category`
/// populated; the trailing-parenthetical split may then move a date out of the
/// title and an origin out of the artist line. The worker task attaches the
/// image bytes after a successful download, and the record is handed to the
/// writer exactly once. Each record is exclusively owned by the worker task
/// processing it, so no synchronization is needed at the record level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artwork {
    /// Source detail-page URL; unique key within a run
    pub url: String,
    /// Artwork title (with any trailing parenthetical date removed)
    pub title: String,
    /// Date extracted from a trailing parenthetical on the title, if any
    pub date: Option<String>,
    /// Artist name; `"Unknown"` when the listing carries no artist element
    pub artist: String,
    /// Origin extracted from a trailing parenthetical on the artist line
    pub origin: Option<String>,
    /// Catalog category label; `"Unknown"` when scraping arbitrary URLs
    pub category: String,
    /// Raw image bytes; absent until successfully downloaded
    #[serde(skip)]
    pub image: Option<Bytes>,
}

impl Artwork {
    /// Create a new record as the listing parser sees it: metadata only.
    pub fn new(url: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            date: None,
            artist: "Unknown".to_string(),
            origin: None,
            category: category.into(),
            image: None,
        }
    }

    /// The last path segment of the detail-page URL, used by writers to
    /// derive stable file names (e.g. `https://artvee.com/dl/the-wave/` →
    /// `the-wave`). Falls back to a sanitized title when the URL has no
    /// usable segment.
    pub fn slug(&self) -> String {
        let segment = self
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("");
        if !segment.is_empty() && segment != "https:" && segment != "http:" {
            return segment.to_string();
        }
        self.title
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect::<String>()
            .trim_matches('-')
            .to_string()
    }
}

impl std::fmt::Display for Artwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.artist, self.url)
    }
}

/// Catalog section identifiers.
///
/// Closed set of the 12 sections the catalog exposes; each maps to the URL
/// path segment used in listing-page URLs. Ordering is defined over the
/// underlying path segment (lexicographic) so that multi-category runs are
/// deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Abstract art
    Abstract,
    /// Animal studies
    Animals,
    /// Asian art
    AsianArt,
    /// Botanical illustration
    Botanical,
    /// Drawings
    Drawings,
    /// Figurative art
    Figurative,
    /// Illustration
    Illustration,
    /// Landscapes
    Landscape,
    /// Mythology
    Mythology,
    /// Posters
    Posters,
    /// Religious art
    Religion,
    /// Still life
    StillLife,
}

impl Category {
    /// Every catalog section, used when a run requests no explicit categories.
    pub const ALL: [Category; 12] = [
        Category::Abstract,
        Category::Animals,
        Category::AsianArt,
        Category::Botanical,
        Category::Drawings,
        Category::Figurative,
        Category::Illustration,
        Category::Landscape,
        Category::Mythology,
        Category::Posters,
        Category::Religion,
        Category::StillLife,
    ];

    /// The URL path segment for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Abstract => "abstract",
            Category::Animals => "animals",
            Category::AsianArt => "asian-art",
            Category::Botanical => "botanical",
            Category::Drawings => "drawings",
            Category::Figurative => "figurative",
            Category::Illustration => "illustration",
            Category::Landscape => "landscape",
            Category::Mythology => "mythology",
            Category::Posters => "posters",
            Category::Religion => "religion",
            Category::StillLife => "still-life",
        }
    }

    /// Human-facing label stored on scraped records (`asian-art` → `Asian-art`).
    pub fn label(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

// Ordering is over the path segment, not declaration order, so that adding a
// variant in the wrong place cannot silently change run order.
impl Ord for Category {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::error::Error::config(format!("unknown category '{s}'"), "categories"))
    }
}

/// Image resolution tier offered by the source CDN.
///
/// Each tier is bound to a distinct URL prefix; the detail-page resolver uses
/// the prefix as a string matcher when selecting among candidate download
/// links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Full-resolution download (requires a premium account upstream)
    Max,
    /// Standard-resolution download
    #[default]
    Standard,
}

impl ImageSize {
    /// The CDN URL prefix bound to this tier.
    pub fn url_prefix(&self) -> &'static str {
        match self {
            ImageSize::Max => "https://mdl.artvee.com/hdl/",
            ImageSize::Standard => "https://mdl.artvee.com/sdl/",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSize::Max => f.write_str("max"),
            ImageSize::Standard => f.write_str("standard"),
        }
    }
}

/// Completion summary for a scraper run.
///
/// Aggregated by the orchestrator as pages complete; per-record outcomes are
/// folded in as each page's worker set drains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Listing pages fetched and parsed
    pub pages_processed: u64,
    /// Records parsed from listing pages and submitted to workers
    pub records_parsed: u64,
    /// Records successfully persisted by the writer
    pub records_written: u64,
    /// Records that failed at any step (missing link, fetch, writer rejection)
    pub records_failed: u64,
}
