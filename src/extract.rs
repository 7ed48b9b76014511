//! HTML extraction for listing pages, detail pages and pagination controls
//!
//! Everything here is pure: functions take page content as a string and
//! return owned data, so no parsed document is ever held across an await
//! point. Malformed content never panics or errors out of this module; a
//! block that cannot be parsed is logged and skipped so one bad item cannot
//! discard the rest of a page.

use crate::types::{Artwork, ImageSize};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Splits `<text> (<text>)` into main text and trailing parenthetical.
///
/// The first group is greedy, so only the last parenthetical is treated as
/// trailing metadata: `"A (B) (C)"` splits into `"A (B)"` and `"C"`.
#[allow(clippy::expect_used)] // fixed literal, cannot fail at runtime
static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\s*\((.+)\)\s*$").expect("valid regex literal"));

/// Extracts the total item count from result-count text like
/// `"Showing 1–70 of 134 items"`.
#[allow(clippy::expect_used)] // fixed literal, cannot fail at runtime
static RESULT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"of\s+(\d+)\s+items").expect("valid regex literal"));

struct Selectors {
    metadata_block: Selector,
    title: Selector,
    anchor: Selector,
    artist: Selector,
    result_count: Selector,
    pagination: Selector,
    page_label: Selector,
    download_action: Selector,
}

#[allow(clippy::expect_used)] // fixed literals, cannot fail at runtime
static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    let parse = |s: &str| Selector::parse(s).expect("valid selector literal");
    Selectors {
        metadata_block: parse("div.product-element-bottom"),
        title: parse("h3.product-title"),
        anchor: parse("a"),
        artist: parse("div.woodmart-product-brands-links"),
        result_count: parse("p.woocommerce-result-count"),
        pagination: parse("ul.page-numbers"),
        page_label: parse("a.page-numbers, span.page-numbers"),
        download_action: parse(
            "a.prem-link.gr.btn.dis.snax-action.snax-action-add-to-collection.snax-action-add-to-collection-downloads",
        ),
    }
});

/// Parse one listing page into partially-populated artwork records
/// (metadata only, no image bytes).
///
/// Returns one record per well-formed metadata block, in page order.
pub fn parse_listing(html: &str, category: &str) -> Vec<Artwork> {
    let document = Html::parse_document(html);
    document
        .select(&SELECTORS.metadata_block)
        .filter_map(|block| parse_metadata_block(block, category))
        .collect()
}

/// Parse a single metadata block into a record, or skip it with a log line.
fn parse_metadata_block(block: ElementRef<'_>, category: &str) -> Option<Artwork> {
    let Some(title_el) = block.select(&SELECTORS.title).next() else {
        tracing::warn!("title element not found in metadata block, skipping item");
        return None;
    };
    let Some(url) = title_el
        .select(&SELECTORS.anchor)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        tracing::warn!("detail-page link not found in metadata block, skipping item");
        return None;
    };

    let raw_title = collapse_text(title_el);
    let mut artwork = Artwork::new(url, raw_title.as_str(), category);

    if let Some((title, date)) = split_trailing_parenthetical(&raw_title) {
        artwork.title = title;
        artwork.date = Some(date);
    }

    if let Some(artist_el) = block.select(&SELECTORS.artist).next() {
        let artist_text = collapse_text(artist_el);
        match split_trailing_parenthetical(&artist_text) {
            Some((artist, origin)) => {
                artwork.artist = artist;
                artwork.origin = Some(origin);
            }
            None => artwork.artist = artist_text,
        }
    } else {
        tracing::warn!(url = %artwork.url, "artist information not found");
    }

    Some(artwork)
}

/// Split a trailing parenthetical off a title or artist line.
///
/// Returns `(main text, parenthetical)` with surrounding whitespace trimmed,
/// or `None` when the text carries no trailing parenthetical.
pub fn split_trailing_parenthetical(text: &str) -> Option<(String, String)> {
    let caps = TRAILING_PAREN.captures(text)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Total item count advertised by a category listing page's result-count
/// indicator, or `None` when the indicator is missing or unparsable.
pub fn total_item_count(html: &str) -> Option<u32> {
    let document = Html::parse_document(html);
    let indicator = document.select(&SELECTORS.result_count).next()?;
    let text = collapse_text(indicator);
    let caps = RESULT_COUNT.captures(&text)?;
    caps[1].parse().ok()
}

/// Highest numeric page label in the pagination control, or `None` when the
/// control is absent or carries no parseable numbers.
///
/// Both link and current-page markers count, so an ellipsis-adjacent jump
/// target like `5` in `{1, 2, 3, …, 5}` wins.
pub fn max_page_number(html: &str) -> Option<u32> {
    let document = Html::parse_document(html);
    let pagination = document.select(&SELECTORS.pagination).next()?;
    pagination
        .select(&SELECTORS.page_label)
        .filter_map(|label| collapse_text(label).parse::<u32>().ok())
        .max()
}

/// The first premium-download link on a detail page whose target matches the
/// requested size tier's CDN prefix.
pub fn download_link(html: &str, size: ImageSize) -> Option<String> {
    download_link_with_prefix(html, size.url_prefix())
}

/// [`download_link`] with an explicit prefix instead of a tier's canonical
/// CDN prefix.
pub fn download_link_with_prefix(html: &str, prefix: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SELECTORS.download_action)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find(|href| href.starts_with(prefix))
        .map(str::to_string)
}

fn collapse_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const DOWNLOAD_CLASSES: &str = "prem-link gr btn dis snax-action snax-action-add-to-collection snax-action-add-to-collection-downloads";

    fn listing_block(href: &str, title: &str, artist: Option<&str>) -> String {
        let artist_html = artist
            .map(|a| format!(r#"<div class="woodmart-product-brands-links">{a}</div>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="product-element-bottom">
                 <h3 class="product-title"><a href="{href}">{title}</a></h3>
                 {artist_html}
               </div>"#
        )
    }

    #[test]
    fn split_extracts_trailing_parenthetical() {
        let (title, date) = split_trailing_parenthetical("Irises (1889)").unwrap();
        assert_eq!(title, "Irises");
        assert_eq!(date, "1889");
    }

    #[test]
    fn split_tolerates_surrounding_whitespace() {
        let (title, date) = split_trailing_parenthetical("  The Wave  (ca. 1830)  ").unwrap();
        assert_eq!(title, "The Wave");
        assert_eq!(date, "ca. 1830");
    }

    #[test]
    fn split_is_greedy_on_the_main_text() {
        // Only the last parenthetical is trailing metadata
        let (title, date) = split_trailing_parenthetical("Study (head) (1902)").unwrap();
        assert_eq!(title, "Study (head)");
        assert_eq!(date, "1902");
    }

    #[test]
    fn split_returns_none_without_trailing_parenthetical() {
        assert!(split_trailing_parenthetical("Untitled").is_none());
        assert!(split_trailing_parenthetical("(1900) Untitled").is_none());
        assert!(split_trailing_parenthetical("").is_none());
    }

    #[test]
    fn listing_parses_title_date_artist_origin() {
        let html = listing_block(
            "https://artvee.com/dl/irises/",
            "Irises (1889)",
            Some("Vincent van Gogh (Dutch, 1853-1890)"),
        );
        let artworks = parse_listing(&html, "Abstract");

        assert_eq!(artworks.len(), 1);
        let artwork = &artworks[0];
        assert_eq!(artwork.url, "https://artvee.com/dl/irises/");
        assert_eq!(artwork.title, "Irises");
        assert_eq!(artwork.date.as_deref(), Some("1889"));
        assert_eq!(artwork.artist, "Vincent van Gogh");
        assert_eq!(artwork.origin.as_deref(), Some("Dutch, 1853-1890"));
        assert_eq!(artwork.category, "Abstract");
        assert!(artwork.image.is_none());
    }

    #[test]
    fn listing_keeps_title_unchanged_without_parenthetical() {
        let html = listing_block("https://artvee.com/dl/x/", "Untitled", Some("Anon"));
        let artworks = parse_listing(&html, "Posters");

        assert_eq!(artworks[0].title, "Untitled");
        assert!(artworks[0].date.is_none());
        assert_eq!(artworks[0].artist, "Anon");
        assert!(artworks[0].origin.is_none());
    }

    #[test]
    fn listing_defaults_missing_artist_to_unknown() {
        let html = listing_block("https://artvee.com/dl/x/", "Quiet Field", None);
        let artworks = parse_listing(&html, "Landscape");

        assert_eq!(artworks[0].artist, "Unknown");
        assert!(artworks[0].origin.is_none());
    }

    #[test]
    fn malformed_blocks_are_skipped_and_order_preserved() {
        // Two well-formed blocks with a link-less and a title-less block interleaved
        let html = format!(
            r#"{}
               <div class="product-element-bottom">
                 <h3 class="product-title">No link here</h3>
               </div>
               <div class="product-element-bottom">
                 <div class="woodmart-product-brands-links">Orphan Artist</div>
               </div>
               {}"#,
            listing_block("https://artvee.com/dl/first/", "First", Some("A")),
            listing_block("https://artvee.com/dl/second/", "Second", Some("B")),
        );
        let artworks = parse_listing(&html, "Drawings");

        assert_eq!(artworks.len(), 2);
        assert_eq!(artworks[0].title, "First");
        assert_eq!(artworks[1].title, "Second");
    }

    #[test]
    fn empty_page_parses_to_no_records() {
        assert!(parse_listing("<html><body></body></html>", "Posters").is_empty());
    }

    #[test]
    fn result_count_is_extracted() {
        let html = r#"<p class="woocommerce-result-count">Showing 1&ndash;70 of 134 items</p>"#;
        assert_eq!(total_item_count(html), Some(134));
    }

    #[test]
    fn unparsable_result_count_yields_none() {
        let html = r#"<p class="woocommerce-result-count">Showing all results</p>"#;
        assert_eq!(total_item_count(html), None);
        assert_eq!(total_item_count("<p>no indicator</p>"), None);
    }

    #[test]
    fn max_page_number_takes_the_highest_label() {
        // 5 is an ellipsis-adjacent jump target
        let html = r#"
            <ul class="page-numbers">
              <li><span class="page-numbers current">1</span></li>
              <li><a class="page-numbers" href="/page/2/">2</a></li>
              <li><a class="page-numbers" href="/page/3/">3</a></li>
              <li><span class="page-numbers dots">&hellip;</span></li>
              <li><a class="page-numbers" href="/page/5/">5</a></li>
            </ul>"#;
        assert_eq!(max_page_number(html), Some(5));
    }

    #[test]
    fn absent_pagination_control_yields_none() {
        assert_eq!(max_page_number("<html><body></body></html>"), None);
    }

    #[test]
    fn pagination_with_no_numeric_labels_yields_none() {
        let html = r#"
            <ul class="page-numbers">
              <li><a class="page-numbers next" href="/page/2/">Next</a></li>
            </ul>"#;
        assert_eq!(max_page_number(html), None);
    }

    #[test]
    fn download_link_matches_requested_tier_prefix() {
        let html = format!(
            r#"<a class="{DOWNLOAD_CLASSES}" href="https://mdl.artvee.com/hdl/107680ab.jpg">Max</a>
               <a class="{DOWNLOAD_CLASSES}" href="https://mdl.artvee.com/sdl/107680sd.jpg">Standard</a>"#
        );

        assert_eq!(
            download_link(&html, ImageSize::Standard).as_deref(),
            Some("https://mdl.artvee.com/sdl/107680sd.jpg")
        );
        assert_eq!(
            download_link(&html, ImageSize::Max).as_deref(),
            Some("https://mdl.artvee.com/hdl/107680ab.jpg")
        );
    }

    #[test]
    fn download_link_ignores_anchors_without_action_classes() {
        let html = r#"<a class="prem-link" href="https://mdl.artvee.com/sdl/x.jpg">almost</a>"#;
        assert_eq!(download_link(html, ImageSize::Standard), None);
    }

    #[test]
    fn download_link_yields_none_when_tier_unavailable() {
        let html = format!(
            r#"<a class="{DOWNLOAD_CLASSES}" href="https://mdl.artvee.com/hdl/only-max.jpg">Max</a>"#
        );
        assert_eq!(download_link(&html, ImageSize::Standard), None);
    }
}
