//! Link discovery on a category's listing page.

use scraper::{Html, Selector};

use crate::sync::transport::{FetchError, Transport};

/// Suffix a hyperlink must carry to count as a downloadable package.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Fetch `page_url` and return the absolute URL of every archive link on
/// it, in document order.
pub async fn discover(
    transport: &dyn Transport,
    page_url: &str,
    base_url: &str,
) -> Result<Vec<String>, FetchError> {
    let body = transport.fetch(page_url).await?;
    Ok(archive_links(&String::from_utf8_lossy(&body), base_url))
}

/// Extract archive hrefs from an HTML document and resolve them against
/// `base_url`. Relative hrefs are the only kind the listing pages use.
fn archive_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("valid selector");
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.ends_with(ARCHIVE_SUFFIX))
        .map(|href| format!("{base_url}{href}"))
        .collect()
}
