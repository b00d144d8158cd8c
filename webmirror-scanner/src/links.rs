use regex::bytes::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Scheme, a dotted host and an optional tail of URL characters that does not
/// end in `.`, `,` or `:`. Word characters are ASCII only.
static LOCATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u)(?:http|https)://[\w\-]+(?:\.[\w\-]+)+(?:[\w\-.,@?^=%&;:/~+#]*[\w\-@?^=%&;/~+#])?",
    )
    .expect("locator pattern is valid")
});

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href], link[href], img[src], script[src]").expect("link selector is valid")
});

/// How links are pulled out of a fetched body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkScan {
    /// Every locator-shaped substring of the raw bytes.
    #[default]
    Raw,
    /// Only hyperlink attributes of HTML documents, resolved against the page.
    Markup,
}

/// Returns every locator-shaped substring of `bytes`, first to last,
/// duplicates included. The body is treated as an opaque blob.
pub fn extract_links(bytes: &[u8]) -> Vec<String> {
    LOCATOR_PATTERN
        .find_iter(bytes)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .collect()
}

/// Returns the targets of `a[href]`, `link[href]`, `img[src]` and
/// `script[src]` in document order, made absolute against `base`.
pub fn extract_markup_links(html: &str, base: &str) -> Vec<String> {
    let Ok(base_url) = Url::parse(base) else {
        debug!("Cannot resolve links against invalid base {}", base);
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|element| {
            let value = element.value();
            value.attr("href").or_else(|| value.attr("src"))
        })
        .filter_map(|reference| resolve_reference(&base_url, reference))
        .collect()
}

fn resolve_reference(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty()
        || reference.starts_with('#')
        || reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(reference).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved.to_string())
}

/// Dispatches on `scan`. Markup scanning only applies to `text/html` bodies.
pub fn scan_links(
    scan: LinkScan,
    bytes: &[u8],
    locator: &str,
    content_type: Option<&str>,
) -> Vec<String> {
    match scan {
        LinkScan::Raw => extract_links(bytes),
        LinkScan::Markup => {
            let is_html = content_type
                .map(|ct| ct.contains("text/html"))
                .unwrap_or(false);
            if is_html {
                extract_markup_links(&String::from_utf8_lossy(bytes), locator)
            } else {
                Vec::new()
            }
        }
    }
}
