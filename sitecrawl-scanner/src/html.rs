//! Reduces a page's markup to the plain data the crawl engine needs.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("meta selector is valid"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("a[href] selector is valid"));

/// The `name` and `content` attributes of one `<meta>` tag, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub meta_tags: Vec<MetaTag>,
    /// Raw `href` values of every anchor, unresolved
    pub links: Vec<String>,
}

/// Parse `html` into its meta tags and anchor targets.
///
/// The parser is error-tolerant: malformed markup yields whatever could be
/// recovered, possibly nothing, and never fails.
pub fn parse_page(html: &str) -> ParsedPage {
    if html.trim().is_empty() {
        return ParsedPage::default();
    }

    let document = Html::parse_document(html);

    let meta_tags = document
        .select(&META_SELECTOR)
        .map(|element| {
            let attrs = element.value();
            MetaTag {
                name: attrs.attr("name").map(str::to_string),
                content: attrs.attr("content").map(str::to_string),
            }
        })
        .collect();

    let links = document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    ParsedPage { meta_tags, links }
}
