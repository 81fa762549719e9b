//! HTML parsing helpers shared by the extraction handlers
//!
//! This module handles:
//! - Parsing response bodies into documents
//! - Compiling the configured CSS selectors once per run
//! - Reading anchors (href + visible text) in document order
//! - Converting HTML fragments to markdown

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors used by the extraction handlers
#[derive(Debug, Clone)]
pub struct Selectors {
    pub kb_toc_links: Selector,
    pub kb_article: Selector,
    pub forum_thread_links: Selector,
    pub forum_next_page: Selector,
    pub forum_question: Selector,
    pub forum_answers: Selector,
    pub title: Selector,
}

impl Selectors {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed to parse
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            kb_toc_links: compile_selector(&config.kb_toc_links)?,
            kb_article: compile_selector(&config.kb_article)?,
            forum_thread_links: compile_selector(&config.forum_thread_links)?,
            forum_next_page: compile_selector(&config.forum_next_page)?,
            forum_question: compile_selector(&config.forum_question)?,
            forum_answers: compile_selector(&config.forum_answers)?,
            title: compile_selector("title")?,
        })
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A link discovered on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// The href attribute, trimmed
    pub href: String,

    /// The anchor's visible text, whitespace-collapsed
    pub title: Option<String>,
}

/// Parses a response body into a document tree
///
/// html5ever recovers from malformed markup, so this never fails; a page that
/// is not the expected shape simply matches no selectors.
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Returns the anchors matched by `selector`, in document order
///
/// Anchors without an href, or with an empty one, are skipped.
pub fn discover_links(document: &Html, selector: &Selector) -> Vec<DiscoveredLink> {
    document
        .select(selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            Some(DiscoveredLink {
                href: href.to_string(),
                title: visible_text(&element),
            })
        })
        .collect()
}

/// Collapses the text content of an element; `None` if it is blank
pub fn visible_text(element: &ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Extracts the page title from the `<title>` element
pub fn page_title(document: &Html, selectors: &Selectors) -> Option<String> {
    document
        .select(&selectors.title)
        .next()
        .and_then(|element| visible_text(&element))
}

/// Converts an HTML fragment to trimmed markdown
pub fn fragment_to_markdown(fragment: &str) -> Result<String, std::io::Error> {
    htmd::convert(fragment).map(|markdown| markdown.trim().to_string())
}
