//! Page adapter: everything that knows about the source site's markup
//!
//! The crawler never touches HTML directly. It hands raw page bodies to a
//! [`PageAdapter`], which returns owned, markup-free summaries. When the
//! site changes its layout, [`Markup`] is the one place to update.

use crate::crawler::sections::extract_sections;
use crate::output::SectionRecord;
use crate::url::{decode_url, resolve_link, PageLink};
use scraper::{Html, Selector};
use url::Url;

/// CSS selectors for the structural markers the crawler depends on
#[derive(Debug, Clone)]
pub struct Markup {
    /// Primary page title
    pub title: &'static str,
    /// Title fallback when the primary element is missing
    pub title_fallback: &'static str,
    /// Links to the same page in other language editions
    pub interlanguage_link: &'static str,
    /// Member article links in the category listing
    pub category_member: &'static str,
    /// Links in the category tree widget
    pub subcategory: &'static str,
    /// Level-2 section heading wrapper
    pub section_heading: &'static str,
    /// Title element inside a section heading
    pub section_heading_text: &'static str,
    /// Trailing boilerplate block that ends all sections
    pub authority_control: &'static str,
}

impl Markup {
    /// Selectors for current MediaWiki (Vector) pages
    pub const MEDIAWIKI: Markup = Markup {
        title: "span.mw-page-title-main",
        title_fallback: "h1#firstHeading",
        interlanguage_link: "a.interlanguage-link-target[href]",
        category_member: "#mw-pages .mw-category a[href][title]",
        subcategory: ".CategoryTreeItem a[href][title]",
        section_heading: ".mw-heading2",
        section_heading_text: "h2",
        authority_control: ".mw-authority-control",
    };
}

impl Default for Markup {
    fn default() -> Self {
        Self::MEDIAWIKI
    }
}

/// What the crawler needs from a category page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPage {
    pub title: String,
    pub languages: Vec<String>,
    pub article_links: Vec<PageLink>,
    pub subcategory_links: Vec<PageLink>,
}

/// What the crawler needs from an article page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePage {
    pub title: String,
    pub languages: Vec<String>,
    pub sections: Vec<SectionRecord>,
}

/// Turns raw page HTML into structured page summaries
///
/// Missing elements produce empty values, never errors.
pub trait PageAdapter {
    /// Extracts a category page fetched from `page_url`
    fn category(&self, html: &str, page_url: &Url) -> CategoryPage;

    /// Extracts an article page
    fn article(&self, html: &str) -> ArticlePage;
}

/// Adapter for MediaWiki-rendered pages
#[derive(Debug, Clone, Default)]
pub struct MediaWikiAdapter {
    markup: Markup,
}

impl MediaWikiAdapter {
    pub fn new(markup: Markup) -> Self {
        Self { markup }
    }
}

impl PageAdapter for MediaWikiAdapter {
    fn category(&self, html: &str, page_url: &Url) -> CategoryPage {
        let document = Html::parse_document(html);

        CategoryPage {
            title: extract_title(&document, &self.markup),
            languages: extract_languages(&document, self.markup.interlanguage_link),
            article_links: extract_links(&document, self.markup.category_member, page_url),
            subcategory_links: extract_links(&document, self.markup.subcategory, page_url),
        }
    }

    fn article(&self, html: &str) -> ArticlePage {
        let document = Html::parse_document(html);

        let sections = match (
            Selector::parse(self.markup.section_heading),
            Selector::parse(self.markup.section_heading_text),
            Selector::parse(self.markup.authority_control),
        ) {
            (Ok(heading), Ok(heading_text), Ok(stop)) => {
                extract_sections(&document, &heading, &heading_text, &stop)
            }
            _ => Vec::new(),
        };

        ArticlePage {
            title: extract_title(&document, &self.markup),
            languages: extract_languages(&document, self.markup.interlanguage_link),
            sections,
        }
    }
}

/// Extracts the page title, trying the primary element then the fallback
fn extract_title(document: &Html, markup: &Markup) -> String {
    [markup.title, markup.title_fallback]
        .into_iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_default()
}

/// Collects decoded interlanguage link targets in page order
///
/// Duplicates are kept; detecting two links for one language is left to
/// whoever indexes the records.
fn extract_languages(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(decode_url)
        .collect()
}

/// Collects links matching `css`, resolved against the page URL
fn extract_links(document: &Html, css: &str, page_url: &Url) -> Vec<PageLink> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect()
}
