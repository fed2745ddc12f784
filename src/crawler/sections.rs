//! Section extraction and word counting for article pages
//!
//! A section is a level-2 heading plus every element sibling that follows
//! it, up to the next heading. Style blocks are skipped. The authority
//! control block ends the sibling stream for every section: nothing at or
//! after it is counted, including sections whose heading comes later.

use crate::output::SectionRecord;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Extracts every level-2 section of an article, in document order
///
/// # Arguments
///
/// * `document` - The parsed article page
/// * `heading` - Matches section heading elements
/// * `heading_text` - Matches the element holding the heading title, inside a heading
/// * `stop_marker` - Matches the boilerplate block that terminates all sections
pub fn extract_sections(
    document: &Html,
    heading: &Selector,
    heading_text: &Selector,
    stop_marker: &Selector,
) -> Vec<SectionRecord> {
    let headings: Vec<ElementRef> = document.select(heading).collect();
    let heading_ids: HashSet<_> = headings.iter().map(|h| h.id()).collect();
    let stop_id = document.select(stop_marker).next().map(|m| m.id());

    let is_stop = |element: &ElementRef| match stop_id {
        Some(id) => element.id() == id || element.descendants().any(|d| d.id() == id),
        None => false,
    };

    headings
        .iter()
        .map(|current| {
            let name = current
                .select(heading_text)
                .next()
                .map(|h| collapse_text(&h))
                .unwrap_or_else(|| collapse_text(current));

            let past_stop = current
                .prev_siblings()
                .filter_map(ElementRef::wrap)
                .any(|sibling| is_stop(&sibling));

            let mut body = Vec::new();
            if !past_stop {
                for sibling in current.next_siblings().filter_map(ElementRef::wrap) {
                    if heading_ids.contains(&sibling.id()) || is_stop(&sibling) {
                        break;
                    }
                    if sibling.value().name() == "style" {
                        continue;
                    }
                    let mut text = String::new();
                    visible_text(sibling, &mut text);
                    body.push(text);
                }
            }

            SectionRecord {
                name,
                word_count: count_words(&body.join(" ")),
            }
        })
        .collect()
}

/// Number of whitespace-separated tokens
pub fn count_words(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Appends the text of an element, skipping embedded style blocks
fn visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if child_element.value().name() != "style" {
                visible_text(child_element, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

fn collapse_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
