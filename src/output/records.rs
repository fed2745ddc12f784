use serde::{Deserialize, Serialize};

/// A crawled category; `id` is unique within one crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Decoded page URL
    pub id: String,

    /// Id of the category that first linked here; None for the root
    pub parent_id: Option<String>,

    pub name: String,

    /// The same category in other language editions
    pub languages: Vec<String>,

    pub articles: Vec<ArticleRecord>,
}

/// A member article of a category
///
/// The same article may be listed under several categories; it is not
/// deduplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Decoded page URL
    pub id: String,

    pub name: String,

    /// The same article in other language editions
    pub languages: Vec<String>,

    /// Level-2 sections in document order
    pub sections: Vec<SectionRecord>,
}

impl ArticleRecord {
    /// Sum of the section word counts
    pub fn word_count(&self) -> u64 {
        self.sections.iter().map(|s| s.word_count).sum()
    }
}

/// A level-2 section and the number of words in its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub name: String,
    pub word_count: u64,
}
