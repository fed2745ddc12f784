//! Read-only view over crawled records, keyed by language
//!
//! Loads the record files written by a crawl and answers the lookups the
//! comparative analysis needs: which ids exist, which of them have a
//! counterpart in another language, and how many words an article has.

mod index;

pub use index::{CrossLanguageIndex, IndexConflict};

use crate::output::{data_file_name, read_records, CategoryRecord};
use crate::WikitreeError;
use std::collections::HashMap;
use std::path::Path;

struct LanguageData {
    records: Vec<CategoryRecord>,
    index: CrossLanguageIndex,
}

/// Records and cross-language indexes for several language editions
#[derive(Default)]
pub struct Dataset {
    languages: HashMap<String, LanguageData>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the records for a language key and indexes them
    ///
    /// Returns the cross-language links that were declared by more than one
    /// record; the first declaration is kept.
    pub fn insert(&mut self, key: &str, records: Vec<CategoryRecord>) -> Vec<IndexConflict> {
        let (index, conflicts) = CrossLanguageIndex::build(&records);
        for conflict in &conflicts {
            tracing::warn!(
                "{} already exists in index for key {} (kept {}, ignored {})",
                conflict.link,
                key,
                conflict.existing_id,
                conflict.rejected_id
            );
        }
        self.languages
            .insert(key.to_string(), LanguageData { records, index });
        conflicts
    }

    /// Loads `data_<key>.json` from `directory`
    pub fn load(&mut self, directory: &Path, key: &str) -> Result<Vec<IndexConflict>, WikitreeError> {
        let path = directory.join(data_file_name(key));
        let records = read_records(&path)?;
        tracing::info!("Loaded {} categories for {}", records.len(), key);
        Ok(self.insert(key, records))
    }

    /// Records for a language key; empty if the key was never loaded
    pub fn categories(&self, key: &str) -> &[CategoryRecord] {
        self.languages
            .get(key)
            .map(|data| data.records.as_slice())
            .unwrap_or_default()
    }

    pub fn index(&self, key: &str) -> Option<&CrossLanguageIndex> {
        self.languages.get(key).map(|data| &data.index)
    }

    /// Category ids followed by their article ids, category by category
    pub fn all_ids(&self, key: &str) -> Vec<&str> {
        self.categories(key)
            .iter()
            .flat_map(|category| {
                std::iter::once(category.id.as_str())
                    .chain(category.articles.iter().map(|a| a.id.as_str()))
            })
            .collect()
    }

    pub fn category_ids(&self, key: &str) -> Vec<&str> {
        self.categories(key).iter().map(|c| c.id.as_str()).collect()
    }

    /// Article ids in record order; repeated articles appear repeatedly
    pub fn article_ids(&self, key: &str) -> Vec<&str> {
        self.categories(key)
            .iter()
            .flat_map(|c| c.articles.iter().map(|a| a.id.as_str()))
            .collect()
    }

    /// Keeps the ids that some record under `key` declares as a
    /// cross-language equivalent
    pub fn filter_matching<'a>(&self, ids: &[&'a str], key: &str) -> Vec<&'a str> {
        self.partition_ids(ids, key, true)
    }

    /// Keeps the ids with no counterpart declared under `key`
    pub fn filter_not_matching<'a>(&self, ids: &[&'a str], key: &str) -> Vec<&'a str> {
        self.partition_ids(ids, key, false)
    }

    fn partition_ids<'a>(&self, ids: &[&'a str], key: &str, matching: bool) -> Vec<&'a str> {
        let index = self.index(key);
        ids.iter()
            .copied()
            .filter(|id| index.is_some_and(|index| index.contains(id)) == matching)
            .collect()
    }

    /// Total words across the sections of the first article with this id;
    /// zero if the article is unknown
    pub fn article_word_count(&self, key: &str, article_id: &str) -> u64 {
        self.categories(key)
            .iter()
            .flat_map(|c| c.articles.iter())
            .find(|a| a.id == article_id)
            .map(|a| a.word_count())
            .unwrap_or(0)
    }
}
