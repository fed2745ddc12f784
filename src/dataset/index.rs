use crate::output::CategoryRecord;
use std::collections::HashMap;

/// A cross-language link already claimed by another record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConflict {
    pub link: String,
    /// Record that declared the link first and keeps it
    pub existing_id: String,
    pub rejected_id: String,
}

/// Maps every cross-language link in one language's records to the id of
/// the record that declared it
///
/// The first declaration wins. Category links are indexed before the
/// links of that category's articles.
#[derive(Debug, Clone, Default)]
pub struct CrossLanguageIndex {
    entries: HashMap<String, String>,
}

impl CrossLanguageIndex {
    /// Builds the index, returning any links declared by two different records
    pub fn build(records: &[CategoryRecord]) -> (Self, Vec<IndexConflict>) {
        let mut index = Self::default();
        let mut conflicts = Vec::new();

        for category in records {
            for link in &category.languages {
                index.claim(link, &category.id, &mut conflicts);
            }
            for article in &category.articles {
                for link in &article.languages {
                    index.claim(link, &article.id, &mut conflicts);
                }
            }
        }

        (index, conflicts)
    }

    fn claim(&mut self, link: &str, id: &str, conflicts: &mut Vec<IndexConflict>) {
        match self.entries.get(link) {
            None => {
                self.entries.insert(link.to_string(), id.to_string());
            }
            Some(existing) if existing != id => conflicts.push(IndexConflict {
                link: link.to_string(),
                existing_id: existing.clone(),
                rejected_id: id.to_string(),
            }),
            Some(_) => {}
        }
    }

    pub fn contains(&self, link: &str) -> bool {
        self.entries.contains_key(link)
    }

    /// Id of the record that declared `link`
    pub fn get(&self, link: &str) -> Option<&str> {
        self.entries.get(link).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
