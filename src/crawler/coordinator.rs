//! Crawler coordinator - category tree traversal
//!
//! This module walks the category graph depth-first from a root category:
//! - Each category is fetched once; later links to it end that branch
//! - Member articles are fetched and extracted before the category is recorded
//! - Subcategories are visited in page order, each subtree before the next sibling
//!
//! The walk uses an explicit stack instead of recursion. Entries are pushed
//! in reverse page order, so records come out in the same pre-order a
//! recursive walk would produce.

use crate::config::FailurePolicy;
use crate::crawler::fetcher::PageSource;
use crate::crawler::page::{MediaWikiAdapter, PageAdapter};
use crate::crawler::stats::CrawlStats;
use crate::output::{log_start, log_summary, ArticleRecord, CategoryRecord, CrawlSummary};
use crate::url::PageLink;
use crate::WikitreeError;
use std::collections::HashSet;

/// Kind of page a failure occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Category,
    Article,
}

/// A page that was given up on under [`FailurePolicy::Skip`]
#[derive(Debug, Clone)]
pub struct CrawlFailure {
    pub url: String,
    pub kind: PageKind,
    /// Category that linked to the page; None for the root
    pub parent_id: Option<String>,
    pub error: String,
}

/// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlOutcome {
    /// One record per distinct category, in visit order
    pub records: Vec<CategoryRecord>,
    pub stats: CrawlStats,
    /// Always empty under [`FailurePolicy::Abort`]
    pub failures: Vec<CrawlFailure>,
    pub summary: CrawlSummary,
}

/// A category waiting on the stack
struct PendingCategory {
    link: PageLink,
    parent_id: Option<String>,
    /// Only used to indent log lines
    depth: usize,
}

/// Mutable state owned by one call to [`Crawler::crawl`]
struct Traversal {
    records: Vec<CategoryRecord>,
    visited: HashSet<String>,
    stats: CrawlStats,
    failures: Vec<CrawlFailure>,
}

impl Traversal {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            visited: HashSet::new(),
            stats: CrawlStats::new(),
            failures: Vec::new(),
        }
    }
}

/// Category tree crawler
pub struct Crawler<S, A = MediaWikiAdapter> {
    source: S,
    adapter: A,
    policy: FailurePolicy,
}

impl<S: PageSource> Crawler<S> {
    /// Creates a crawler reading MediaWiki pages from `source`
    pub fn new(source: S, policy: FailurePolicy) -> Self {
        Self::with_adapter(source, MediaWikiAdapter::default(), policy)
    }
}

impl<S: PageSource, A: PageAdapter> Crawler<S, A> {
    pub fn with_adapter(source: S, adapter: A, policy: FailurePolicy) -> Self {
        Self {
            source,
            adapter,
            policy,
        }
    }

    /// Crawls the category tree rooted at `root_url`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Records, counters and any skipped pages
    /// * `Err(WikitreeError)` - The root URL is invalid, or a page could not
    ///   be fetched under [`FailurePolicy::Abort`]; nothing collected so far
    ///   is returned
    pub async fn crawl(&self, root_url: &str) -> Result<CrawlOutcome, WikitreeError> {
        let root = PageLink::parse(root_url)?;
        let root_id = root.id.clone();

        log_start(&root_id);

        let mut traversal = Traversal::new();
        let mut stack = vec![PendingCategory {
            link: root,
            parent_id: None,
            depth: 0,
        }];

        while let Some(pending) = stack.pop() {
            let indent = " ".repeat(pending.depth);
            tracing::info!("{}Fetching category URL: {}", indent, pending.link.id);

            if !traversal.visited.insert(pending.link.id.clone()) {
                tracing::warn!("{}Category already fetched: {}", indent, pending.link.id);
                continue;
            }

            traversal.stats.categories += 1;

            match self.visit_category(&pending, &mut traversal).await {
                Ok(subcategories) => {
                    stack.extend(subcategories.into_iter().rev().map(|link| PendingCategory {
                        link,
                        parent_id: Some(pending.link.id.clone()),
                        depth: pending.depth + 1,
                    }));
                }
                Err(e) => match self.policy {
                    FailurePolicy::Abort => {
                        tracing::error!("Crawl of {} aborted: {}", root_id, e);
                        return Err(e);
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!("{}Skipping category {}: {}", indent, pending.link.id, e);
                        traversal.failures.push(CrawlFailure {
                            url: pending.link.id.clone(),
                            kind: PageKind::Category,
                            parent_id: pending.parent_id.clone(),
                            error: e.to_string(),
                        });
                    }
                },
            }
        }

        let summary =
            CrawlSummary::from_stats(&root_id, &traversal.stats, traversal.failures.len());
        log_summary(&summary);
        for failure in &traversal.failures {
            tracing::warn!("Failed {:?} {}: {}", failure.kind, failure.url, failure.error);
        }

        Ok(CrawlOutcome {
            records: traversal.records,
            stats: traversal.stats,
            failures: traversal.failures,
            summary,
        })
    }

    /// Fetches one category and its articles, records it, and returns its
    /// subcategory links
    async fn visit_category(
        &self,
        pending: &PendingCategory,
        traversal: &mut Traversal,
    ) -> Result<Vec<PageLink>, WikitreeError> {
        let indent = " ".repeat(pending.depth);

        let html = self.source.fetch(pending.link.url.as_str()).await?;
        let page = self.adapter.category(&html, &pending.link.url);

        let mut articles = Vec::with_capacity(page.article_links.len());
        for article in &page.article_links {
            tracing::info!("{}-Fetching article URL: {}", indent, article.id);

            match self.fetch_article(article).await {
                Ok(record) => {
                    traversal.stats.sections += record.sections.len() as u64;
                    articles.push(record);
                }
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        tracing::warn!("{}-Skipping article {}: {}", indent, article.id, e);
                        traversal.failures.push(CrawlFailure {
                            url: article.id.clone(),
                            kind: PageKind::Article,
                            parent_id: Some(pending.link.id.clone()),
                            error: e.to_string(),
                        });
                    }
                },
            }
        }

        traversal.stats.articles += articles.len() as u64;

        tracing::info!(
            "{}Category saved: {} with {} articles",
            indent,
            page.title,
            articles.len()
        );

        traversal.records.push(CategoryRecord {
            id: pending.link.id.clone(),
            parent_id: pending.parent_id.clone(),
            name: page.title,
            languages: page.languages,
            articles,
        });

        Ok(page.subcategory_links)
    }

    async fn fetch_article(&self, link: &PageLink) -> Result<ArticleRecord, WikitreeError> {
        let html = self.source.fetch(link.url.as_str()).await?;
        let page = self.adapter.article(&html);

        Ok(ArticleRecord {
            id: link.id.clone(),
            name: page.title,
            languages: page.languages,
            sections: page.sections,
        })
    }
}
