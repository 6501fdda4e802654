use chrono::{DateTime, Utc};

use crate::domain::Article;
use crate::errors::DigestResult;
use crate::sources::DiscussFeed;

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// How many articles to request per page.
    pub page_size: usize,

    /// When an at-or-before-cutoff article shows up mid-page, keep scanning
    /// the rest of that page for newer articles instead of stopping at the
    /// first old one. Safer against ordering jitter near the boundary;
    /// `false` reproduces the stop-at-first-old behavior.
    pub scan_full_page_on_boundary: bool,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scan_full_page_on_boundary: true,
        }
    }
}

/// Incremental fetch over an offset-paginated, newest-first feed.
///
/// Stateless across calls: the cutoff comes in as an argument and progress
/// tracking (the checkpoint) is the caller's job. One `fetch_since` call
/// pages forward from offset 0 until it either crosses the cutoff boundary
/// or runs out of feed.
pub struct FetchService<F: DiscussFeed> {
    feed: F,
    options: FetcherOptions,
}

impl<F: DiscussFeed> FetchService<F> {
    pub fn new(feed: F, options: FetcherOptions) -> Self {
        Self { feed, options }
    }

    /// Collect every article created strictly after `cutoff`, newest first.
    ///
    /// Stopping rule, evaluated after scanning each page:
    /// 1. an empty page means the feed is exhausted;
    /// 2. any article at or before the cutoff means everything deeper is
    ///    older too (the feed is consistently sorted), so stop;
    /// 3. a page shorter than `page_size` means end of feed;
    /// otherwise advance the offset by `page_size` and fetch the next page.
    ///
    /// A page request failure aborts the whole call; articles accumulated
    /// from earlier pages are discarded so a partial window can never be
    /// mistaken for a complete one.
    pub fn fetch_since(&self, cutoff: DateTime<Utc>) -> DigestResult<Vec<Article>> {
        let mut collected = Vec::new();
        let mut skip = 0;

        loop {
            println!("Fetching page at offset {}...", skip);

            let page = self.feed.fetch_page(self.options.page_size, skip)?;
            if page.is_empty() {
                break;
            }

            let page_len = page.len();
            let mut boundary_crossed = false;

            for article in page {
                // Malformed timestamps drop the single article, never the run
                let Some(created) = article.created_time() else {
                    continue;
                };

                if created > cutoff {
                    collected.push(article);
                } else {
                    boundary_crossed = true;
                    if !self.options.scan_full_page_on_boundary {
                        break;
                    }
                }
            }

            if boundary_crossed || page_len < self.options.page_size {
                break;
            }

            skip += self.options.page_size;
        }

        Ok(collected)
    }
}
