use crate::domain::Article;
use crate::errors::DigestResult;

/// One page of the "list newest articles" capability.
///
/// Implementations must return articles ordered newest-first by creation
/// time; the paging loop in `FetchService` relies on that ordering to decide
/// when to stop.
#[cfg_attr(test, mockall::automock)]
pub trait DiscussFeed: Send + Sync {
    /// Fetch up to `page_size` articles starting at offset `skip`.
    fn fetch_page(&self, page_size: usize, skip: usize) -> DigestResult<Vec<Article>>;
}
