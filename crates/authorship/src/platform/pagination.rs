//! Page-number pagination shared by every listing endpoint.
//!
//! The walk has no dependency on total-count headers: a short page is the
//! only completion signal.

use std::future::Future;

/// Maximum number of results per page accepted by the GitHub REST API.
pub const PAGE_SIZE: usize = 100;

/// What a single page request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch<T> {
    /// A page of items. Fewer than the page size ends the walk.
    Items(Vec<T>),
    /// The endpoint reported that the collection has no content at all.
    Empty,
}

/// Walk an endpoint page by page, starting at page 1.
///
/// `fetch` is called with increasing page numbers until a page holds fewer
/// than `page_size` items (an empty page included). A [`PageFetch::Empty`]
/// answer ends the walk with no items, discarding earlier pages. The first
/// error is returned as-is.
pub async fn walk_pages<T, E, F, Fut>(page_size: usize, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PageFetch<T>, E>>,
{
    let mut all_items: Vec<T> = Vec::new();
    let mut page = 1u32;

    loop {
        match fetch(page).await? {
            PageFetch::Empty => return Ok(Vec::new()),
            PageFetch::Items(items) => {
                let count = items.len();
                all_items.extend(items);

                if count < page_size {
                    break;
                }
            }
        }

        page += 1;
    }

    Ok(all_items)
}
