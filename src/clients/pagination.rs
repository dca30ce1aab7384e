//! Fetching every page of a listing.
//!
//! Pages are requested strictly in order: page `N + 1` is only requested
//! after page `N` has been received and decoded. Listing stops when
//!
//! - the metadata reports the current page as the last one, or
//! - a page comes back empty, or
//! - the template request already named a page, in which case only that
//!   page is fetched.
//!
//! The empty-page rule guards against metadata that overstates the page
//! count; it is an assumption about the API, not a documented contract.
//!
//! [`collect_all`] is all-or-nothing: if any page fails, its error is
//! returned and the items of earlier pages are dropped. [`pages`] and
//! [`items`] yield results lazily and stop after the first error.

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::envelope::Page;
use crate::clients::errors::{ApiError, DecodeError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpRequest;

/// Iteration state of one listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    next_page: Option<u32>,
    pages_seen: u32,
    single_page: bool,
}

impl PageCursor {
    /// Starts at the template's explicit page, or at page 1.
    #[must_use]
    pub fn for_request(template: &HttpRequest) -> Self {
        let explicit = template.page();
        Self {
            next_page: Some(explicit.unwrap_or(1)),
            pages_seen: 0,
            single_page: explicit.is_some(),
        }
    }

    /// Returns the next page to request, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    /// Returns how many pages have been received.
    #[must_use]
    pub const fn pages_seen(&self) -> u32 {
        self.pages_seen
    }

    /// Records a received page and decides whether to continue.
    pub fn advance(&mut self, requested: u32, page: &Page<Value>) {
        self.pages_seen += 1;
        self.next_page = if self.single_page || page.items.is_empty() || !page.meta.has_more() {
            None
        } else {
            requested.checked_add(1)
        };
    }
}

/// Streams the pages of a listing, decoding items into `T`.
pub fn pages<'a, T>(
    client: &'a HttpClient,
    template: HttpRequest,
) -> BoxStream<'a, Result<Page<T>, ApiError>>
where
    T: DeserializeOwned + Send + 'a,
{
    let cursor = PageCursor::for_request(&template);
    stream::try_unfold((cursor, template), move |(mut cursor, template)| async move {
        let Some(page) = cursor.next_page() else {
            tracing::debug!(
                path = %template.path,
                pages = cursor.pages_seen(),
                "Pagination finished"
            );
            return Ok::<_, ApiError>(None);
        };

        tracing::debug!(path = %template.path, page, "Fetching page");
        let request = template.with_page(page);
        let raw = client.execute(&request).await?.into_page(page);
        cursor.advance(page, &raw);

        let decoded = raw.decode_items::<T>().map_err(|message| DecodeError {
            path: template.path.clone(),
            page: Some(page),
            message,
        })?;
        Ok(Some((decoded, (cursor, template))))
    })
    .boxed()
}

/// Streams the items of a listing, page after page.
pub fn items<'a, T>(client: &'a HttpClient, template: HttpRequest) -> BoxStream<'a, Result<T, ApiError>>
where
    T: DeserializeOwned + Send + 'a,
{
    pages::<T>(client, template)
        .map_ok(|page| stream::iter(page.items.into_iter().map(Ok)))
        .try_flatten()
        .boxed()
}

/// Fetches every page and returns all items in page order.
///
/// # Errors
///
/// Returns the error of the first page that fails; no partial result is
/// returned.
pub async fn collect_all<T>(client: &HttpClient, template: HttpRequest) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned + Send,
{
    pages::<T>(client, template)
        .try_fold(Vec::new(), |mut acc, page| async move {
            acc.extend(page.items);
            Ok(acc)
        })
        .await
}
