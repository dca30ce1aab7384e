//! Decoding of the JSON envelope around API data.
//!
//! List responses look like `{"data": [...], "meta": {...}}` and single
//! responses like `{"data": {...}}`. Two `meta` shapes are accepted:
//!
//! - page numbers: `current_page`, `total_pages`, `total_count`, `per_page`
//! - offsets: `has_next_page`, `total`, `limit`
//!
//! Both are normalized into [`PageMeta`], which is always 1-indexed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized pagination metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// The page this response holds, starting at 1.
    pub current_page: u32,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
    /// Total number of items across all pages, when reported.
    pub total_count: Option<u64>,
    /// Page size, when reported.
    pub per_page: Option<u32>,
}

impl PageMeta {
    /// Metadata for a response that is the only page.
    #[must_use]
    pub const fn single(page: u32) -> Self {
        Self {
            current_page: page,
            total_pages: page,
            total_count: None,
            per_page: None,
        }
    }

    /// Returns `true` if the server reports more pages after this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    fn from_raw(raw: RawMeta, requested_page: u32) -> Self {
        let current_page = raw
            .current_page
            .or(raw.page)
            .filter(|page| *page >= 1)
            .unwrap_or(requested_page);
        let total_count = raw.total_count.or(raw.total);
        let per_page = raw.per_page.or(raw.limit).filter(|size| *size > 0);

        let total_pages = match (raw.total_pages, total_count, per_page) {
            (Some(pages), _, _) => pages,
            (None, Some(total), Some(size)) => {
                u32::try_from(total.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
            }
            _ if raw.has_next_page == Some(true) => current_page.saturating_add(1),
            _ => current_page,
        };

        Self {
            current_page,
            total_pages: total_pages.max(1),
            total_count,
            per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawMeta {
    current_page: Option<u32>,
    page: Option<u32>,
    total_pages: Option<u32>,
    total_count: Option<u64>,
    total: Option<u64>,
    per_page: Option<u32>,
    limit: Option<u32>,
    has_next_page: Option<bool>,
}

/// A decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseEnvelope {
    /// A single object (or `null` for empty bodies).
    Single(Value),
    /// One page of a list.
    List {
        /// Items in server order.
        items: Vec<Value>,
        /// Pagination metadata.
        meta: PageMeta,
    },
}

impl ResponseEnvelope {
    /// Decodes a response body.
    ///
    /// `requested_page` fills in the current page when the server omits it.
    ///
    /// # Errors
    ///
    /// Returns a message describing the problem when the body is not JSON or
    /// the `meta` object is malformed.
    pub fn decode(body: &str, requested_page: u32) -> Result<Self, String> {
        if body.trim().is_empty() {
            return Ok(Self::Single(Value::Null));
        }

        let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
        match value {
            Value::Array(items) => Ok(Self::List {
                items,
                meta: PageMeta::single(requested_page),
            }),
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Array(items)) => {
                    let raw = match object.remove("meta") {
                        Some(Value::Null) | None => RawMeta::default(),
                        Some(meta) => serde_json::from_value(meta)
                            .map_err(|e| format!("invalid pagination metadata: {e}"))?,
                    };
                    Ok(Self::List {
                        items,
                        meta: PageMeta::from_raw(raw, requested_page),
                    })
                }
                Some(data) => Ok(Self::Single(data)),
                None => Ok(Self::Single(Value::Object(object))),
            },
            other => Ok(Self::Single(other)),
        }
    }

    /// Returns the body as one page. A single object becomes a one-item page.
    #[must_use]
    pub fn into_page(self, requested_page: u32) -> Page<Value> {
        match self {
            Self::List { items, meta } => Page { items, meta },
            Self::Single(Value::Null) => Page {
                items: Vec::new(),
                meta: PageMeta::single(requested_page),
            },
            Self::Single(value) => Page {
                items: vec![value],
                meta: PageMeta::single(requested_page),
            },
        }
    }

    /// Returns the single object, or the list items as a JSON array.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Single(value) => value,
            Self::List { items, .. } => Value::Array(items),
        }
    }
}

/// One page of items with its metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl Page<Value> {
    /// Decodes every item into `T`.
    ///
    /// # Errors
    ///
    /// Returns the serde error message of the first item that fails,
    /// prefixed with its index on the page.
    pub fn decode_items<T: DeserializeOwned>(self) -> Result<Page<T>, String> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| serde_json::from_value(item).map_err(|e| format!("item {i}: {e}")))
            .collect::<Result<Vec<T>, _>>()?;
        Ok(Page {
            items,
            meta: self.meta,
        })
    }
}
