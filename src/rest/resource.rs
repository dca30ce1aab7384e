//! Typed resource operations.
//!
//! Every Factorial resource is described by a [`ResourceDescriptor`]: its
//! name, its path below `/api/{version}/resources/`, the filters it accepts
//! and whether it can be written. A model struct implements
//! [`RestResource`] by naming its descriptor and its filter type, and gets
//! `get_by_id`, `get`, `all` and `stream` for free. Writable resources also
//! implement [`WritableResource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use factorialhr::rest::RestResource;
//! use factorialhr::rest::resources::{Employee, EmployeeFilters};
//!
//! let filters = EmployeeFilters {
//!     only_active: Some(true),
//!     team_ids: vec![3, 4],
//!     ..Default::default()
//! };
//! let employees = Employee::all(&client, &filters).await?;
//! let first = Employee::get_by_id(&client, employees[0].id).await?;
//! ```
//!
//! # Filters
//!
//! Filter structs are plain `Serialize` types. [`filter_query`] turns them
//! into query pairs: `None` fields are omitted, scalars are sent as-is and
//! sequences are sent as repeated `key[]` pairs. Nested objects are rejected.

use std::fmt::Display;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{DecodeError, Page, RestClient};
use crate::rest::ResourceError;

/// Static description of one resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Singular model name, used in errors.
    pub name: &'static str,
    /// Path below the versioned resources root, e.g. `"teams/memberships"`.
    pub path: &'static str,
    /// Query parameters the listing endpoint accepts.
    pub filters: &'static [&'static str],
    /// Whether create, update and delete are supported.
    pub writable: bool,
}

impl ResourceDescriptor {
    /// Creates a read-only descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        path: &'static str,
        filters: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            path,
            filters,
            writable: false,
        }
    }

    /// Marks the resource as writable.
    #[must_use]
    pub const fn writable(mut self) -> Self {
        self.writable = true;
        self
    }

    /// Returns `true` if `key` is a filter this resource accepts.
    ///
    /// The list suffix `[]` is ignored, and `page` and `limit` are always
    /// accepted.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        let key = key.strip_suffix("[]").unwrap_or(key);
        key == "page" || key == "limit" || self.filters.contains(&key)
    }

    /// Returns the path of one record.
    #[must_use]
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.path)
    }
}

/// Turns a filter struct into query pairs.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidFilters`] if `filters` does not serialize
/// to a flat object.
pub fn filter_query<F: Serialize>(
    resource: &'static str,
    filters: &F,
) -> Result<Vec<(String, String)>, ResourceError> {
    let invalid = |reason: String| ResourceError::InvalidFilters { resource, reason };

    let map = match serde_json::to_value(filters).map_err(|e| invalid(e.to_string()))? {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => return Err(invalid(format!("expected a struct, got {other}"))),
    };

    let mut query = Vec::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(values) => {
                let list_key = format!("{key}[]");
                for value in values {
                    let value = scalar(&value)
                        .ok_or_else(|| invalid(format!("`{key}` must hold scalar values")))?;
                    query.push((list_key.clone(), value));
                }
            }
            Value::Object(_) => return Err(invalid(format!("`{key}` is a nested object"))),
            scalar_value => {
                if let Some(value) = scalar(&scalar_value) {
                    query.push((key, value));
                }
            }
        }
    }
    Ok(query)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn decode<T: DeserializeOwned>(path: String, value: Value) -> Result<T, ResourceError> {
    serde_json::from_value(value).map_err(|e| {
        ResourceError::Api(
            DecodeError {
                path,
                page: None,
                message: e.to_string(),
            }
            .into(),
        )
    })
}

/// A model that can be read from the API.
#[allow(async_fn_in_trait)]
pub trait RestResource: DeserializeOwned + Send + Sync + Sized {
    /// Identifier type of one record.
    type Id: Display + Send + Sync;

    /// Filters accepted by the listing endpoint. Use `()` for none.
    type Filters: Serialize + Default + Send + Sync;

    /// Where the resource lives.
    const DESCRIPTOR: ResourceDescriptor;

    /// Fetches one record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on a 404, or
    /// [`ResourceError::Api`] for any other failure.
    async fn get_by_id(client: &RestClient, id: Self::Id) -> Result<Self, ResourceError> {
        let id = id.to_string();
        let path = Self::DESCRIPTOR.item_path(&id);
        let envelope = client
            .get(&path, Vec::new())
            .await
            .map_err(|e| ResourceError::from_lookup(e, Self::DESCRIPTOR.name, id))?;
        decode(path, envelope.into_value())
    }

    /// Fetches one page of the listing together with its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the filters are invalid or the request
    /// fails.
    async fn get(
        client: &RestClient,
        filters: &Self::Filters,
        page: Option<u32>,
    ) -> Result<Page<Self>, ResourceError> {
        let query = filter_query(Self::DESCRIPTOR.name, filters)?;
        Ok(client.get_page(Self::DESCRIPTOR.path, query, page).await?)
    }

    /// Fetches every page of the listing.
    ///
    /// # Errors
    ///
    /// Returns the first failure; items of earlier pages are discarded.
    async fn all(client: &RestClient, filters: &Self::Filters) -> Result<Vec<Self>, ResourceError> {
        let query = filter_query(Self::DESCRIPTOR.name, filters)?;
        Ok(client.all(Self::DESCRIPTOR.path, query).await?)
    }

    /// Streams the listing, one page at a time.
    fn stream<'a>(
        client: &'a RestClient,
        filters: &Self::Filters,
    ) -> BoxStream<'a, Result<Self, ResourceError>>
    where
        Self: 'a,
    {
        match filter_query(Self::DESCRIPTOR.name, filters) {
            Ok(query) => client
                .stream::<Self>(Self::DESCRIPTOR.path, query)
                .map_err(ResourceError::from)
                .boxed(),
            Err(e) => stream::once(async move { Err(e) }).boxed(),
        }
    }
}

/// A model that can also be created, updated and deleted.
#[allow(async_fn_in_trait)]
pub trait WritableResource: RestResource {
    /// Body sent on create and update.
    type Input: Serialize + Send + Sync;

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the input cannot be serialized or the
    /// request fails.
    async fn create(client: &RestClient, input: &Self::Input) -> Result<Self, ResourceError> {
        let body = input_body::<Self>(input)?;
        let value = client.post(Self::DESCRIPTOR.path, body).await?;
        decode(Self::DESCRIPTOR.path.to_string(), value)
    }

    /// Replaces a record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on a 404, or another
    /// [`ResourceError`] on failure.
    async fn update(
        client: &RestClient,
        id: Self::Id,
        input: &Self::Input,
    ) -> Result<Self, ResourceError> {
        let body = input_body::<Self>(input)?;
        let id = id.to_string();
        let path = Self::DESCRIPTOR.item_path(&id);
        let value = client
            .put(&path, body)
            .await
            .map_err(|e| ResourceError::from_lookup(e, Self::DESCRIPTOR.name, id))?;
        decode(path, value)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on a 404, or another
    /// [`ResourceError`] on failure.
    async fn delete(client: &RestClient, id: Self::Id) -> Result<(), ResourceError> {
        let id = id.to_string();
        let path = Self::DESCRIPTOR.item_path(&id);
        client
            .delete(&path)
            .await
            .map_err(|e| ResourceError::from_lookup(e, Self::DESCRIPTOR.name, id))?;
        Ok(())
    }
}

fn input_body<R: WritableResource>(input: &R::Input) -> Result<Value, ResourceError> {
    serde_json::to_value(input).map_err(|e| ResourceError::InvalidBody {
        resource: R::DESCRIPTOR.name,
        reason: e.to_string(),
    })
}
