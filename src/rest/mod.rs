//! Typed access to Factorial resources.
//!
//! - [`RestResource`] and [`WritableResource`]: generic operations for every
//!   model in [`resources`]
//! - [`ResourceDescriptor`]: where a resource lives and what it accepts
//! - [`registry`]: every descriptor, looked up by name
//! - [`ResourceError`]: errors of typed operations
//!
//! ```rust,ignore
//! use factorialhr::rest::RestResource;
//! use factorialhr::rest::resources::{Employee, EmployeeFilters};
//!
//! let page = Employee::get(&client, &EmployeeFilters::default(), Some(2)).await?;
//! println!("page {} of {}", page.meta.current_page, page.meta.total_pages);
//! ```

mod errors;
pub mod registry;
mod resource;

pub mod resources;

pub use errors::ResourceError;
pub use registry::lookup;
pub use resource::{filter_query, ResourceDescriptor, RestResource, WritableResource};
