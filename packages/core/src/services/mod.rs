//! Registry Services
//!
//! Typed wrappers over the registry REST API:
//!
//! - `ApiClient` - shared HTTP plumbing (endpoints, auth, decoding)
//! - `LocationsService` - spatial tree fetch and mutations
//! - `LookupsService` - category metadata and reference lists
//!
//! The service traits are the seam between the registry controller and the
//! network; tests substitute in-memory implementations.

pub mod error;
pub mod http;
pub mod locations;
pub mod lookups;

pub use error::ServiceError;
pub use http::{ApiClient, ClientConfig};
pub use locations::{HttpLocationsService, LocationsService};
pub use lookups::{HttpLookupsService, LookupsService};
