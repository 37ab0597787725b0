//! Municipal Service-Request Indexing
//!
//! A snapshot of service requests is indexed three ways: ordered by
//! identifier, ranked by urgency, and laid out as a route over the reported
//! locations.

pub mod domain;
pub use domain::{Category, Config, Priority, RequestIndex, RequestRecord, Status};

/// Snapshot files of service requests.
pub mod storage;
pub use storage::{LoadError, SaveError};
