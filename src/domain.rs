//! Domain models for service-request indexing.
//!
//! This module contains the request record and the indexes built over a
//! snapshot of records: ordered by identifier, ranked by urgency, and a
//! route over the reported locations.

/// Service request records and their fields.
pub mod record;
pub use record::{Category, InvalidPriority, Priority, RequestRecord, Status, UnknownCategory};

mod config;
pub use config::Config;

pub mod location_graph;
pub use location_graph::LocationGraph;

pub mod ordered_index;
pub use ordered_index::OrderedIndex;

pub mod priority_ranking;
pub use priority_ranking::PriorityRanking;

/// Reference-code lookup.
pub mod reference;
pub use reference::ReferenceKey;

mod request_index;
pub use request_index::RequestIndex;
