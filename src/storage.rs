pub mod snapshot;
pub mod validation;

pub use snapshot::{Format, LoadError, SaveError, Snapshot};
pub use validation::{InvalidRecord, validate};
