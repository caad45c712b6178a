pub mod catalog;
pub mod entry;
pub mod error;
pub mod outcome;
pub mod record;

pub use catalog::{parse_catalog, read_catalog};
pub use entry::{CatalogEntry, normalize_key};
pub use error::CatalogError;
pub use outcome::{OutcomeKind, ProcessingOutcome};
pub use record::ResolvedRecord;
