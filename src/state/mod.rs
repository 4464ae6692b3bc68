mod catalog;
mod persistence;
mod snapshot;
pub mod validation;

pub use catalog::CatalogIndex;
pub use persistence::{load_party, save_party};
pub use snapshot::PartySnapshot;
pub use validation::{validate_party, Finding, Severity};
