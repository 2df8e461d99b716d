pub mod catalog;
pub mod classification;
pub mod dates;
pub mod history;
pub mod release;
pub mod status;
pub mod track;

pub use catalog::{Catalog, CatalogStats};
pub use classification::Classification;
pub use history::{ChangeKind, HistoryEntry};
pub use release::{RawRelease, Release, enrich};
pub use status::PipelineStatus;
pub use track::Track;
