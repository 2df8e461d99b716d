pub mod archive;
pub mod errors;
pub mod ports;
pub mod services;

pub use errors::ArchiveError;
