pub mod load_service;

pub use load_service::{LoadError, LoadService, Manifest, ManifestEntry, encode_shard_path};
