pub mod config;
pub mod fs_fetcher;
pub mod http_fetcher;
pub mod report;

pub use config::LoaderConfig;
pub use fs_fetcher::FsShardFetcher;
pub use http_fetcher::HttpShardFetcher;
pub use report::TraceReporter;
