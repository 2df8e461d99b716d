pub mod fetcher;
pub mod prefs;
pub mod progress;
pub mod timer;
pub mod visibility;

pub use fetcher::{FetchError, ShardFetcher};
pub use prefs::{MemoryPrefStore, PrefStore};
pub use progress::LoadReporter;
pub use timer::{NullTimerHost, TimerHost, TimerToken};
pub use visibility::{NullObserver, SectionObserver};
