pub mod controller;
pub mod embeds;
pub mod filter;
pub mod grouping;
pub mod prefs;
pub mod sections;
pub mod state;
pub mod tag_index;

pub use controller::Browser;
pub use embeds::{DrainStep, EmbedQueue, EMBED_DELAY};
pub use filter::filter_and_sort;
pub use grouping::{Group, GroupingDim, group_key, group_view};
pub use prefs::Preferences;
pub use sections::{Pager, Sections, PAGE_SIZE};
pub use state::{BrowseState, ItemLayout, SortOrder, ViewMode};
pub use tag_index::{TagIndex, TOP_TAGS};
