use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use fonoteca_core::archive::{Classification, PipelineStatus};

use crate::grouping::GroupingDim;

/// Sort orders the user can pick. Closed set, dispatched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
  DateDesc,
  DateAsc,
  KeyAsc,
  KeyDesc,
  TitleAsc,
  TracksDesc,
}

impl SortOrder {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortOrder::DateDesc => "date-desc",
      SortOrder::DateAsc => "date-asc",
      SortOrder::KeyAsc => "key-asc",
      SortOrder::KeyDesc => "key-desc",
      SortOrder::TitleAsc => "title-asc",
      SortOrder::TracksDesc => "tracks-desc",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      "date-desc" => Some(SortOrder::DateDesc),
      "date-asc" => Some(SortOrder::DateAsc),
      "key-asc" => Some(SortOrder::KeyAsc),
      "key-desc" => Some(SortOrder::KeyDesc),
      "title-asc" => Some(SortOrder::TitleAsc),
      "tracks-desc" => Some(SortOrder::TracksDesc),
      _ => None,
    }
  }
}

/// Grouped sections vs. a flat paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
  Grouped,
  Flat,
}

impl ViewMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      ViewMode::Grouped => "grouped",
      ViewMode::Flat => "flat",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      "grouped" => Some(ViewMode::Grouped),
      "flat" => Some(ViewMode::Flat),
      _ => None,
    }
  }
}

/// Per-item layout the host renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemLayout {
  Cards,
  Rows,
}

impl ItemLayout {
  pub fn as_str(&self) -> &'static str {
    match self {
      ItemLayout::Cards => "cards",
      ItemLayout::Rows => "rows",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      "cards" => Some(ItemLayout::Cards),
      "rows" => Some(ItemLayout::Rows),
      _ => None,
    }
  }
}

/// The single process-wide filter/sort/group state.
///
/// Mutated only through `Browser` operations, each followed by a full
/// recompute of the filtered view; nothing outside the controller ever
/// touches this directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
  /// Applied free-text query, already trimmed.
  pub query: String,
  /// Query typed but still inside the debounce quiet period.
  pub pending_query: Option<String>,
  /// Active tags, AND semantics.
  pub tags: BTreeSet<String>,
  /// Active classifications, OR semantics.
  pub classifications: BTreeSet<Classification>,
  /// Active pipeline statuses, OR semantics.
  pub statuses: BTreeSet<PipelineStatus>,
  /// Active group keys, OR semantics. Cleared when the dimension changes.
  pub group_keys: BTreeSet<String>,
  pub sort: SortOrder,
  pub grouping: GroupingDim,
  pub view: ViewMode,
  pub layout: ItemLayout,
  /// Flat view: render everything instead of paging.
  pub load_all: bool,
  /// Flat pagination cursor; reset to zero on every recompute.
  pub page: usize,
}

impl Default for BrowseState {
  fn default() -> Self {
    Self {
      query: String::new(),
      pending_query: None,
      tags: BTreeSet::new(),
      classifications: BTreeSet::new(),
      statuses: BTreeSet::new(),
      group_keys: BTreeSet::new(),
      sort: SortOrder::DateDesc,
      grouping: GroupingDim::ArtistKey,
      view: ViewMode::Grouped,
      layout: ItemLayout::Cards,
      load_all: false,
      page: 0,
    }
  }
}

/// Toggle membership in a selection set; returns whether the value is now
/// active.
pub(crate) fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
  if set.remove(&value) { false } else { set.insert(value) }
}
