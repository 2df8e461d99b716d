use fonoteca_core::archive::{Catalog, Release};

use crate::grouping::group_key;
use crate::state::{BrowseState, SortOrder};

/// Derives the filtered, ordered view from the full catalog and the current
/// state. Returns catalog indices: the catalog itself is never cloned or
/// mutated, and every date/tag lookup hits a field pre-derived at load time
/// so this stays cheap at tens of thousands of records.
pub fn filter_and_sort(catalog: &Catalog, state: &BrowseState) -> Vec<usize> {
  let query = state.query.trim().to_lowercase();

  let mut view: Vec<usize> = (0..catalog.len())
    .filter(|&idx| {
      let Some(release) = catalog.get(idx) else { return false };
      matches_query(release, &query)
        && matches_classification(release, state)
        && matches_status(release, state)
        && matches_tags(release, state)
        && matches_group_keys(release, state)
    })
    .collect();

  sort_view(catalog, &mut view, state.sort);
  view
}

/// Case-insensitive substring match across collection key, title, artist,
/// label and tags. Empty query keeps everything.
fn matches_query(release: &Release, query: &str) -> bool {
  if query.is_empty() {
    return true;
  }

  release.artist_key.to_lowercase().contains(query)
    || release.title.to_lowercase().contains(query)
    || release.artist.to_lowercase().contains(query)
    || release.label.as_deref().unwrap_or("").to_lowercase().contains(query)
    || release.tags_lower.iter().any(|tag| tag.contains(query))
}

/// OR semantics; an empty active set means no filtering.
fn matches_classification(release: &Release, state: &BrowseState) -> bool {
  state.classifications.is_empty()
    || release.classification.map_or(false, |c| state.classifications.contains(&c))
}

fn matches_status(release: &Release, state: &BrowseState) -> bool {
  state.statuses.is_empty() || state.statuses.contains(&release.status)
}

/// AND semantics: the release's lowercase tag list must be a superset of
/// every active tag.
fn matches_tags(release: &Release, state: &BrowseState) -> bool {
  state.tags.iter().all(|active| release.tags_lower.iter().any(|tag| tag == active))
}

fn matches_group_keys(release: &Release, state: &BrowseState) -> bool {
  state.group_keys.is_empty() || state.group_keys.contains(&group_key(release, state.grouping))
}

/// Stable sort over indices; ties keep the catalog's load order.
fn sort_view(catalog: &Catalog, view: &mut [usize], sort: SortOrder) {
  let release = |idx: &usize| catalog.get(*idx);

  match sort {
    SortOrder::DateDesc => {
      view.sort_by(|a, b| {
        let (ra, rb) = (release(a), release(b));
        rb.map_or(0, |r| r.date_value).cmp(&ra.map_or(0, |r| r.date_value))
      });
    }
    SortOrder::DateAsc => {
      view.sort_by(|a, b| {
        let (ra, rb) = (release(a), release(b));
        ra.map_or(0, |r| r.date_value).cmp(&rb.map_or(0, |r| r.date_value))
      });
    }
    SortOrder::KeyAsc => {
      view.sort_by(|a, b| {
        release(a).map(|r| r.artist_key.as_str()).cmp(&release(b).map(|r| r.artist_key.as_str()))
      });
    }
    SortOrder::KeyDesc => {
      view.sort_by(|a, b| {
        release(b).map(|r| r.artist_key.as_str()).cmp(&release(a).map(|r| r.artist_key.as_str()))
      });
    }
    SortOrder::TitleAsc => {
      view.sort_by(|a, b| release(a).map(|r| r.title.as_str()).cmp(&release(b).map(|r| r.title.as_str())));
    }
    SortOrder::TracksDesc => {
      view.sort_by(|a, b| {
        release(b).map_or(0, |r| r.track_count()).cmp(&release(a).map_or(0, |r| r.track_count()))
      });
    }
  }
}
