use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use fonoteca_core::archive::{Catalog, PipelineStatus, Release};

use crate::state::SortOrder;

/// Basis for partitioning the filtered view into sections. Closed set: the
/// three key functions are interchangeable but their key spaces are not
/// comparable, so switching dimension invalidates any group-key selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupingDim {
  ArtistKey,
  BandId,
  ArtistName,
}

impl GroupingDim {
  pub fn as_str(&self) -> &'static str {
    match self {
      GroupingDim::ArtistKey => "artist-key",
      GroupingDim::BandId => "band-id",
      GroupingDim::ArtistName => "artist-name",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      "artist-key" => Some(GroupingDim::ArtistKey),
      "band-id" => Some(GroupingDim::BandId),
      "artist-name" => Some(GroupingDim::ArtistName),
      _ => None,
    }
  }
}

/// The single dispatch point for grouping keys. Pure; never persisted on the
/// release. An absent or zero collection identifier maps to the explicit
/// empty key; it is never silently merged with another dimension's keys.
pub fn group_key(release: &Release, dim: GroupingDim) -> String {
  match dim {
    GroupingDim::ArtistKey => release.artist_key.clone(),
    GroupingDim::BandId => release.band_id.filter(|id| *id != 0).map(|id| id.to_string()).unwrap_or_default(),
    GroupingDim::ArtistName => release.artist.clone(),
  }
}

/// One section of the grouped view.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
  pub key: String,
  /// Human label for the shell header (display artist of the first member,
  /// falling back to the key).
  pub label: String,
  /// Member indices into the catalog, insertion order preserved.
  pub indices: Vec<usize>,
  /// Max member date value; drives the default group ordering.
  pub max_date: i64,
  /// How many members are fully archived (header qualifier).
  pub archived: usize,
}

/// Partitions the filtered view by grouping key.
///
/// Group order: lexical on the key when the active sort is key-asc/key-desc
/// (honoring the explicit alphabetical choice); otherwise by each group's
/// max member date, descending (most recently active first).
pub fn group_view(catalog: &Catalog, view: &[usize], dim: GroupingDim, sort: SortOrder) -> Vec<Group> {
  let mut order: Vec<String> = Vec::new();
  let mut by_key: HashMap<String, Group> = HashMap::new();

  for &idx in view {
    let Some(release) = catalog.get(idx) else { continue };
    let key = group_key(release, dim);

    let group = by_key.entry(key.clone()).or_insert_with(|| {
      order.push(key.clone());
      let label = if release.artist.is_empty() { key.clone() } else { release.artist.clone() };
      Group { key, label, indices: Vec::new(), max_date: 0, archived: 0 }
    });

    group.indices.push(idx);
    group.max_date = group.max_date.max(release.date_value);
    if release.status == PipelineStatus::Archived {
      group.archived += 1;
    }
  }

  let mut groups: Vec<Group> = Vec::with_capacity(order.len());
  for key in &order {
    if let Some(group) = by_key.remove(key) {
      groups.push(group);
    }
  }

  match sort {
    SortOrder::KeyAsc => groups.sort_by(|a, b| a.key.cmp(&b.key)),
    SortOrder::KeyDesc => groups.sort_by(|a, b| b.key.cmp(&a.key)),
    _ => groups.sort_by(|a, b| b.max_date.cmp(&a.max_date)),
  }

  groups
}

#[cfg(test)]
mod tests {
  use super::*;
  use fonoteca_core::archive::{RawRelease, enrich};

  fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let mut a = RawRelease { title: "Uno".into(), artist: "Alpha Display".into(), ..RawRelease::default() };
    a.band_id = Some(77);
    a.publish_date = Some("2021-01-01".into());
    catalog.push(enrich(a, "alpha-key"));

    let mut b = RawRelease { title: "Dos".into(), artist: "Beta Display".into(), ..RawRelease::default() };
    b.publish_date = Some("2022-01-01".into());
    catalog.push(enrich(b, "alpha-key"));
    catalog
  }

  #[test]
  fn dimensions_partition_differently_when_keys_diverge() {
    let catalog = catalog();
    let view = [0usize, 1];

    let by_key = group_view(&catalog, &view, GroupingDim::ArtistKey, SortOrder::DateDesc);
    assert_eq!(by_key.len(), 1);
    assert_eq!(by_key[0].key, "alpha-key");

    let by_id = group_view(&catalog, &view, GroupingDim::BandId, SortOrder::DateDesc);
    assert_eq!(by_id.len(), 2);

    let by_name = group_view(&catalog, &view, GroupingDim::ArtistName, SortOrder::DateDesc);
    assert_eq!(by_name.len(), 2);
    assert!(by_name.iter().any(|g| g.key == "Alpha Display"));
  }

  #[test]
  fn absent_band_id_is_its_own_explicit_group() {
    let catalog = catalog();
    let groups = group_view(&catalog, &[0, 1], GroupingDim::BandId, SortOrder::DateDesc);
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert!(keys.contains(&"77"));
    assert!(keys.contains(&""));
  }

  #[test]
  fn groups_follow_max_member_date_unless_key_sorted() {
    let catalog = catalog();
    // Con band-id, el grupo "" (2022) tiene la fecha máxima y va primero.
    let groups = group_view(&catalog, &[0, 1], GroupingDim::BandId, SortOrder::DateDesc);
    assert_eq!(groups[0].key, "");

    let keyed = group_view(&catalog, &[0, 1], GroupingDim::BandId, SortOrder::KeyAsc);
    assert_eq!(keyed[0].key, "");
    let keyed_desc = group_view(&catalog, &[0, 1], GroupingDim::BandId, SortOrder::KeyDesc);
    assert_eq!(keyed_desc[0].key, "77");
  }

  #[test]
  fn header_counts_members_and_archived() {
    let mut catalog = Catalog::new();
    let archived = RawRelease {
      title: "Arc".into(),
      uploaded: true,
      ia_identifier: Some("arc".into()),
      ..RawRelease::default()
    };
    catalog.push(enrich(archived, "k"));
    catalog.push(enrich(RawRelease { title: "Plain".into(), ..RawRelease::default() }, "k"));

    let groups = group_view(&catalog, &[0, 1], GroupingDim::ArtistKey, SortOrder::DateDesc);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].indices, vec![0, 1]);
    assert_eq!(groups[0].archived, 1);
  }
}
