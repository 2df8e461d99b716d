use std::collections::HashMap;

use fonoteca_core::archive::Catalog;

/// How many tags the host shows in the tag cloud.
pub const TOP_TAGS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
  pub tag: String,
  pub count: usize,
}

/// Frequency table of normalized tags across the whole catalog.
///
/// Built once at load time; the catalog is immutable afterward, so there is
/// no incremental maintenance. Entries keep first-occurrence order so that
/// count ties resolve stably.
#[derive(Debug, Default)]
pub struct TagIndex {
  entries: Vec<TagCount>,
}

impl TagIndex {
  pub fn build(catalog: &Catalog) -> Self {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TagCount> = Vec::new();

    for release in catalog.releases() {
      for tag in &release.tags_lower {
        if tag.is_empty() {
          continue;
        }
        match slots.get(tag.as_str()) {
          Some(&slot) => entries[slot].count += 1,
          None => {
            slots.insert(tag.as_str(), entries.len());
            entries.push(TagCount { tag: tag.clone(), count: 1 });
          }
        }
      }
    }

    Self { entries }
  }

  /// Top `n` tags by descending count; ties keep first-occurrence order
  /// (stable sort over the insertion-ordered entries).
  pub fn top(&self, n: usize) -> Vec<&TagCount> {
    let mut ranked: Vec<&TagCount> = self.entries.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
  }

  pub fn distinct(&self) -> usize {
    self.entries.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use fonoteca_core::archive::{RawRelease, enrich};

  fn catalog_with_tags(tag_lists: &[&[&str]]) -> Catalog {
    let mut catalog = Catalog::new();
    for (i, tags) in tag_lists.iter().enumerate() {
      let raw = RawRelease {
        title: format!("r{i}"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..RawRelease::default()
      };
      catalog.push(enrich(raw, "k"));
    }
    catalog
  }

  #[test]
  fn counts_lowercase_tags_across_the_catalog() {
    let catalog = catalog_with_tags(&[&["Ambient", "loop"], &["ambient"], &["drone"]]);
    let index = TagIndex::build(&catalog);

    let top = index.top(10);
    assert_eq!(top[0].tag, "ambient");
    assert_eq!(top[0].count, 2);
    assert_eq!(index.distinct(), 3);
  }

  #[test]
  fn ties_keep_first_occurrence_order() {
    let catalog = catalog_with_tags(&[&["zeta"], &["alfa"], &["zeta", "alfa"], &["beta"]]);
    let index = TagIndex::build(&catalog);

    let top: Vec<&str> = index.top(10).iter().map(|t| t.tag.as_str()).collect();
    // zeta y alfa empatan a 2: zeta apareció primero.
    assert_eq!(top, vec!["zeta", "alfa", "beta"]);
  }

  #[test]
  fn top_is_capped() {
    let catalog = catalog_with_tags(&[&["a", "b", "c"]]);
    let index = TagIndex::build(&catalog);
    assert_eq!(index.top(2).len(), 2);
  }
}
