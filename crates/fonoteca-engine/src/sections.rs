use std::collections::HashMap;

use fonoteca_core::ports::SectionObserver;

use crate::grouping::Group;

/// Flat-view page size.
pub const PAGE_SIZE: usize = 60;

/// One collapsed group "shell": header data rendered eagerly, member markup
/// deferred until the shell is visible or forced open.
///
/// State machine: unpopulated+collapsed → (visible | forced open) →
/// populated+expanded; then populated+expanded ⇄ populated+collapsed by
/// direct toggle. Population never repeats; no shell ever returns to
/// unpopulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
  pub key: String,
  pub label: String,
  pub indices: Vec<usize>,
  pub archived: usize,
  pub populated: bool,
  pub expanded: bool,
}

/// The grouped view's shells plus observation bookkeeping. Rebuilt from
/// scratch whenever filters, sort or grouping change.
#[derive(Debug, Default)]
pub struct Sections {
  shells: Vec<Shell>,
  by_key: HashMap<String, usize>,
}

impl Sections {
  /// Discards all shells and observation state, then registers one shell per
  /// group with the observer.
  pub fn rebuild<O: SectionObserver>(&mut self, groups: Vec<Group>, observer: &mut O) {
    self.clear(observer);

    for group in groups {
      let shell = Shell {
        key: group.key,
        label: group.label,
        indices: group.indices,
        archived: group.archived,
        populated: false,
        expanded: false,
      };
      observer.observe(&shell.key);
      self.by_key.insert(shell.key.clone(), self.shells.len());
      self.shells.push(shell);
    }
  }

  pub fn clear<O: SectionObserver>(&mut self, observer: &mut O) {
    for shell in &self.shells {
      if !shell.populated {
        observer.unobserve(&shell.key);
      }
    }
    self.shells.clear();
    self.by_key.clear();
  }

  /// Visibility callback from the host. Populates at most once: the first
  /// observation returns the member indices (markup must be generated now)
  /// and withdraws the shell from observation; re-entries return `None`.
  pub fn enter_view<O: SectionObserver>(&mut self, key: &str, observer: &mut O) -> Option<Vec<usize>> {
    let shell = self.shell_mut(key)?;
    if shell.populated {
      return None;
    }

    shell.populated = true;
    shell.expanded = true;
    let indices = shell.indices.clone();
    observer.unobserve(key);
    Some(indices)
  }

  /// Direct user open. Same one-time-population rule; must work before the
  /// shell was ever observed as visible.
  pub fn force_open<O: SectionObserver>(&mut self, key: &str, observer: &mut O) -> Option<Vec<usize>> {
    let populated = self.enter_view(key, observer);
    if let Some(shell) = self.shell_mut(key) {
      shell.expanded = true;
    }
    populated
  }

  /// Expand/collapse toggle. Populates on first use, never again after.
  pub fn toggle<O: SectionObserver>(&mut self, key: &str, observer: &mut O) -> Option<Vec<usize>> {
    let already_populated = self.shell(key).map(|s| s.populated).unwrap_or(false);
    if !already_populated {
      return self.force_open(key, observer);
    }

    if let Some(shell) = self.shell_mut(key) {
      shell.expanded = !shell.expanded;
    }
    None
  }

  /// Synchronously populates every not-yet-populated shell.
  pub fn expand_all<O: SectionObserver>(&mut self, observer: &mut O) -> Vec<(String, Vec<usize>)> {
    let keys: Vec<String> = self.shells.iter().map(|s| s.key.clone()).collect();
    let mut populated = Vec::new();

    for key in keys {
      if let Some(indices) = self.force_open(&key, observer) {
        populated.push((key, indices));
      }
    }

    populated
  }

  pub fn shell(&self, key: &str) -> Option<&Shell> {
    self.by_key.get(key).and_then(|&i| self.shells.get(i))
  }

  fn shell_mut(&mut self, key: &str) -> Option<&mut Shell> {
    match self.by_key.get(key) {
      Some(&i) => self.shells.get_mut(i),
      None => None,
    }
  }

  pub fn shells(&self) -> &[Shell] {
    &self.shells
  }
}

/// Flat-view incremental pagination: "load more" appends the next page's
/// worth of items, tracking how many remain.
#[derive(Debug, Default)]
pub struct Pager {
  total: usize,
  shown: usize,
}

impl Pager {
  pub fn reset(&mut self, total: usize) {
    self.total = total;
    self.shown = 0;
  }

  /// Range of view indices newly shown by this step.
  pub fn next_page(&mut self, page_size: usize) -> std::ops::Range<usize> {
    let start = self.shown;
    let end = (start + page_size).min(self.total);
    self.shown = end;
    start..end
  }

  pub fn shown(&self) -> usize {
    self.shown
  }

  pub fn remaining(&self) -> usize {
    self.total - self.shown
  }
}
