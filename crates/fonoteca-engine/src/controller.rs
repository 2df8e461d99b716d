use std::collections::HashSet;
use std::time::Duration;

use tracing::debug;

use fonoteca_core::archive::{Catalog, CatalogStats, Classification, PipelineStatus};
use fonoteca_core::ports::{PrefStore, SectionObserver, TimerHost, TimerToken};

use crate::embeds::{DrainStep, EmbedQueue, EMBED_DELAY};
use crate::filter::filter_and_sort;
use crate::grouping::{GroupingDim, group_view};
use crate::prefs::Preferences;
use crate::sections::{Pager, Sections, Shell, PAGE_SIZE};
use crate::state::{toggle, BrowseState, ItemLayout, SortOrder, ViewMode};
use crate::tag_index::TagIndex;

/// Quiet period before a typed query is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(180);

/// The single owner of catalog, derived indices and browse state.
///
/// Every user-facing action is one synchronous entry point that mutates the
/// state and ends in a full recompute of the filtered view; no component
/// outside this controller mutates anything directly, which is what keeps
/// the view always consistent with the last-applied state.
///
/// The host supplies three capabilities: a visibility observer for grouped
/// shells, a timer (debounce + embed drain callbacks arrive through
/// [`Browser::timer_fired`]) and a best-effort preference store.
pub struct Browser<O, T, P>
where
  O: SectionObserver,
  T: TimerHost,
  P: PrefStore,
{
  catalog: Catalog,
  tags: TagIndex,
  state: BrowseState,
  filtered: Vec<usize>,
  sections: Sections,
  pager: Pager,
  embeds: EmbedQueue,
  /// Catalog indices whose item markup currently exists in the host.
  rendered: HashSet<usize>,
  drain_armed: bool,
  observer: O,
  timers: T,
  store: P,
}

impl<O, T, P> Browser<O, T, P>
where
  O: SectionObserver,
  T: TimerHost,
  P: PrefStore,
{
  /// Builds the tag index, restores persisted preferences and computes the
  /// initial view. In flat view the host renders the first page by calling
  /// [`Browser::load_more`] right after.
  pub fn new(catalog: Catalog, observer: O, timers: T, store: P) -> Self {
    let prefs = Preferences::load(&store);
    let state = BrowseState {
      grouping: prefs.grouping,
      view: prefs.view,
      layout: prefs.layout,
      load_all: prefs.load_all,
      ..BrowseState::default()
    };

    let mut browser = Self {
      tags: TagIndex::build(&catalog),
      catalog,
      state,
      filtered: Vec::new(),
      sections: Sections::default(),
      pager: Pager::default(),
      embeds: EmbedQueue::new(prefs.embeds_enabled),
      rendered: HashSet::new(),
      drain_armed: false,
      observer,
      timers,
      store,
    };
    browser.recompute();
    browser
  }

  // ---- filter toggles -------------------------------------------------

  pub fn toggle_tag(&mut self, tag: &str) {
    toggle(&mut self.state.tags, tag.trim().to_lowercase());
    self.recompute();
  }

  pub fn toggle_classification(&mut self, classification: Classification) {
    toggle(&mut self.state.classifications, classification);
    self.recompute();
  }

  pub fn toggle_status(&mut self, status: PipelineStatus) {
    toggle(&mut self.state.statuses, status);
    self.recompute();
  }

  pub fn toggle_group_key(&mut self, key: &str) {
    toggle(&mut self.state.group_keys, key.to_string());
    self.recompute();
  }

  pub fn set_sort(&mut self, sort: SortOrder) {
    self.state.sort = sort;
    self.recompute();
  }

  /// Changing the grouping dimension invalidates any active group-key
  /// selection: key spaces are not comparable across dimensions.
  pub fn set_grouping(&mut self, grouping: GroupingDim) {
    if self.state.grouping != grouping {
      self.state.grouping = grouping;
      self.state.group_keys.clear();
      self.persist_prefs();
      self.recompute();
    }
  }

  pub fn set_view(&mut self, view: ViewMode) {
    self.state.view = view;
    self.persist_prefs();
    self.recompute();
  }

  pub fn set_layout(&mut self, layout: ItemLayout) {
    self.state.layout = layout;
    self.persist_prefs();
    self.recompute();
  }

  pub fn set_load_all(&mut self, load_all: bool) {
    self.state.load_all = load_all;
    self.persist_prefs();
    self.recompute();
  }

  /// Search input. The query is held through the debounce quiet period and
  /// applied when the host fires [`TimerToken::SearchDebounce`].
  pub fn set_query(&mut self, query: &str) {
    self.state.pending_query = Some(query.to_string());
    self.timers.schedule(TimerToken::SearchDebounce, SEARCH_DEBOUNCE);
  }

  pub fn clear_filters(&mut self) {
    self.state.query.clear();
    self.state.pending_query = None;
    self.timers.cancel(TimerToken::SearchDebounce);
    self.state.tags.clear();
    self.state.classifications.clear();
    self.state.statuses.clear();
    self.state.group_keys.clear();
    self.recompute();
  }

  // ---- grouped view ---------------------------------------------------

  /// Visibility callback from the observer. Returns the member indices to
  /// materialize the first time a shell is seen; `None` afterwards.
  pub fn shell_entered(&mut self, key: &str) -> Option<Vec<usize>> {
    let indices = self.sections.enter_view(key, &mut self.observer)?;
    self.mark_rendered(&indices);
    Some(indices)
  }

  /// Direct user open; tolerates shells never observed as visible.
  pub fn open_shell(&mut self, key: &str) -> Option<Vec<usize>> {
    let indices = self.sections.force_open(key, &mut self.observer)?;
    self.mark_rendered(&indices);
    Some(indices)
  }

  pub fn toggle_shell(&mut self, key: &str) -> Option<Vec<usize>> {
    let indices = self.sections.toggle(key, &mut self.observer)?;
    self.mark_rendered(&indices);
    Some(indices)
  }

  /// Populates every not-yet-rendered shell synchronously.
  pub fn expand_all(&mut self) -> Vec<(String, Vec<usize>)> {
    let populated = self.sections.expand_all(&mut self.observer);
    for (_, indices) in &populated {
      self.mark_rendered(indices);
    }
    populated
  }

  // ---- flat view ------------------------------------------------------

  /// Appends the next page's worth of items (everything when load-all is
  /// on). Returns the catalog indices newly shown.
  pub fn load_more(&mut self) -> Vec<usize> {
    if self.state.view != ViewMode::Flat {
      return Vec::new();
    }

    let size = if self.state.load_all { self.filtered.len().max(PAGE_SIZE) } else { PAGE_SIZE };
    let range = self.pager.next_page(size);
    if range.is_empty() {
      return Vec::new();
    }

    self.state.page += 1;
    let items: Vec<usize> = self.filtered[range].to_vec();
    self.mark_rendered(&items);
    items
  }

  pub fn remaining(&self) -> usize {
    self.pager.remaining()
  }

  // ---- embeds ---------------------------------------------------------

  pub fn set_embeds_enabled(&mut self, enabled: bool) {
    self.embeds.set_enabled(enabled);

    if enabled {
      // Re-scan: everything currently rendered becomes eligible again.
      let rendered: Vec<usize> = self.rendered.iter().copied().collect();
      self.embeds.enqueue(rendered);
      self.arm_drain();
    } else {
      self.timers.cancel(TimerToken::EmbedDrain);
      self.drain_armed = false;
    }

    self.persist_prefs();
  }

  // ---- timers ---------------------------------------------------------

  /// Host callback for an elapsed timer. For the embed drain it returns the
  /// catalog index whose embed must be activated now, having already armed
  /// the next drain step at the fixed delay.
  pub fn timer_fired(&mut self, token: TimerToken) -> Option<usize> {
    match token {
      TimerToken::SearchDebounce => {
        if let Some(query) = self.state.pending_query.take() {
          self.state.query = query;
          self.recompute();
        }
        None
      }
      TimerToken::EmbedDrain => {
        self.drain_armed = false;
        loop {
          let step = {
            let rendered = &self.rendered;
            self.embeds.drain_step(|idx| !rendered.contains(&idx))
          };

          match step {
            DrainStep::Activated(idx) => {
              self.timers.schedule(TimerToken::EmbedDrain, EMBED_DELAY);
              self.drain_armed = true;
              return Some(idx);
            }
            DrainStep::Skipped(_) => continue,
            DrainStep::Idle => return None,
          }
        }
      }
    }
  }

  // ---- read side ------------------------------------------------------

  pub fn state(&self) -> &BrowseState {
    &self.state
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn filtered(&self) -> &[usize] {
    &self.filtered
  }

  pub fn shells(&self) -> &[Shell] {
    self.sections.shells()
  }

  pub fn tag_index(&self) -> &TagIndex {
    &self.tags
  }

  pub fn stats(&self) -> CatalogStats {
    self.catalog.stats()
  }

  // ---- internals ------------------------------------------------------

  fn recompute(&mut self) {
    self.state.page = 0;
    self.filtered = filter_and_sort(&self.catalog, &self.state);

    // View changed: whatever the host had rendered is gone.
    self.rendered.clear();
    self.embeds.clear();

    match self.state.view {
      ViewMode::Grouped => {
        let groups = group_view(&self.catalog, &self.filtered, self.state.grouping, self.state.sort);
        self.sections.rebuild(groups, &mut self.observer);
        self.pager.reset(0);
      }
      ViewMode::Flat => {
        self.sections.clear(&mut self.observer);
        self.pager.reset(self.filtered.len());
      }
    }

    debug!(matched = self.filtered.len(), total = self.catalog.len(), "view recomputed");
  }

  fn mark_rendered(&mut self, items: &[usize]) {
    self.rendered.extend(items.iter().copied());

    if self.embeds.is_enabled() {
      self.embeds.enqueue(items.iter().copied());
      self.arm_drain();
    }
  }

  /// Arms the drain timer immediately, but never on top of an already armed
  /// one: that would cut into the spacing after the last activation.
  fn arm_drain(&mut self) {
    if !self.drain_armed && self.embeds.pending() > 0 {
      self.timers.schedule(TimerToken::EmbedDrain, Duration::ZERO);
      self.drain_armed = true;
    }
  }

  fn persist_prefs(&self) {
    let prefs = Preferences {
      embeds_enabled: self.embeds.is_enabled(),
      grouping: self.state.grouping,
      view: self.state.view,
      layout: self.state.layout,
      load_all: self.state.load_all,
    };
    prefs.save(&self.store);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{Arc, Mutex};

  use fonoteca_core::archive::{enrich, RawRelease};
  use fonoteca_core::ports::{MemoryPrefStore, NullObserver};

  /// Timer host que solo registra lo que el motor arma o cancela.
  #[derive(Debug, Default, Clone)]
  struct RecordingTimer {
    scheduled: Arc<Mutex<Vec<(TimerToken, Duration)>>>,
    cancelled: Arc<Mutex<Vec<TimerToken>>>,
  }

  impl TimerHost for RecordingTimer {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
      self.scheduled.lock().unwrap().push((token, delay));
    }

    fn cancel(&mut self, token: TimerToken) {
      self.cancelled.lock().unwrap().push(token);
    }
  }

  fn two_noise_releases() -> Catalog {
    let mut catalog = Catalog::new();
    let older = RawRelease {
      title: "Temprano".into(),
      artist: "Uno".into(),
      publish_date: Some("2021-06-01".into()),
      tags: vec!["noise".into()],
      ..RawRelease::default()
    };
    let newer = RawRelease {
      title: "Tarde".into(),
      artist: "Dos".into(),
      publish_date: Some("2022-01-01".into()),
      tags: vec!["noise".into()],
      ..RawRelease::default()
    };
    catalog.push(enrich(older, "uno"));
    catalog.push(enrich(newer, "dos"));
    catalog.sort_by_date_desc();
    catalog
  }

  fn browser(catalog: Catalog) -> (Browser<NullObserver, RecordingTimer, MemoryPrefStore>, RecordingTimer) {
    let timer = RecordingTimer::default();
    let browser = Browser::new(catalog, NullObserver::new(), timer.clone(), MemoryPrefStore::new());
    (browser, timer)
  }

  #[test]
  fn end_to_end_filtering_scenario() {
    let (mut browser, _timer) = browser(two_noise_releases());

    // date-desc por defecto: el release de 2022 primero.
    let titles: Vec<&str> =
      browser.filtered().iter().map(|&i| browser.catalog().get(i).unwrap().title.as_str()).collect();
    assert_eq!(titles, vec!["Tarde", "Temprano"]);

    // El filtro de tag mantiene ambos.
    browser.toggle_tag("noise");
    assert_eq!(browser.filtered().len(), 2);

    // Clasificación sin releases: vista vacía, no un error.
    browser.toggle_classification(Classification::Paid);
    assert!(browser.filtered().is_empty());
    assert!(browser.shells().is_empty());
  }

  #[test]
  fn changing_grouping_dimension_clears_group_keys() {
    let (mut browser, _timer) = browser(two_noise_releases());

    browser.toggle_group_key("uno");
    assert_eq!(browser.filtered().len(), 1);

    browser.set_grouping(GroupingDim::ArtistName);
    assert!(browser.state().group_keys.is_empty());
    assert_eq!(browser.filtered().len(), 2);
  }

  #[test]
  fn query_waits_for_the_debounce_timer() {
    let (mut browser, timer) = browser(two_noise_releases());

    browser.set_query("tarde");
    // Aún no se aplica nada.
    assert_eq!(browser.filtered().len(), 2);
    assert_eq!(
      timer.scheduled.lock().unwrap().last().copied(),
      Some((TimerToken::SearchDebounce, SEARCH_DEBOUNCE))
    );

    browser.timer_fired(TimerToken::SearchDebounce);
    assert_eq!(browser.filtered().len(), 1);

    // Un disparo sin consulta pendiente es inofensivo.
    browser.timer_fired(TimerToken::SearchDebounce);
    assert_eq!(browser.filtered().len(), 1);
  }

  #[test]
  fn shell_population_feeds_the_embed_queue() {
    let (mut browser, timer) = browser(two_noise_releases());

    let key = browser.shells()[0].key.clone();
    let indices = browser.shell_entered(&key).unwrap();
    assert_eq!(indices.len(), 1);

    // Poblar armó el drain inmediato; el primer paso activa y espacia.
    assert_eq!(timer.scheduled.lock().unwrap().last().copied(), Some((TimerToken::EmbedDrain, Duration::ZERO)));
    let activated = browser.timer_fired(TimerToken::EmbedDrain);
    assert_eq!(activated, Some(indices[0]));
    assert_eq!(timer.scheduled.lock().unwrap().last().copied(), Some((TimerToken::EmbedDrain, EMBED_DELAY)));

    // Segundo paso: cola vacía.
    assert_eq!(browser.timer_fired(TimerToken::EmbedDrain), None);
  }

  #[test]
  fn disabling_embeds_cancels_the_pending_drain() {
    let (mut browser, timer) = browser(two_noise_releases());

    let key = browser.shells()[0].key.clone();
    browser.shell_entered(&key);
    browser.set_embeds_enabled(false);

    assert!(timer.cancelled.lock().unwrap().contains(&TimerToken::EmbedDrain));
    assert_eq!(browser.timer_fired(TimerToken::EmbedDrain), None);
  }

  #[test]
  fn flat_view_pages_incrementally() {
    let mut catalog = Catalog::new();
    for i in 0..3 {
      catalog.push(enrich(RawRelease { title: format!("r{i}"), ..RawRelease::default() }, "k"));
    }
    let (mut browser, _timer) = browser(catalog);

    browser.set_view(ViewMode::Flat);
    assert!(browser.shells().is_empty());

    let first = browser.load_more();
    assert_eq!(first.len(), 3); // bajo PAGE_SIZE, entra todo
    assert_eq!(browser.remaining(), 0);
    assert!(browser.load_more().is_empty());
    assert_eq!(browser.state().page, 1);
  }

  #[test]
  fn preferences_persist_across_controllers() {
    let store = Arc::new(MemoryPrefStore::new());
    let timer = RecordingTimer::default();

    let mut first =
      Browser::new(two_noise_releases(), NullObserver::new(), timer.clone(), Arc::clone(&store));
    first.set_view(ViewMode::Flat);
    first.set_grouping(GroupingDim::BandId);
    first.set_embeds_enabled(false);

    // Un controlador nuevo sobre el mismo almacén arranca con lo guardado.
    let second = Browser::new(two_noise_releases(), NullObserver::new(), timer, Arc::clone(&store));
    assert_eq!(second.state().view, ViewMode::Flat);
    assert_eq!(second.state().grouping, GroupingDim::BandId);
    assert!(!second.embeds.is_enabled());
  }

  #[test]
  fn expand_all_renders_every_group() {
    let (mut browser, _timer) = browser(two_noise_releases());
    let populated = browser.expand_all();
    assert_eq!(populated.len(), 2);
    assert!(browser.shells().iter().all(|s| s.populated && s.expanded));
  }
}
