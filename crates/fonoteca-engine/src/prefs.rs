use fonoteca_core::ports::PrefStore;

use crate::grouping::GroupingDim;
use crate::state::{ItemLayout, ViewMode};

// Claves fijas del almacén. Nunca se renombran: son el formato persistido.
pub const KEY_EMBEDS: &str = "embeds_enabled";
pub const KEY_GROUPING: &str = "grouping";
pub const KEY_VIEW: &str = "view";
pub const KEY_LAYOUT: &str = "layout";
pub const KEY_LOAD_ALL: &str = "load_all";

/// Vista tipada sobre el almacén de preferencias.
///
/// Todo es best-effort: un valor ausente o irreconocible cae a su default y
/// una falla de lectura/escritura jamás bloquea la inicialización.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
  pub embeds_enabled: bool,
  pub grouping: GroupingDim,
  pub view: ViewMode,
  pub layout: ItemLayout,
  pub load_all: bool,
}

impl Default for Preferences {
  fn default() -> Self {
    Self {
      embeds_enabled: true,
      grouping: GroupingDim::ArtistKey,
      view: ViewMode::Grouped,
      layout: ItemLayout::Cards,
      load_all: false,
    }
  }
}

fn read_bool<P: PrefStore>(store: &P, key: &str, default: bool) -> bool {
  match store.get(key).as_deref() {
    Some("true") => true,
    Some("false") => false,
    _ => default,
  }
}

impl Preferences {
  pub fn load<P: PrefStore>(store: &P) -> Self {
    let defaults = Self::default();

    Self {
      embeds_enabled: read_bool(store, KEY_EMBEDS, defaults.embeds_enabled),
      grouping: store.get(KEY_GROUPING).as_deref().and_then(GroupingDim::parse).unwrap_or(defaults.grouping),
      view: store.get(KEY_VIEW).as_deref().and_then(ViewMode::parse).unwrap_or(defaults.view),
      layout: store.get(KEY_LAYOUT).as_deref().and_then(ItemLayout::parse).unwrap_or(defaults.layout),
      load_all: read_bool(store, KEY_LOAD_ALL, defaults.load_all),
    }
  }

  pub fn save<P: PrefStore>(&self, store: &P) {
    store.set(KEY_EMBEDS, if self.embeds_enabled { "true" } else { "false" });
    store.set(KEY_GROUPING, self.grouping.as_str());
    store.set(KEY_VIEW, self.view.as_str());
    store.set(KEY_LAYOUT, self.layout.as_str());
    store.set(KEY_LOAD_ALL, if self.load_all { "true" } else { "false" });
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use fonoteca_core::ports::MemoryPrefStore;

  #[test]
  fn absent_or_invalid_values_fall_back_to_defaults() {
    let store = MemoryPrefStore::new();
    store.set(KEY_GROUPING, "something-else");
    store.set(KEY_EMBEDS, "yes");

    assert_eq!(Preferences::load(&store), Preferences::default());
  }

  #[test]
  fn round_trips_through_the_store() {
    let store = MemoryPrefStore::new();
    let prefs = Preferences {
      embeds_enabled: false,
      grouping: GroupingDim::BandId,
      view: ViewMode::Flat,
      layout: ItemLayout::Rows,
      load_all: true,
    };

    prefs.save(&store);
    assert_eq!(Preferences::load(&store), prefs);
  }
}
