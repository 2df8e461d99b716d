use std::collections::HashMap;

use serde::Serialize;

use crate::archive::release::Release;
use crate::archive::status::PipelineStatus;

/// El catálogo completo en memoria: todos los releases cargados más un
/// índice secundario clave de colección → releases (en orden de inserción
/// por clave).
///
/// Ciclo de vida: solo-añadir durante la carga, inmutable después. No hay
/// recarga en este diseño.
#[derive(Debug, Default)]
pub struct Catalog {
  releases: Vec<Release>,
  artist_order: Vec<String>,
  by_artist: HashMap<String, Vec<usize>>,
}

/// Conteos agregados del catálogo, para la línea de estado del host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
  pub artists: usize,
  pub releases: usize,
  pub archived: usize,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Añade un release ya enriquecido, manteniendo el índice secundario.
  pub fn push(&mut self, release: Release) {
    let idx = self.releases.len();
    let key = release.artist_key.clone();

    match self.by_artist.get_mut(&key) {
      Some(indices) => indices.push(idx),
      None => {
        self.artist_order.push(key.clone());
        self.by_artist.insert(key, vec![idx]);
      }
    }

    self.releases.push(release);
  }

  /// Ordena el catálogo por fecha descendente una sola vez, al final de la
  /// carga. El orden debe ser estable: empates (incluidas fechas en cero)
  /// conservan su orden relativo previo.
  ///
  /// Reconstruye el índice secundario porque los índices cambian.
  pub fn sort_by_date_desc(&mut self) {
    self.releases.sort_by(|a, b| b.date_value.cmp(&a.date_value));
    self.rebuild_index();
  }

  fn rebuild_index(&mut self) {
    self.artist_order.clear();
    self.by_artist.clear();

    for (idx, release) in self.releases.iter().enumerate() {
      match self.by_artist.get_mut(&release.artist_key) {
        Some(indices) => indices.push(idx),
        None => {
          self.artist_order.push(release.artist_key.clone());
          self.by_artist.insert(release.artist_key.clone(), vec![idx]);
        }
      }
    }
  }

  pub fn len(&self) -> usize {
    self.releases.len()
  }

  pub fn is_empty(&self) -> bool {
    self.releases.is_empty()
  }

  pub fn get(&self, idx: usize) -> Option<&Release> {
    self.releases.get(idx)
  }

  pub fn releases(&self) -> &[Release] {
    &self.releases
  }

  /// Claves de colección en orden de primera aparición.
  pub fn artist_keys(&self) -> &[String] {
    &self.artist_order
  }

  /// Índices de los releases de una colección, en orden de inserción.
  pub fn releases_of(&self, artist_key: &str) -> &[usize] {
    self.by_artist.get(artist_key).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn stats(&self) -> CatalogStats {
    let archived = self.releases.iter().filter(|r| r.status == PipelineStatus::Archived).count();
    CatalogStats { artists: self.artist_order.len(), releases: self.releases.len(), archived }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::archive::release::{RawRelease, enrich};

  fn release(key: &str, title: &str, date: Option<&str>) -> Release {
    let raw = RawRelease {
      title: title.into(),
      publish_date: date.map(str::to_string),
      ..RawRelease::default()
    };
    enrich(raw, key)
  }

  #[test]
  fn date_sort_is_descending_and_stable() {
    let mut catalog = Catalog::new();
    catalog.push(release("a", "first-undated", None));
    catalog.push(release("a", "old", Some("2020-01-01")));
    catalog.push(release("b", "second-undated", None));
    catalog.push(release("b", "new", Some("2022-01-01")));

    catalog.sort_by_date_desc();

    let titles: Vec<&str> = catalog.releases().iter().map(|r| r.title.as_str()).collect();
    // Fechas descendentes primero; los dos sin fecha conservan su orden relativo.
    assert_eq!(titles, vec!["new", "old", "first-undated", "second-undated"]);
  }

  #[test]
  fn secondary_index_survives_the_sort() {
    let mut catalog = Catalog::new();
    catalog.push(release("alpha", "uno", Some("2020-01-01")));
    catalog.push(release("beta", "dos", Some("2022-01-01")));
    catalog.push(release("alpha", "tres", Some("2021-01-01")));

    catalog.sort_by_date_desc();

    let alpha: Vec<&str> =
      catalog.releases_of("alpha").iter().map(|&i| catalog.get(i).unwrap().title.as_str()).collect();
    assert_eq!(alpha, vec!["tres", "uno"]);
    assert_eq!(catalog.artist_keys(), &["beta".to_string(), "alpha".to_string()]);
  }

  #[test]
  fn stats_count_only_merged_data() {
    let mut catalog = Catalog::new();
    let mut archived = RawRelease { uploaded: true, ia_identifier: Some("arc".into()), ..RawRelease::default() };
    archived.title = "archivado".into();
    catalog.push(enrich(archived, "a"));
    catalog.push(release("a", "pendiente", None));

    let stats = catalog.stats();
    assert_eq!(stats, CatalogStats { artists: 1, releases: 2, archived: 1 });
  }
}
