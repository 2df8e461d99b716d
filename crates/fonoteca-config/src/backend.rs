use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml_edit::{DocumentMut, Item};

use fonoteca_core::ports::PrefStore;

use crate::paths::{ConfigError, FonotecaPaths};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

/// Backend TOML sobre `fonoteca.toml`, una sección por subsistema.
/// Las escrituras preservan comentarios (toml_edit) y son atómicas.
pub struct TomlConfigBackend {
  paths: FonotecaPaths,
}

/// Escritura atómica: tmp + rename, para no dejar un config a medias.
fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

impl TomlConfigBackend {
  pub fn new(paths: FonotecaPaths) -> Self {
    Self { paths }
  }

  fn read_document(&self) -> Result<DocumentMut, ConfigError> {
    match fs::read_to_string(self.paths.config_file()) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse config doc: {e}")))
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(DocumentMut::new()),
      Err(e) => Err(e.into()),
    }
  }

  /// Como `load_section` pero una sección ausente (o archivo inexistente)
  /// devuelve el default del tipo en vez de fallar.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Value = toml::from_str(&content)?;
    let Some(table) = toml_val.get(section) else {
      return Ok(T::default());
    };

    table
      .clone()
      .try_into()
      .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    table
      .clone()
      .try_into()
      .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let mut doc = self.read_document()?;

    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&self.paths.config_file(), &doc.to_string())?;
    Ok(())
  }
}

/// Puente de preferencias de usuario sobre la tabla plana `[prefs]`.
///
/// Implementa el port `PrefStore` del núcleo: get/set por clave fija, todo
/// best-effort. Cualquier falla de IO o parseo se traga: la persistencia de
/// preferencias nunca es fatal ni bloquea la inicialización.
pub struct TomlPrefStore {
  backend: TomlConfigBackend,
}

const PREFS_SECTION: &str = "prefs";

impl TomlPrefStore {
  pub fn new(paths: FonotecaPaths) -> Self {
    Self { backend: TomlConfigBackend::new(paths) }
  }
}

impl PrefStore for TomlPrefStore {
  fn get(&self, key: &str) -> Option<String> {
    let doc = self.backend.read_document().ok()?;
    doc.get(PREFS_SECTION)?.get(key)?.as_str().map(str::to_string)
  }

  fn set(&self, key: &str, value: &str) {
    let Ok(mut doc) = self.backend.read_document() else { return };

    if doc.get(PREFS_SECTION).is_none() {
      doc[PREFS_SECTION] = toml_edit::table();
    }
    doc[PREFS_SECTION][key] = toml_edit::value(value);

    // Best-effort: una escritura fallida se ignora.
    let _ = atomic_write_str(&self.backend.paths.config_file(), &doc.to_string());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  fn paths_in(dir: &Path) -> FonotecaPaths {
    let config_dir = dir.join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    FonotecaPaths { base_dir: dir.to_path_buf(), config_dir, cache_dir: dir.join("cache") }
  }

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct DemoSection {
    name: String,
    limit: Option<u32>,
  }

  #[test]
  fn missing_file_yields_the_default_section() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(paths_in(tmp.path()));

    let section: DemoSection = backend.load_section_with_default("demo").unwrap();
    assert_eq!(section, DemoSection::default());
  }

  #[test]
  fn sections_round_trip() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(paths_in(tmp.path()));

    let written = DemoSection { name: "archivo".into(), limit: Some(10) };
    backend.save_section("demo", &written).unwrap();

    let read: DemoSection = backend.load_section("demo").unwrap();
    assert_eq!(read, written);
  }

  #[test]
  fn save_preserves_unrelated_sections() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(paths_in(tmp.path()));

    backend.save_section("uno", &DemoSection { name: "a".into(), limit: None }).unwrap();
    backend.save_section("dos", &DemoSection { name: "b".into(), limit: None }).unwrap();

    let uno: DemoSection = backend.load_section("uno").unwrap();
    assert_eq!(uno.name, "a");
  }

  #[test]
  fn pref_store_round_trips_and_swallows_absence() {
    let tmp = tempdir().unwrap();
    let store = TomlPrefStore::new(paths_in(tmp.path()));

    assert_eq!(store.get("grouping"), None);

    store.set("grouping", "band-id");
    store.set("view", "flat");
    assert_eq!(store.get("grouping").as_deref(), Some("band-id"));
    assert_eq!(store.get("view").as_deref(), Some("flat"));

    // Sobrescritura de la misma clave.
    store.set("grouping", "artist-key");
    assert_eq!(store.get("grouping").as_deref(), Some("artist-key"));
  }
}
