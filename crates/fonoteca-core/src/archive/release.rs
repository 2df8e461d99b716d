use serde::{Deserialize, Serialize};

use crate::archive::classification::Classification;
use crate::archive::dates;
use crate::archive::history::HistoryEntry;
use crate::archive::status::PipelineStatus;
use crate::archive::track::Track;

/// Un release tal como viene en un shard, sin enriquecer.
///
/// La deserialización es tolerante: todo campo opcional ausente o corrupto
/// degrada a un valor seguro en lugar de invalidar el shard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRelease {
  /// Identificador estable de la fuente, si existe.
  #[serde(default)]
  pub id: Option<String>,

  #[serde(default)]
  pub title: String,

  /// Nombre de artista para mostrar (puede diferir de la clave de colección).
  #[serde(default)]
  pub artist: String,

  /// Identificador numérico de la colección en la fuente.
  #[serde(default)]
  pub band_id: Option<u64>,

  #[serde(default)]
  pub label: Option<String>,

  /// Fecha de publicación ISO; puede faltar.
  #[serde(default)]
  pub publish_date: Option<String>,

  /// Clasificación comercial cruda ("free", "nyp", "paid"…).
  #[serde(default)]
  pub classification: Option<String>,

  #[serde(default)]
  pub tags: Vec<String>,

  #[serde(default)]
  pub tracks: Vec<Track>,

  /// Identificador de la copia de archivo a largo plazo.
  #[serde(default)]
  pub ia_identifier: Option<String>,

  /// Flag de subida completada.
  #[serde(default)]
  pub uploaded: bool,

  /// Flag de rastreo encolado (histórico: "archived").
  #[serde(default)]
  pub archived: bool,

  #[serde(default)]
  pub history: Option<Vec<HistoryEntry>>,
}

/// Un release ya dentro del catálogo: los campos crudos más los derivados.
///
/// Los derivados se calculan exactamente una vez al cargar y a partir de ahí
/// son inmutables; los consumidores leen siempre la copia cacheada, nunca
/// recalculan desde los campos fuente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
  pub id: Option<String>,
  pub title: String,
  pub artist: String,
  pub band_id: Option<u64>,
  pub label: Option<String>,
  pub publish_date: Option<String>,
  pub classification: Option<Classification>,
  pub tags: Vec<String>,
  pub tracks: Vec<Track>,
  pub ia_identifier: Option<String>,
  pub uploaded: bool,
  pub archived: bool,
  pub history: Vec<HistoryEntry>,

  /// Clave de colección bajo la que se descubrió el release.
  pub artist_key: String,

  /// Fecha como valor ordenable (segundos epoch; 0 si ausente/corrupta).
  pub date_value: i64,

  /// Fecha ya formateada para mostrar.
  pub display_date: String,

  /// Tags normalizados a minúsculas, en el orden original.
  pub tags_lower: Vec<String>,

  /// Estado derivado del pipeline de archivado.
  pub status: PipelineStatus,
}

impl Release {
  pub fn track_count(&self) -> usize {
    self.tracks.len()
  }
}

/// Enriquece un registro crudo con la clave de colección y los campos
/// derivados. Corre exactamente una vez por registro, antes de entrar al
/// catálogo. No tiene camino de error.
pub fn enrich(raw: RawRelease, artist_key: &str) -> Release {
  let date_value = dates::date_value(raw.publish_date.as_deref());
  let display_date = dates::display_date(raw.publish_date.as_deref());
  let tags_lower: Vec<String> = raw.tags.iter().map(|t| t.trim().to_lowercase()).collect();
  let status = PipelineStatus::derive(raw.uploaded, raw.ia_identifier.is_some(), raw.archived);
  let classification = raw.classification.as_deref().and_then(Classification::parse);

  Release {
    id: raw.id,
    title: raw.title,
    artist: raw.artist,
    band_id: raw.band_id,
    label: raw.label,
    publish_date: raw.publish_date,
    classification,
    tags: raw.tags,
    tracks: raw.tracks,
    ia_identifier: raw.ia_identifier,
    uploaded: raw.uploaded,
    archived: raw.archived,
    history: raw.history.unwrap_or_default(),
    artist_key: artist_key.to_string(),
    date_value,
    display_date,
    tags_lower,
    status,
  }
}
