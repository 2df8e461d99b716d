use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Una entrada del historial de cambios de un release.
///
/// Cada entrada captura el momento del rastreo, el identificador de archivo
/// vigente en ese momento y el mapa campo → valor nuevo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
  /// Momento del cambio (ISO, tal como lo emite el crawler).
  #[serde(default)]
  pub timestamp: String,

  /// Identificador de la copia archivada vigente en ese momento.
  #[serde(default)]
  pub ia_identifier: Option<String>,

  /// Campos que cambiaron y su valor nuevo. Los valores pueden ser
  /// escalares, objetos o listas de pistas; cada forma se renderiza distinto.
  #[serde(default)]
  pub changes: BTreeMap<String, Value>,
}

/// Forma de un valor cambiado, para que el host elija cómo renderizarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
  Scalar,
  TrackList,
  Object,
}

impl ChangeKind {
  /// Clasifica un valor del historial.
  ///
  /// Una lista se considera lista de pistas solo si sus elementos son
  /// objetos; cualquier otro arreglo se trata como escalar concatenable.
  pub fn of(value: &Value) -> Self {
    match value {
      Value::Object(_) => ChangeKind::Object,
      Value::Array(items) if items.iter().all(|v| v.is_object()) && !items.is_empty() => ChangeKind::TrackList,
      _ => ChangeKind::Scalar,
    }
  }
}
