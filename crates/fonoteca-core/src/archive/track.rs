use serde::{Deserialize, Serialize};

/// Una pista dentro de un release, en el orden publicado.
///
/// Todos los campos salvo el título son opcionales en los datos crudos;
/// la ausencia nunca invalida la pista.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
  /// Número de pista, si la fuente lo publica.
  #[serde(default)]
  pub number: Option<u32>,

  /// Título de la pista.
  #[serde(default)]
  pub title: String,

  /// Duración como texto ("3:42"); se muestra tal cual.
  #[serde(default)]
  pub duration: Option<String>,

  /// Enlace directo a la pista, si existe.
  #[serde(default)]
  pub url: Option<String>,
}
