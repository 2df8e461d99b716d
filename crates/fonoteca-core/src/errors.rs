use thiserror::Error;

/// Error genérico del núcleo de Fonoteca.
///
/// Las capas superiores (binarios, UI embebida, etc.) deberían mapear este
/// error a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum ArchiveError {
  #[error("load error: {0}")]
  Load(String),

  #[error("fetch error: {0}")]
  Fetch(String),

  #[error("no data")]
  NoData,
}

impl From<crate::services::LoadError> for ArchiveError {
  fn from(err: crate::services::LoadError) -> Self {
    match err {
      crate::services::LoadError::Empty => ArchiveError::NoData,
      other => ArchiveError::Load(other.to_string()),
    }
  }
}
