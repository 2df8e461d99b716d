use serde::{Deserialize, Serialize};

/// Estado de un release dentro del pipeline de archivado.
///
/// Es una función pura de dos hechos sobre el release:
/// - ¿fue subido con identificador de archivo? → `Archived`
/// - si no, ¿está marcado para rastreo? → `Queued`
/// - en otro caso → `Pending`
///
/// Orden de precedencia: `Archived` > `Queued` > `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PipelineStatus {
  Archived,
  Queued,
  Pending,
}

impl PipelineStatus {
  /// Deriva el estado a partir de los flags crudos del release.
  ///
  /// `uploaded` y `has_identifier` se colapsan en un solo hecho: solo un
  /// release subido *y* con copia archivada identificable cuenta como
  /// `Archived`.
  pub fn derive(uploaded: bool, has_identifier: bool, crawl_queued: bool) -> Self {
    if uploaded && has_identifier {
      PipelineStatus::Archived
    } else if crawl_queued {
      PipelineStatus::Queued
    } else {
      PipelineStatus::Pending
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PipelineStatus::Archived => "archived",
      PipelineStatus::Queued => "queued",
      PipelineStatus::Pending => "pending",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      "archived" => Some(PipelineStatus::Archived),
      "queued" => Some(PipelineStatus::Queued),
      "pending" => Some(PipelineStatus::Pending),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truth_table_over_both_facts() {
    // (subido con identificador, marcado para rastreo) → estado
    let cases = [
      (false, false, PipelineStatus::Pending),
      (false, true, PipelineStatus::Queued),
      (true, false, PipelineStatus::Archived),
      (true, true, PipelineStatus::Archived),
    ];

    for (uploaded_with_id, crawl_queued, expected) in cases {
      let got = PipelineStatus::derive(uploaded_with_id, uploaded_with_id, crawl_queued);
      assert_eq!(got, expected, "case ({uploaded_with_id}, {crawl_queued})");
    }
  }

  #[test]
  fn uploaded_without_identifier_is_not_archived() {
    assert_eq!(PipelineStatus::derive(true, false, false), PipelineStatus::Pending);
    assert_eq!(PipelineStatus::derive(true, false, true), PipelineStatus::Queued);
    assert_eq!(PipelineStatus::derive(false, true, false), PipelineStatus::Pending);
  }

  #[test]
  fn round_trips_through_str() {
    for status in [PipelineStatus::Archived, PipelineStatus::Queued, PipelineStatus::Pending] {
      assert_eq!(PipelineStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(PipelineStatus::parse("unknown"), None);
  }
}
