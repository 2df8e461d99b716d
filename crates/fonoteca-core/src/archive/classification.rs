use serde::{Deserialize, Serialize};

/// Clasificación comercial de un release, tal como la publica la fuente.
///
/// Conjunto cerrado. Cualquier valor desconocido en los datos crudos se
/// trata como ausencia de clasificación, nunca como error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
  Free,
  NameYourPrice,
  Paid,
}

impl Classification {
  /// Parseo tolerante: la fuente ha usado varias grafías a lo largo del tiempo.
  pub fn parse(raw: &str) -> Option<Self> {
    match raw.trim().to_ascii_lowercase().as_str() {
      "free" => Some(Classification::Free),
      "nyp" | "name_your_price" | "name-your-price" | "name your price" => Some(Classification::NameYourPrice),
      "paid" => Some(Classification::Paid),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Classification::Free => "free",
      Classification::NameYourPrice => "name-your-price",
      Classification::Paid => "paid",
    }
  }
}
