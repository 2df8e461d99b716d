use chrono::{DateTime, NaiveDate};

/// Convierte una fecha de publicación ISO a un valor numérico ordenable
/// (segundos desde epoch). Fechas ausentes o corruptas valen `0`: nunca es
/// un error, solo un valor que ordena al final en orden descendente.
pub fn date_value(raw: Option<&str>) -> i64 {
  let Some(raw) = raw else { return 0 };
  let raw = raw.trim();
  if raw.is_empty() {
    return 0;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return dt.timestamp();
  }

  // La fuente suele emitir solo la parte de fecha ("2020-01-01"),
  // a veces con hora pegada detrás.
  let head = raw.get(..10).unwrap_or(raw);
  if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
    if let Some(dt) = date.and_hms_opt(0, 0, 0) {
      return dt.and_utc().timestamp();
    }
  }

  0
}

/// Formatea la fecha para mostrarla en el listado ("02 Jun 2021").
/// Se calcula una sola vez al cargar; ausente o corrupta → cadena vacía.
pub fn display_date(raw: Option<&str>) -> String {
  let value = date_value(raw);
  if value == 0 {
    return String::new();
  }

  match DateTime::from_timestamp(value, 0) {
    Some(dt) => dt.format("%d %b %Y").to_string(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_dates_and_rfc3339_both_parse() {
    assert!(date_value(Some("2020-01-01")) > 0);
    assert!(date_value(Some("2020-01-01T12:30:00Z")) > 0);
    assert!(date_value(Some("2022-01-01")) > date_value(Some("2021-06-01")));
  }

  #[test]
  fn absent_or_garbage_degrades_to_zero() {
    assert_eq!(date_value(None), 0);
    assert_eq!(date_value(Some("")), 0);
    assert_eq!(date_value(Some("not a date")), 0);
    assert_eq!(display_date(Some("not a date")), "");
  }

  #[test]
  fn display_is_derived_from_the_same_value() {
    assert_eq!(display_date(Some("2021-06-02")), "02 Jun 2021");
    assert_eq!(display_date(None), "");
  }
}
