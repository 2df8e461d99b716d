use std::collections::BTreeMap;

use futures::future::join_all;
use thiserror::Error;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::archive::catalog::Catalog;
use crate::archive::release::{RawRelease, enrich};
use crate::ports::fetcher::ShardFetcher;
use crate::ports::progress::LoadReporter;

/// Shards en vuelo a la vez. Acota el pico de requests sin dejar de solapar
/// latencias dentro del lote; los lotes se esperan en secuencia estricta.
pub const SHARD_BATCH: usize = 10;

/// Ruta relativa fija del manifiesto.
pub const MANIFEST_PATH: &str = "manifest.json";

// Sub-rango reservado para el progreso de shards: por debajo queda la fase
// de manifiesto, por encima la construcción de índices y el primer render.
const PROGRESS_FLOOR: f32 = 0.10;
const PROGRESS_CEIL: f32 = 0.95;

/// Errores fatales de carga. Todo lo demás (shards individuales) se aísla,
/// se loguea y se salta: datos parciales antes que bloquear el archivo
/// entero por un shard malo.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("manifest fetch failed: {0}")]
  Manifest(String),

  #[error("manifest parse failed: {0}")]
  ManifestParse(String),

  #[error("manifest lists no shards")]
  Empty,
}

#[derive(Debug, Deserialize)]
pub struct Manifest {
  pub artists: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
  pub path: String,
}

/// Un shard es un mapa clave de colección → releases crudos. `BTreeMap`
/// para que el orden de merge sea determinista shard a shard.
type Shard = BTreeMap<String, Vec<RawRelease>>;

/// Percent-encodea cada segmento de la ruta por separado, de modo que
/// separadores o caracteres reservados incrustados en nombres no corrompan
/// el enrutado.
pub fn encode_shard_path(path: &str) -> String {
  path.split('/').map(|seg| urlencoding::encode(seg).into_owned()).collect::<Vec<_>>().join("/")
}

fn progress_fraction(done: usize, total: usize) -> f32 {
  if total == 0 {
    return PROGRESS_CEIL;
  }
  PROGRESS_FLOOR + (PROGRESS_CEIL - PROGRESS_FLOOR) * (done as f32 / total as f32)
}

/// Orquestación de la carga completa del archivo.
///
/// Genérico sobre los ports: el fetcher real es HTTP, el de tests un mapa en
/// memoria. El servicio no sabe de dónde vienen los bytes.
pub struct LoadService<F, R>
where
  F: ShardFetcher,
  R: LoadReporter,
{
  fetcher: F,
  reporter: R,
}

impl<F, R> LoadService<F, R>
where
  F: ShardFetcher,
  R: LoadReporter,
{
  pub fn new(fetcher: F, reporter: R) -> Self {
    Self { fetcher, reporter }
  }

  /// Carga el catálogo completo:
  /// - trae y parsea el manifiesto (falla → error fatal, sin reintento),
  /// - trae los shards en lotes de [`SHARD_BATCH`], concurrentes dentro del
  ///   lote, reportando progreso monótono tras cada shard,
  /// - mergea cada shard que llegó bien; los que fallan se saltan,
  /// - ordena el catálogo por fecha descendente (orden estable) y reporta
  ///   los conteos finales.
  pub async fn load_full(&self) -> Result<Catalog, LoadError> {
    let manifest_raw = self
      .fetcher
      .fetch_text(MANIFEST_PATH)
      .await
      .map_err(|e| LoadError::Manifest(e.to_string()))?;

    let manifest: Manifest =
      serde_json::from_str(&manifest_raw).map_err(|e| LoadError::ManifestParse(e.to_string()))?;

    if manifest.artists.is_empty() {
      return Err(LoadError::Empty);
    }

    let total = manifest.artists.len();
    self.reporter.start(total).await;

    let mut catalog = Catalog::new();
    let mut done = 0usize;

    for batch in manifest.artists.chunks(SHARD_BATCH) {
      let fetches = batch.iter().map(|entry| self.fetch_shard(&entry.path));

      for (entry, outcome) in batch.iter().zip(join_all(fetches).await) {
        done += 1;

        match outcome {
          Ok(shard) => merge_shard(&mut catalog, shard),
          Err(error) => {
            // Falla aislada: se reporta y se sigue con los hermanos.
            warn!(path = %entry.path, %error, "shard skipped");
            self.reporter.on_shard_error(&entry.path, &error).await;
          }
        }

        self.reporter.progress(progress_fraction(done, total)).await;
      }
    }

    catalog.sort_by_date_desc();

    let stats = catalog.stats();
    debug!(artists = stats.artists, releases = stats.releases, "archive load complete");
    self.reporter.finish(&stats).await;

    Ok(catalog)
  }

  async fn fetch_shard(&self, path: &str) -> Result<Shard, String> {
    let encoded = encode_shard_path(path);
    let body = self.fetcher.fetch_text(&encoded).await.map_err(|e| e.to_string())?;
    serde_json::from_str(&body).map_err(|e| e.to_string())
  }
}

fn merge_shard(catalog: &mut Catalog, shard: Shard) {
  for (artist_key, raws) in shard {
    for raw in raws {
      catalog.push(enrich(raw, &artist_key));
    }
  }
}
