use async_trait::async_trait;
use tracing::{info, warn};

use fonoteca_core::archive::CatalogStats;
use fonoteca_core::ports::LoadReporter;

/// `LoadReporter` que vuelca el progreso al log.
///
/// Fire-and-forget: reportar nunca falla ni frena la carga. Un host
/// interactivo implementa el port con su propia barra de progreso; este
/// sirve para binarios y diagnósticos.
#[derive(Debug, Clone, Default)]
pub struct TraceReporter;

#[async_trait]
impl LoadReporter for TraceReporter {
  async fn start(&self, total_shards: usize) {
    info!(total_shards, "archive load started");
  }

  async fn progress(&self, fraction: f32) {
    info!(percent = (fraction * 100.0) as u32, "loading");
  }

  async fn on_shard_error(&self, path: &str, error: &str) {
    warn!(path, error, "shard failed, continuing without it");
  }

  async fn finish(&self, stats: &CatalogStats) {
    info!(artists = stats.artists, releases = stats.releases, archived = stats.archived, "archive load finished");
  }
}
