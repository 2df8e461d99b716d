use async_trait::async_trait;

use crate::archive::catalog::CatalogStats;

/// Port de progreso de carga. El host lo implementa para actualizar su UI.
///
/// El progreso reportado es una fracción monótonamente creciente dentro de
/// un sub-rango reservado; las fallas de shard individuales llegan por
/// `on_shard_error` y nunca abortan la carga.
#[async_trait]
pub trait LoadReporter: Send + Sync {
  async fn start(&self, total_shards: usize);
  async fn progress(&self, fraction: f32);
  async fn on_shard_error(&self, path: &str, error: &str);
  async fn finish(&self, stats: &CatalogStats);
}
