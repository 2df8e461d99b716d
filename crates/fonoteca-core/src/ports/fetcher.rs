use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("http error: {0}")]
  Http(String),

  #[error("status {0} for {1}")]
  Status(u16, String),

  #[error("io error: {0}")]
  Io(String),
}

/// Port de acceso a los recursos estáticos del archivo (manifiesto y shards).
///
/// El dominio solo pide "el texto en esta ruta relativa"; el adapter decide
/// si eso es HTTP, disco o un mapa en memoria para tests. La ruta llega ya
/// percent-encodeada segmento a segmento.
#[async_trait]
pub trait ShardFetcher: Send + Sync {
  async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}
