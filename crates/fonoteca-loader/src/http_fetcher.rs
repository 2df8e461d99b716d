use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use fonoteca_core::ports::{FetchError, ShardFetcher};

const USER_AGENT: &str = concat!("fonoteca/", env!("CARGO_PKG_VERSION"));

/// Adapter HTTP del port `ShardFetcher`.
///
/// El archivo es estático: solo GETs de rutas relativas bajo una base. No
/// hay reintentos aquí: la política de "saltar y seguir" vive en el
/// servicio de carga, que ya trata cada shard como prescindible.
pub struct HttpShardFetcher {
  client: Client,
  base_url: String,
}

impl HttpShardFetcher {
  pub fn new(base_url: impl Into<String>) -> Self {
    let client = Client::builder().user_agent(USER_AGENT).build().unwrap_or_default();
    Self { client, base_url: base_url.into().trim_end_matches('/').to_string() }
  }
}

#[async_trait]
impl ShardFetcher for HttpShardFetcher {
  async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
    let url = format!("{}/{}", self.base_url, path);
    debug!(%url, "fetching archive resource");

    let response = self.client.get(&url).send().await.map_err(map_request_error)?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status(status.as_u16(), path.to_string()));
    }

    response.text().await.map_err(map_request_error)
  }
}

fn map_request_error(err: reqwest::Error) -> FetchError {
  FetchError::Http(err.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_url_loses_its_trailing_slash() {
    let fetcher = HttpShardFetcher::new("https://archive.example/data/");
    assert_eq!(fetcher.base_url, "https://archive.example/data");
  }
}
