use std::path::{Path, PathBuf};

use async_trait::async_trait;

use fonoteca_core::ports::{FetchError, ShardFetcher};

/// Adapter de disco del port `ShardFetcher`: sirve un archivo exportado
/// localmente (un espejo del sitio estático). Útil para smoke-tests y para
/// navegar un dump sin red.
pub struct FsShardFetcher {
  root: PathBuf,
}

impl FsShardFetcher {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Las rutas llegan percent-encodeadas segmento a segmento (contrato del
  /// servicio de carga); en disco viven con su nombre real.
  fn resolve(&self, path: &str) -> PathBuf {
    let mut resolved = self.root.clone();
    for segment in path.split('/') {
      match urlencoding::decode(segment) {
        Ok(decoded) => resolved.push(Path::new(decoded.as_ref())),
        Err(_) => resolved.push(segment),
      }
    }
    resolved
  }
}

#[async_trait]
impl ShardFetcher for FsShardFetcher {
  async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
    let file = self.resolve(path);
    tokio::fs::read_to_string(&file).await.map_err(|e| FetchError::Io(format!("{}: {e}", file.display())))
  }
}
