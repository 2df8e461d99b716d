//! Smoke tool: carga un archivo completo y muestra los conteos.
//!
//! Uso:
//!   smoke_load https://archivo.example/data
//!   smoke_load /ruta/a/un/dump/local
//!
//! Sin argumento usa `base_url` de la sección `[loader]` del config.

use std::path::Path;

use fonoteca_core::services::LoadService;
use fonoteca_loader::{FsShardFetcher, HttpShardFetcher, LoaderConfig, TraceReporter};

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_env_filter(
    tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
  )
  .init();

  let source = match std::env::args().nth(1) {
    Some(arg) => arg,
    None => match LoaderConfig::load() {
      Ok(cfg) => cfg.base_url,
      Err(e) => {
        eprintln!("config error: {e}");
        std::process::exit(2);
      }
    },
  };

  let reporter = TraceReporter;
  let result = if source.starts_with("http://") || source.starts_with("https://") {
    LoadService::new(HttpShardFetcher::new(&source), reporter).load_full().await
  } else {
    LoadService::new(FsShardFetcher::new(Path::new(&source)), reporter).load_full().await
  };

  let catalog = match result {
    Ok(catalog) => catalog,
    Err(e) => {
      eprintln!("fatal load error: {e}");
      std::process::exit(1);
    }
  };

  let stats = catalog.stats();
  println!("artists:  {}", stats.artists);
  println!("releases: {}", stats.releases);
  println!("archived: {}", stats.archived);

  for release in catalog.releases().iter().take(10) {
    println!("  [{}] {} / {}", release.display_date, release.artist_key, release.title);
  }
}
