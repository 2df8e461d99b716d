use std::collections::HashMap;
use std::sync::Mutex;

/// Port del almacén de preferencias de usuario.
///
/// Contrato deliberadamente pobre: get/set por clave fija. La persistencia
/// es best-effort: un valor ausente o inválido cae al default y una falla
/// de escritura se traga en silencio; nunca bloquea la inicialización.
pub trait PrefStore {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str);
}

impl<P: PrefStore + ?Sized> PrefStore for std::sync::Arc<P> {
  fn get(&self, key: &str) -> Option<String> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) {
    (**self).set(key, value)
  }
}

/// Almacén en memoria, para tests y hosts sin persistencia.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
  values: Mutex<HashMap<String, String>>,
}

impl MemoryPrefStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl PrefStore for MemoryPrefStore {
  fn get(&self, key: &str) -> Option<String> {
    match self.values.lock() {
      Ok(guard) => guard.get(key).cloned(),
      Err(_) => None,
    }
  }

  fn set(&self, key: &str, value: &str) {
    if let Ok(mut guard) = self.values.lock() {
      guard.insert(key.to_string(), value.to_string());
    }
  }
}
