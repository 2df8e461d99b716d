/// Port de observación de visibilidad para las secciones agrupadas.
///
/// El motor registra cada shell con `observe`; cuando el host detecta que el
/// shell entró (o está por entrar) al área visible, llama de vuelta a
/// `Browser::shell_entered`. `unobserve` retira un shell ya poblado.
///
/// El margen de pre-disparo antes del borde geométrico es decisión del host.
pub trait SectionObserver {
  fn observe(&mut self, key: &str);
  fn unobserve(&mut self, key: &str);
}

/// Observador nulo para uso headless: todo shell observado se considera
/// visible de inmediato. El host (o el test) drena `take_visible` y
/// reinyecta las claves como eventos de visibilidad.
#[derive(Debug, Default)]
pub struct NullObserver {
  visible: Vec<String>,
}

impl NullObserver {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn take_visible(&mut self) -> Vec<String> {
    std::mem::take(&mut self.visible)
  }
}

impl SectionObserver for NullObserver {
  fn observe(&mut self, key: &str) {
    self.visible.push(key.to_string());
  }

  fn unobserve(&mut self, key: &str) {
    self.visible.retain(|k| k != key);
  }
}
