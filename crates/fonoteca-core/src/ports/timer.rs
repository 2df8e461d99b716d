use std::time::Duration;

/// Temporizadores que el motor puede tener armados a la vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerToken {
  /// Periodo de silencio del buscador antes de aplicar la consulta.
  SearchDebounce,
  /// Siguiente paso de drenado de la cola de embeds.
  EmbedDrain,
}

/// Port de "agenda esto para después" del host.
///
/// El motor nunca duerme por su cuenta: arma un token y el host llama de
/// vuelta a `Browser::timer_fired(token)` cuando vence. Armar un token ya
/// armado lo reprograma; `cancel` lo descarta sin disparar.
pub trait TimerHost {
  fn schedule(&mut self, token: TimerToken, delay: Duration);
  fn cancel(&mut self, token: TimerToken);
}

/// Host nulo: ignora toda programación. Útil para tests que disparan
/// `timer_fired` a mano.
#[derive(Debug, Default)]
pub struct NullTimerHost;

impl TimerHost for NullTimerHost {
  fn schedule(&mut self, _token: TimerToken, _delay: Duration) {}

  fn cancel(&mut self, _token: TimerToken) {}
}
