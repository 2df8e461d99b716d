use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

/// Minimum spacing between two embed activations. The embed provider is
/// remote and rate sensitive; one widget per tick, never bursts.
pub const EMBED_DELAY: Duration = Duration::from_millis(400);

/// Outcome of one drain step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainStep {
  /// Activate this item now; schedule the next step after the fixed delay.
  Activated(usize),
  /// Item was stale or already active: skipped, no delay charged.
  Skipped(usize),
  /// Queue empty or feature disabled.
  Idle,
}

/// Single-consumer queue that serializes embed-widget activation.
///
/// `enqueue` is idempotent: an item already queued or already activated is
/// never queued twice. Disabling clears the queue (the pending timer is the
/// caller's to cancel); re-enabling re-scans eligible items from scratch.
#[derive(Debug)]
pub struct EmbedQueue {
  queue: VecDeque<usize>,
  queued: HashSet<usize>,
  activated: HashSet<usize>,
  enabled: bool,
}

impl Default for EmbedQueue {
  fn default() -> Self {
    Self { queue: VecDeque::new(), queued: HashSet::new(), activated: HashSet::new(), enabled: true }
  }
}

impl EmbedQueue {
  pub fn new(enabled: bool) -> Self {
    Self { enabled, ..Self::default() }
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn set_enabled(&mut self, enabled: bool) {
    self.enabled = enabled;
    if !enabled {
      self.clear();
    }
  }

  /// Queues every item not yet queued nor activated. Safe to call
  /// repeatedly with overlapping sets.
  pub fn enqueue<I: IntoIterator<Item = usize>>(&mut self, items: I) {
    if !self.enabled {
      return;
    }

    for item in items {
      if self.activated.contains(&item) || !self.queued.insert(item) {
        continue;
      }
      self.queue.push_back(item);
    }
  }

  /// Pops one queued item. Stale items (no longer part of the visible
  /// structure) and already-activated items are skipped without delay cost;
  /// a live one comes back as `Activated` and is remembered so it never
  /// re-queues.
  pub fn drain_step<S>(&mut self, is_stale: S) -> DrainStep
  where
    S: Fn(usize) -> bool,
  {
    if !self.enabled {
      return DrainStep::Idle;
    }

    let Some(item) = self.queue.pop_front() else { return DrainStep::Idle };
    self.queued.remove(&item);

    if self.activated.contains(&item) {
      return DrainStep::Skipped(item);
    }

    if is_stale(item) {
      debug!(item, "stale embed dropped from queue");
      return DrainStep::Skipped(item);
    }

    self.activated.insert(item);
    DrainStep::Activated(item)
  }

  /// Empties the pending queue. Activation history survives so re-enabling
  /// never double-activates.
  pub fn clear(&mut self) {
    self.queue.clear();
    self.queued.clear();
  }

  pub fn pending(&self) -> usize {
    self.queue.len()
  }
}

/// Async driver for tokio hosts: repeatedly drains, sleeping the fixed delay
/// after each activation. Skips cost nothing; stops when the queue idles.
/// Self-rescheduling through the runtime's timer, no recursion.
pub async fn drive<S, A>(queue: Arc<Mutex<EmbedQueue>>, delay: Duration, is_stale: S, mut activate: A)
where
  S: Fn(usize) -> bool,
  A: FnMut(usize),
{
  loop {
    let step = match queue.lock() {
      Ok(mut guard) => guard.drain_step(&is_stale),
      Err(_) => return,
    };

    match step {
      DrainStep::Activated(item) => {
        activate(item);
        tokio::time::sleep(delay).await;
      }
      DrainStep::Skipped(_) => continue,
      DrainStep::Idle => return,
    }
  }
}
