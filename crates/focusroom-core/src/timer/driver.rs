//! Cancelable scheduled tasks.
//!
//! A [`TaskHandle`] owns at most one live tokio task. Arming it always
//! aborts the previous task first, and every signal the task sends carries
//! the generation it was armed with. Cancelling bumps the generation, so a
//! signal that was already queued when the task was aborted is recognised
//! as stale and dropped by the receiver.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// One-second cadence of the timer driver.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Messages sent from scheduled tasks back to their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Tick { generation: u64 },
    CelebrationElapsed { generation: u64 },
}

impl Signal {
    pub fn generation(self) -> u64 {
        match self {
            Signal::Tick { generation } | Signal::CelebrationElapsed { generation } => generation,
        }
    }
}

#[derive(Debug, Default)]
pub struct TaskHandle {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `make(generation)` every `period`, starting one period from now.
    pub fn arm_every(
        &mut self,
        period: Duration,
        tx: UnboundedSender<Signal>,
        make: fn(u64) -> Signal,
    ) -> u64 {
        let generation = self.rearm();
        let signal = make(generation);
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(signal).is_err() {
                    break;
                }
            }
        }));
        generation
    }

    /// Send `make(generation)` once after `delay`.
    pub fn arm_after(
        &mut self,
        delay: Duration,
        tx: UnboundedSender<Signal>,
        make: fn(u64) -> Signal,
    ) -> u64 {
        let generation = self.rearm();
        let signal = make(generation);
        self.task = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(signal);
        }));
        generation
    }

    /// Abort the task, if any, and invalidate every signal it already sent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Whether `generation` belongs to the currently armed task.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && self.generation == generation
    }

    fn rearm(&mut self) -> u64 {
        self.cancel();
        self.generation
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
