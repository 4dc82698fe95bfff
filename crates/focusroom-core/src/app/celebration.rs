use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::timer::{Signal, TaskHandle};

/// Transient "well done" banner shown after a focus interval.
///
/// Lives outside the engine: it is a deferred side effect with its own
/// cancelable handle.
pub struct Celebration {
    visible: bool,
    duration: Duration,
    handle: TaskHandle,
}

impl Celebration {
    pub fn new(duration: Duration) -> Self {
        Self {
            visible: false,
            duration,
            handle: TaskHandle::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the banner and (re)arm its auto-clear.
    pub fn show(&mut self, tx: UnboundedSender<Signal>) {
        self.visible = true;
        self.handle.arm_after(self.duration, tx, |generation| {
            Signal::CelebrationElapsed { generation }
        });
    }

    /// Handle an elapsed signal. Returns `true` if it cleared the banner.
    pub fn on_elapsed(&mut self, generation: u64) -> bool {
        if !self.handle.is_current(generation) {
            return false;
        }
        self.handle.cancel();
        self.visible = false;
        true
    }

    pub fn cancel(&mut self) {
        self.handle.cancel();
        self.visible = false;
    }
}
