use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use signal_hook::{consts::signal::*, low_level};

/// Counts received SIGINT and SIGTERM. The third signal falls through to the default
/// handler, i.e., kills the process.
#[derive(Clone, Debug)]
pub struct Cookie {
    signals: Arc<AtomicUsize>,
}

impl Cookie {
    pub fn new() -> Result<Self, std::io::Error> {
        let cookie = Self::unregistered();

        for flag in [SIGINT, SIGTERM] {
            let signals = Arc::clone(&cookie.signals);
            // SAFETY: only atomics and functions from signal-hook itself are used in the
            // handler
            unsafe {
                low_level::register(flag, move || {
                    let prev = signals.fetch_add(1, Ordering::SeqCst);
                    if prev >= 2 {
                        let _ = low_level::emulate_default_handler(flag);
                    }
                })?;
            };
        }

        Ok(cookie)
    }

    /// A cookie that is not connected to any signals, it only terminates through
    /// [`Cookie::terminate`].
    pub fn unregistered() -> Self {
        Self {
            signals: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn terminate(&self) {
        self.signals.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_terminating(&self) -> bool {
        self.signals.load(Ordering::SeqCst) >= 1
    }
}
