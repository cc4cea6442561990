//! Signal handling for graceful daemon shutdown.
//!
//! Provides Unix signal handling (SIGTERM, SIGINT) for clean shutdown of
//! the watchdog daemon. Handlers only touch atomics, so they stay
//! async-signal-safe; the supervisor loop polls the flag between ticks.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tracing::debug;

// Written from the signal handlers, read from the supervisor loop.
static SIGNAL_FLAG: AtomicBool = AtomicBool::new(false);
static SIGNAL_COUNT: AtomicU32 = AtomicU32::new(0);

/// Shared shutdown state for one handler instance.
///
/// Signals land in process-wide statics; manual shutdown requests (cycle
/// limit reached, fatal error) are per instance.
#[derive(Debug, Default)]
pub struct SignalState {
    manual_shutdown: AtomicBool,
}

impl SignalState {
    /// Create a new signal state.
    pub fn new() -> Self {
        Self {
            manual_shutdown: AtomicBool::new(false),
        }
    }

    /// Check if shutdown has been requested manually.
    #[inline]
    pub fn shutdown_requested(&self) -> bool {
        self.manual_shutdown.load(Ordering::Relaxed)
    }

    /// Request shutdown (can be called from any thread).
    pub fn request_shutdown(&self) {
        self.manual_shutdown.store(true, Ordering::Relaxed);
    }
}

/// Handle for signal management.
#[derive(Clone)]
pub struct SignalHandler {
    state: Arc<SignalState>,
}

impl SignalHandler {
    /// Create a new signal handler and register signal handlers.
    ///
    /// On Unix systems, this registers handlers for SIGTERM and SIGINT.
    /// On other platforms, this creates a handler that only supports
    /// manual shutdown.
    ///
    /// # Errors
    ///
    /// Reserved for registration failures; the libc path cannot fail today.
    pub fn new() -> std::io::Result<Self> {
        let handler = Self {
            state: Arc::new(SignalState::new()),
        };

        #[cfg(unix)]
        handler.register_unix_handlers();

        Ok(handler)
    }

    /// Register Unix signal handlers.
    #[cfg(unix)]
    fn register_unix_handlers(&self) {
        use std::os::raw::c_int;

        extern "C" fn shutdown_handler(_: c_int) {
            SIGNAL_FLAG.store(true, Ordering::Relaxed);
            SIGNAL_COUNT.fetch_add(1, Ordering::Relaxed);
        }

        unsafe {
            libc::signal(libc::SIGTERM, shutdown_handler as libc::sighandler_t);
            libc::signal(libc::SIGINT, shutdown_handler as libc::sighandler_t);
        }

        debug!("Unix signal handlers registered");
    }

    /// Check if shutdown has been requested, by signal or manually.
    #[inline]
    pub fn shutdown_requested(&self) -> bool {
        self.state.shutdown_requested() || SIGNAL_FLAG.load(Ordering::Relaxed)
    }

    /// Manually request shutdown.
    pub fn request_shutdown(&self) {
        self.state.request_shutdown();
    }

    /// Total number of shutdown signals received by the process.
    #[must_use]
    pub fn signal_count(&self) -> u32 {
        SIGNAL_COUNT.load(Ordering::Relaxed)
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new().expect("Failed to create signal handler")
    }
}
