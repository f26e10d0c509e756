//! Process-wide shutdown state for watch mode.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Request shutdown (watch loop polls this and exits cleanly)
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Install the global Ctrl+C handler. Call once, before entering watch mode.
pub fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        request_shutdown();
    })?;
    Ok(())
}
