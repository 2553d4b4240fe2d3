use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Whether SIGINT or SIGTERM arrived since [`initialize`].
pub fn received_ctrl_c() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Installs the handler. Once a signal arrives, elimination orderings stop
/// early and put the remaining vertices into a single bag.
pub fn initialize() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
}
