use std::sync::atomic::{AtomicBool, Ordering};

static TICK_DEBUG: AtomicBool = AtomicBool::new(false);

pub fn set_tick_debug(enabled: bool) {
    TICK_DEBUG.store(enabled, Ordering::Relaxed);
}

pub fn tick_debug_enabled() -> bool {
    TICK_DEBUG.load(Ordering::Relaxed)
}
