use std::sync::atomic::{AtomicU8, Ordering};

// 0 = quiet, 1 = -v (requests, timings), 2 = -vv (per-game detail)
static LEVEL: AtomicU8 = AtomicU8::new(0);

pub fn set(level: u8) {
    LEVEL.store(level, Ordering::Relaxed);
}

pub fn level() -> u8 {
    LEVEL.load(Ordering::Relaxed)
}

pub fn enabled() -> bool {
    level() >= 1
}

pub fn trace_enabled() -> bool {
    level() >= 2
}

// Visible crate-wide through `#[macro_use] mod verbose;` in main.rs.
macro_rules! vprintln {
    ($($arg:tt)*) => {{
        if crate::verbose::enabled() {
            eprintln!($($arg)*);
        }
    }}
}

macro_rules! vvprintln {
    ($($arg:tt)*) => {{
        if crate::verbose::trace_enabled() {
            eprintln!($($arg)*);
        }
    }}
}
