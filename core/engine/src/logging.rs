//! FILENAME: core/engine/src/logging.rs
//! PURPOSE: Category-tagged logging macros for the engine.
//! CONTEXT: Thin wrappers over the `log` facade. The category becomes the log
//! target, so a host can filter e.g. `CALC=debug,DEPS=warn`. The engine never
//! installs a logger itself.
//!
//! CATEGORIES:
//! - "CALC": evaluation and recalculation passes
//! - "GRID": cell storage changes (resize, error writes)
//! - "DEPS": dependency graph edits and cycle detection

macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, $($arg)*)
    };
}

macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        ::log::info!(target: $cat, $($arg)*)
    };
}

macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        ::log::warn!(target: $cat, $($arg)*)
    };
}

// ENTER/EXIT macros for function tracing

macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "[ENTER] {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "[ENTER] {} {}", $func, format_args!($($arg)*))
    };
}

macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "[EXIT] {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "[EXIT] {} {}", $func, format_args!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub(crate) use log_debug;
pub(crate) use log_enter;
pub(crate) use log_exit;
pub(crate) use log_info;
pub(crate) use log_warn;
