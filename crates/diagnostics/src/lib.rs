//! Lightweight, env-configurable logging for the flatns crates.
//!
//! Levels come from the FLATNS_LOG environment variable:
//! - `off` (default) - no logs
//! - `info` - basic operation logs
//! - `debug` - detailed diagnostic logs
//! - `warn` / `error` - failures only

use std::sync::Once;

// Re-export emit so the macros can expand in other crates.
pub use emit;

static INIT: Once = Once::new();

/// Initialize logging from the FLATNS_LOG environment variable.
///
/// Safe to call more than once; only the first call does anything.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let level = std::env::var("FLATNS_LOG").unwrap_or_else(|_| "off".to_string());

        let min = match level.as_str() {
            "off" => return,
            "debug" => emit::Level::Debug,
            "warn" => emit::Level::Warn,
            "error" => emit::Level::Error,
            "info" => emit::Level::Info,
            other => {
                eprintln!("Warning: unknown FLATNS_LOG value '{}', using 'info'", other);
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(min))
            .init();

        // The emit runtime must outlive all logging calls; the process
        // owns it for its whole lifetime.
        std::mem::forget(rt);
    });
}

/// Log basic operations (listings, plan construction, executed steps).
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (skipped keys, per-step state).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems (degraded-mode fallbacks, failed steps).
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log unrecoverable problems.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn test_macros_compile() {
        log_info!("info message");
        log_debug!("debug message with {value}", value: 42);
        log_warn!("warn message");
        log_error!("error message");
    }
}
