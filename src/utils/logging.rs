//! Per-module switchable logging.
//!
//! Each macro forwards to the `log` crate only when the calling module
//! declares `const ENABLE_LOGS: bool = true;`, which lets noisy modules be
//! silenced without touching `RUST_LOG`.
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_info, log_warn};
//!
//! log_info!("stored session {id}");
//! ```

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
