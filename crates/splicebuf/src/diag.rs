//! Diagnostics that forward to `tracing` when the `tracing` feature is on and
//! expand to nothing otherwise.

macro_rules! emit_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!($($arg)*);
        }
    };
}

macro_rules! emit_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::warn!($($arg)*);
        }
    };
}

pub(crate) use {emit_debug, emit_warn};
