//! Crate-internal logging.
//!
//! Forwards to `defmt` on target builds. Host test builds have no global
//! logger to link against, so the macros expand to nothing there.

macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::trace!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::warn!($($arg)*);
    }};
}

pub(crate) use log_trace;
pub(crate) use log_warn;
