//! Optional debug tracing of slot state transitions.
//!
//! The original C library gated a ring of recent transitions behind
//! `MPMC_RING_CONF_DEBUG_TRACE_SIZE`, printed on demand with
//! `mpmc_ring_print_debug_trace`. This is the idiomatic replacement: one
//! `log::trace!` call per transition, compiled out entirely unless the
//! `trace` feature is enabled.

/// Emits a trace event for a slot transition when the `trace` feature is
/// enabled; expands to nothing otherwise.
macro_rules! ring_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        {
            ::log::trace!($($arg)*);
        }
    };
}

pub(crate) use ring_trace;
