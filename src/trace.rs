//! Internal trace hook; a no-op unless the `tracing` feature is enabled.

macro_rules! trace_event {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!($($argument)*);
        }
    };
}
