//! Logging shims.
//!
//! With the `defmt` feature the macros forward to `defmt`, with `tracing` they
//! forward to `tracing`, and with neither they only evaluate their arguments.
//! Format strings must stay inside the subset both backends accept: `{}`,
//! `{:x}` and `{:#x}`.

#![allow(unused_macros)]

macro_rules! log_event {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(feature = "tracing")]
        ::tracing::$level!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! trace {
    ($($t:tt)*) => { log_event!(trace, $($t)*) };
}

macro_rules! debug {
    ($($t:tt)*) => { log_event!(debug, $($t)*) };
}

macro_rules! info {
    ($($t:tt)*) => { log_event!(info, $($t)*) };
}

macro_rules! warn {
    ($($t:tt)*) => { log_event!(warn, $($t)*) };
}

macro_rules! error {
    ($($t:tt)*) => { log_event!(error, $($t)*) };
}
