//! ---
//! lp_section: "03-logging"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Context-enriched logging macros."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
//! Macros forwarding to `tracing::event!` with the probe's structured fields.

#[doc(hidden)]
#[macro_export]
macro_rules! __probe_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            component = ctx.component.unwrap_or(""),
            attribute = ctx.attribute.unwrap_or(""),
            stage = ctx.stage.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with probe context.
///
/// Kept for tests and embedders; the harness itself logs stages at debug level.
#[macro_export]
macro_rules! probe_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__probe_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__probe_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with probe context.
#[macro_export]
macro_rules! probe_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__probe_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__probe_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with probe context.
///
/// Kept for tests and embedders; run verdicts go through `log_probe_event`.
#[macro_export]
macro_rules! probe_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__probe_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__probe_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
