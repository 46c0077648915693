//! ---
//! lp_section: "03-logging"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Structured logging context and lifecycle events."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Structured logging helpers shared by the harness and the probe binary.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline stderr subscriber at INFO for tests and development tools.
///
/// Test and development helper only. The `loadprobe` binary installs its
/// subscriber through `loadprobe_common::logging::init_tracing` instead.
/// Repeated calls are no-ops.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Registry id of the component being probed.
    pub component: Option<&'a str>,
    /// Identity attribute read from the component.
    pub attribute: Option<&'a str>,
    /// Current stage of the probe run.
    pub stage: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a component id.
    pub fn with_component(mut self, component: &'a str) -> Self {
        self.component = Some(component);
        self
    }

    /// Attach the attribute name.
    pub fn with_attribute(mut self, attribute: &'a str) -> Self {
        self.attribute = Some(attribute);
        self
    }

    /// Attach a run stage.
    pub fn with_stage(mut self, stage: &'a str) -> Self {
        self.stage = Some(stage);
        self
    }
}

/// Outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEventOutcome {
    /// The probe run passed.
    Success,
    /// The probe run failed.
    Fault,
}

impl ProbeEventOutcome {
    /// Stable lowercase label used in structured fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeEventOutcome::Success => "success",
            ProbeEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized probe lifecycle event with a success/fault outcome.
pub fn log_probe_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    exit_code: u8,
    outcome: ProbeEventOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    // `tracing::event!` needs a constant level.
    match outcome {
        ProbeEventOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            component = ctx.component.unwrap_or(""),
            attribute = ctx.attribute.unwrap_or(""),
            stage = ctx.stage.unwrap_or(""),
            exit_code,
            message = %message
        ),
        ProbeEventOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            component = ctx.component.unwrap_or(""),
            attribute = ctx.attribute.unwrap_or(""),
            stage = ctx.stage.unwrap_or(""),
            exit_code,
            message = %message
        ),
    }
}
