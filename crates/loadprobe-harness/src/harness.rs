//! ---
//! lp_section: "11-verification"
//! lp_subsection: "01-harness"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Construct-read-emit probe run."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

use loadprobe_logging::{probe_debug, LogContext};

use crate::component::{BoxError, Component};
use crate::error::{HarnessError, Result};

/// Stages of a single probe run.
///
/// `Start -> Constructing -> Reading -> Emitted`, or `Failed` from any live stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has happened yet.
    Start,
    /// The component is being instantiated.
    Constructing,
    /// The identity attribute is being read.
    Reading,
    /// The value was written to the output channel.
    Emitted,
    /// A step failed and the run is over.
    Failed,
}

impl Stage {
    /// Stable lowercase label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Constructing => "constructing",
            Stage::Reading => "reading",
            Stage::Emitted => "emitted",
            Stage::Failed => "failed",
        }
    }
}

/// Outcome of a successful probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    component: &'static str,
    attribute: &'static str,
    value: String,
}

impl Verification {
    /// Registry id of the probed component.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Name of the attribute that was read.
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    /// The attribute value as emitted.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume the verification and return the value.
    pub fn into_value(self) -> String {
        self.value
    }
}

/// One-shot probe: construct, read, emit.
#[derive(Debug, Clone, Default)]
pub struct Harness {
    expected: Option<String>,
}

impl Harness {
    /// Create a harness that accepts any defined attribute value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the attribute to equal `expected`.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Configured expectation, if any.
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// Probe `C` and write its identity attribute to `out` as one line.
    ///
    /// Nothing is written unless construction, the read, and the optional
    /// expectation check all succeed. Failures are only logged at debug level;
    /// reporting the verdict is left to the caller.
    pub fn run<C: Component>(&self, out: &mut dyn Write) -> Result<Verification> {
        let verification = self.verify::<C>()?;
        let ctx = LogContext::new()
            .with_component(C::ID)
            .with_attribute(C::ATTRIBUTE);

        writeln!(out, "{}", verification.value)
            .and_then(|()| out.flush())
            .map_err(|source| HarnessError::Emit {
                component: C::ID,
                source,
            })
            .inspect_err(|err| {
                probe_debug!(context = ctx.clone().with_stage(Stage::Failed.as_str()), "{}", err)
            })?;

        probe_debug!(
            context = ctx.with_stage(Stage::Emitted.as_str()),
            "value emitted"
        );
        Ok(verification)
    }

    /// Construct `C` and read its identity attribute without emitting anything.
    ///
    /// The instance is dropped before this returns.
    pub fn verify<C: Component>(&self) -> Result<Verification> {
        let ctx = LogContext::new()
            .with_component(C::ID)
            .with_attribute(C::ATTRIBUTE);
        self.construct_and_read::<C>(&ctx).inspect_err(|err| {
            probe_debug!(context = ctx.clone().with_stage(Stage::Failed.as_str()), "{}", err)
        })
    }

    fn construct_and_read<C: Component>(&self, ctx: &LogContext<'_>) -> Result<Verification> {
        probe_debug!(
            context = ctx.clone().with_stage(Stage::Constructing.as_str()),
            "constructing component"
        );
        let instance = guarded(C::construct).map_err(|source| HarnessError::Construction {
            component: C::ID,
            source,
        })?;

        probe_debug!(
            context = ctx.clone().with_stage(Stage::Reading.as_str()),
            "reading identity attribute"
        );
        let value = guarded(|| instance.identity())
            .map_err(|source| HarnessError::AttributeRead {
                component: C::ID,
                attribute: C::ATTRIBUTE,
                source,
            })?
            .ok_or(HarnessError::AttributeUndefined {
                component: C::ID,
                attribute: C::ATTRIBUTE,
            })?;

        if let Some(expected) = &self.expected {
            if *expected != value {
                return Err(HarnessError::ValueMismatch {
                    component: C::ID,
                    attribute: C::ATTRIBUTE,
                    expected: expected.clone(),
                    actual: value,
                });
            }
        }

        Ok(Verification {
            component: C::ID,
            attribute: C::ATTRIBUTE,
            value,
        })
    }
}

/// Run a component callback, turning a panic into an ordinary error.
fn guarded<T>(
    f: impl FnOnce() -> std::result::Result<T, BoxError>,
) -> std::result::Result<T, BoxError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(panic_message(payload.as_ref()).into()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_owned()
    }
}
