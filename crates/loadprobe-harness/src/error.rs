//! ---
//! lp_section: "11-verification"
//! lp_subsection: "01-harness"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Harness failure kinds and their exit codes."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use thiserror::Error;

use crate::component::BoxError;

/// Result alias used throughout the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Reasons a probe run fails. None of them are retried.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No component is registered under the requested id.
    #[error("no component registered under id '{id}' (known: {known})")]
    UnknownComponent {
        /// Requested id.
        id: String,
        /// Comma separated list of registered ids.
        known: String,
    },
    /// The component could not be instantiated.
    #[error("component '{component}' failed to construct: {source}")]
    Construction {
        /// Component id.
        component: &'static str,
        /// Underlying failure, or the panic payload.
        source: BoxError,
    },
    /// The identity attribute could not be read.
    #[error("component '{component}' attribute '{attribute}' could not be read: {source}")]
    AttributeRead {
        /// Component id.
        component: &'static str,
        /// Attribute name.
        attribute: &'static str,
        /// Underlying failure, or the panic payload.
        source: BoxError,
    },
    /// The identity attribute was read but is undefined.
    #[error("component '{component}' attribute '{attribute}' is undefined")]
    AttributeUndefined {
        /// Component id.
        component: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },
    /// The value did not match the configured expectation.
    #[error("component '{component}' attribute '{attribute}' is '{actual}', expected '{expected}'")]
    ValueMismatch {
        /// Component id.
        component: &'static str,
        /// Attribute name.
        attribute: &'static str,
        /// Value configured by the operator.
        expected: String,
        /// Value read from the component.
        actual: String,
    },
    /// The value could not be written to the output channel.
    #[error("failed to emit value of component '{component}': {source}")]
    Emit {
        /// Component id.
        component: &'static str,
        /// Write failure.
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Exit code for unknown ids and construction failures.
    pub const EXIT_CONSTRUCTION: u8 = 2;
    /// Exit code for unreadable or undefined attributes.
    pub const EXIT_ATTRIBUTE: u8 = 3;
    /// Exit code for output channel failures.
    pub const EXIT_EMIT: u8 = 4;
    /// Exit code for expectation mismatches.
    pub const EXIT_MISMATCH: u8 = 5;

    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::UnknownComponent { .. } | HarnessError::Construction { .. } => {
                Self::EXIT_CONSTRUCTION
            }
            HarnessError::AttributeRead { .. } | HarnessError::AttributeUndefined { .. } => {
                Self::EXIT_ATTRIBUTE
            }
            HarnessError::Emit { .. } => Self::EXIT_EMIT,
            HarnessError::ValueMismatch { .. } => Self::EXIT_MISMATCH,
        }
    }

    /// Whether the failure happened while constructing the component.
    pub fn is_construction(&self) -> bool {
        self.exit_code() == Self::EXIT_CONSTRUCTION
    }

    /// Whether the failure happened while reading the identity attribute.
    pub fn is_attribute_read(&self) -> bool {
        self.exit_code() == Self::EXIT_ATTRIBUTE
    }
}
