//! ---
//! lp_section: "11-verification"
//! lp_subsection: "01-harness"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Verification harness exports."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
//! The verification harness constructs one instance of a component, reads its
//! identity attribute, and emits the value as a single line.
//!
//! Components implement [`Component`]; the harness never names a concrete
//! type. [`ComponentRegistry`] adds lookup by id for binaries that probe one
//! of several linked components.

#![warn(missing_docs)]

pub mod component;
pub mod error;
pub mod harness;
pub mod registry;

pub use component::{BoxError, Component};
pub use error::{HarnessError, Result};
pub use harness::{Harness, Stage, Verification};
pub use registry::ComponentRegistry;
