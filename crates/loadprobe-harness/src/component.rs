//! ---
//! lp_section: "11-verification"
//! lp_subsection: "01-harness"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Contract between the harness and a component under test."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use std::error::Error as StdError;

/// Boxed error type returned by component implementations.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A unit the harness can construct and interrogate.
///
/// Construction must complete synchronously; the identity attribute has to be
/// readable as soon as [`Component::construct`] returns.
pub trait Component: Sized {
    /// Stable registry id.
    const ID: &'static str;

    /// Name of the identity attribute, used in diagnostics only.
    const ATTRIBUTE: &'static str = "name";

    /// Zero-argument construction path.
    fn construct() -> Result<Self, BoxError>;

    /// Read the identity attribute. `Ok(None)` means the attribute is undefined.
    fn identity(&self) -> Result<Option<String>, BoxError>;
}
