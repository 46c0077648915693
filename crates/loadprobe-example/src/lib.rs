//! ---
//! lp_section: "12-components"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Reference component under test."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
//! A trivially constructible component whose name identifies it.

use loadprobe_harness::{BoxError, Component};

/// Reference component probed by the default `loadprobe` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleComponent {
    name: String,
}

impl ExampleComponent {
    pub const NAME: &'static str = "ExampleComponent";

    pub fn new() -> Self {
        Self {
            name: Self::NAME.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for ExampleComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ExampleComponent {
    const ID: &'static str = "example";

    fn construct() -> Result<Self, BoxError> {
        Ok(Self::new())
    }

    fn identity(&self) -> Result<Option<String>, BoxError> {
        Ok(Some(self.name.clone()))
    }
}
