//! ---
//! lp_section: "11-verification"
//! lp_subsection: "01-harness"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Lookup of probe entry points by component id."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use std::fmt;
use std::io::Write;

use indexmap::IndexMap;
use tracing::warn;

use crate::component::Component;
use crate::error::{HarnessError, Result};
use crate::harness::{Harness, Verification};

type ProbeFn = fn(&Harness, &mut dyn Write) -> Result<Verification>;

#[derive(Clone, Copy)]
struct Entry {
    attribute: &'static str,
    probe: ProbeFn,
}

/// Components a binary can probe, keyed by [`Component::ID`] in registration order.
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    entries: IndexMap<&'static str, Entry>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `C`. A second registration under the same id replaces the first.
    pub fn register<C: Component>(&mut self) -> &mut Self {
        let entry = Entry {
            attribute: C::ATTRIBUTE,
            probe: Harness::run::<C>,
        };
        if self.entries.insert(C::ID, entry).is_some() {
            warn!(component = C::ID, "component registered twice; keeping the latest");
        }
        self
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// The first registered id.
    pub fn default_id(&self) -> Option<&'static str> {
        self.entries.keys().next().copied()
    }

    /// Identity attribute name of the component registered under `id`.
    pub fn attribute(&self, id: &str) -> Option<&'static str> {
        self.entries.get(id).map(|entry| entry.attribute)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Probe the component registered under `id`, or the default when `id` is `None`.
    pub fn probe(
        &self,
        id: Option<&str>,
        harness: &Harness,
        out: &mut dyn Write,
    ) -> Result<Verification> {
        let requested = id.or_else(|| self.default_id()).unwrap_or_default();
        let entry = self
            .entries
            .get(requested)
            .ok_or_else(|| HarnessError::UnknownComponent {
                id: requested.to_owned(),
                known: self.ids().collect::<Vec<_>>().join(", "),
            })?;
        (entry.probe)(harness, out)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::BoxError;

    struct Alpha;
    struct Beta;

    impl Component for Alpha {
        const ID: &'static str = "alpha";

        fn construct() -> std::result::Result<Self, BoxError> {
            Ok(Alpha)
        }

        fn identity(&self) -> std::result::Result<Option<String>, BoxError> {
            Ok(Some("Alpha".into()))
        }
    }

    impl Component for Beta {
        const ID: &'static str = "beta";
        const ATTRIBUTE: &'static str = "label";

        fn construct() -> std::result::Result<Self, BoxError> {
            Ok(Beta)
        }

        fn identity(&self) -> std::result::Result<Option<String>, BoxError> {
            Ok(Some("Beta".into()))
        }
    }

    #[test]
    fn default_is_first_registered() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Alpha>().register::<Beta>();
        assert_eq!(registry.default_id(), Some("alpha"));
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["alpha", "beta"]);

        let mut out = Vec::new();
        let verification = registry.probe(None, &Harness::new(), &mut out).unwrap();
        assert_eq!(verification.component(), "alpha");
        assert_eq!(out, b"Alpha\n");
    }

    #[test]
    fn probes_by_id() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Alpha>().register::<Beta>();
        let mut out = Vec::new();
        let verification = registry
            .probe(Some("beta"), &Harness::new(), &mut out)
            .unwrap();
        assert_eq!(verification.attribute(), "label");
        assert_eq!(registry.attribute("beta"), Some("label"));
        assert_eq!(registry.attribute("alpha"), Some("name"));
        assert_eq!(registry.attribute("gamma"), None);
        assert_eq!(String::from_utf8(out).unwrap(), "Beta\n");
    }

    #[test]
    fn duplicate_registration_keeps_one_entry() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Alpha>().register::<Alpha>();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("alpha"));
    }

    #[test]
    fn unknown_and_empty_lookups_fail_as_construction() {
        let mut registry = ComponentRegistry::new();
        let mut out = Vec::new();
        let err = registry.probe(None, &Harness::new(), &mut out).unwrap_err();
        assert!(err.is_construction());

        registry.register::<Alpha>();
        let err = registry
            .probe(Some("gamma"), &Harness::new(), &mut out)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no component registered under id 'gamma' (known: alpha)"
        );
        assert!(out.is_empty());
    }
}
