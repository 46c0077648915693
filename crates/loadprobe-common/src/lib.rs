//! ---
//! lp_section: "01-core-functionality"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Shared primitives and utilities for the probe binary."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
//! Shared primitives for the loadprobe workspace.
//! This crate exposes configuration loading, tracing setup, and version
//! metadata consumed by the probe binary.

pub mod config;
pub mod logging;
pub mod version;

pub use config::{LoadedProbeConfig, LoggingConfig, ProbeConfig};
pub use logging::{init_tracing, LogFormat, LoggingGuard};
pub use version::VersionInfo;
