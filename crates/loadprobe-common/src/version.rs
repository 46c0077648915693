//! ---
//! lp_section: "01-core-functionality"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Build metadata captured via vergen."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use serde::Serialize;

/// Compile-time version metadata captured via `vergen`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    /// Workspace semantic version.
    pub semver: String,
    /// Git commit hash captured at build time.
    pub git_sha: String,
    /// Build timestamp from the compilation environment.
    pub build_timestamp: String,
    /// Target triple used for the build.
    pub target: String,
    /// Cargo profile used during compilation.
    pub profile: String,
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            semver: env!("CARGO_PKG_VERSION").to_owned(),
            git_sha: option_env!("VERGEN_GIT_SHA")
                .unwrap_or("UNKNOWN")
                .to_owned(),
            build_timestamp: option_env!("VERGEN_BUILD_TIMESTAMP")
                .unwrap_or("UNKNOWN")
                .to_owned(),
            target: option_env!("VERGEN_CARGO_TARGET_TRIPLE")
                .unwrap_or("UNKNOWN")
                .to_owned(),
            profile: option_env!("VERGEN_CARGO_PROFILE")
                .unwrap_or("UNKNOWN")
                .to_owned(),
        }
    }

    /// Human readable banner used in logging surfaces.
    #[must_use]
    pub fn banner(&self) -> String {
        format!("loadprobe v{} (git {})", self.semver, self.git_sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_carries_package_version() {
        let info = VersionInfo::current();
        assert_eq!(info.semver, env!("CARGO_PKG_VERSION"));
        assert!(info.banner().starts_with("loadprobe v"));
        assert!(!info.git_sha.is_empty());
    }
}
