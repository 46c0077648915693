//! ---
//! lp_section: "01-core-functionality"
//! lp_subsection: "build"
//! lp_type: "source"
//! lp_scope: "build"
//! lp_description: "Captures build and git metadata for version banners."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Source tarballs carry no git metadata; vergen emits placeholders then.
    EmitBuilder::builder()
        .all_build()
        .all_cargo()
        .all_git()
        .emit()?;

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
