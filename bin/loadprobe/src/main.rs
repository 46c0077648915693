//! ---
//! lp_section: "05-entrypoint"
//! lp_subsection: "binary"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Process entry point for the load probe."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use loadprobe_common::config::{ProbeConfig, DEFAULT_CANDIDATES};
use loadprobe_common::logging::{init_tracing, LoggingGuard};
use loadprobe_common::version::VersionInfo;
use loadprobe_example::ExampleComponent;
use loadprobe_harness::{ComponentRegistry, Harness, Stage};
use loadprobe_logging::{log_probe_event, LogContext, ProbeEventOutcome};
use tracing::debug;

const SERVICE_NAME: &str = "loadprobe";
const EXIT_BOOTSTRAP: u8 = 1;

#[derive(Debug, Parser)]
#[command(
    name = SERVICE_NAME,
    about = "Construct the linked component and print its identity attribute",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Reserved. Accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    reserved: Vec<OsString>,
}

fn main() -> ExitCode {
    // Arguments never influence the run, so a parse failure is not fatal either.
    let cli = Cli::try_parse().unwrap_or(Cli {
        reserved: Vec::new(),
    });
    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let (config, _logging) = match bootstrap() {
        Ok(bootstrapped) => bootstrapped,
        Err(err) => {
            eprintln!("{SERVICE_NAME}: {err:#}");
            return EXIT_BOOTSTRAP;
        }
    };
    debug!(reserved = cli.reserved.len(), "ignoring reserved arguments");

    let mut registry = ComponentRegistry::new();
    registry.register::<ExampleComponent>();

    let harness = match &config.expected {
        Some(expected) => Harness::new().with_expected(expected.clone()),
        None => Harness::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match registry.probe(config.component.as_deref(), &harness, &mut out) {
        Ok(verification) => {
            let ctx = LogContext::new()
                .with_component(verification.component())
                .with_attribute(verification.attribute())
                .with_stage(Stage::Emitted.as_str());
            log_probe_event(
                Some(&ctx),
                "probe.run",
                "probe passed",
                0,
                ProbeEventOutcome::Success,
            );
            0
        }
        Err(err) => {
            let code = err.exit_code();
            let requested = config
                .component
                .as_deref()
                .or_else(|| registry.default_id())
                .unwrap_or_default();
            let mut ctx = LogContext::new()
                .with_component(requested)
                .with_stage(Stage::Failed.as_str());
            if let Some(attribute) = registry.attribute(requested) {
                ctx = ctx.with_attribute(attribute);
            }
            log_probe_event(
                Some(&ctx),
                "probe.run",
                &err.to_string(),
                code,
                ProbeEventOutcome::Fault,
            );
            code
        }
    }
}

fn bootstrap() -> Result<(ProbeConfig, LoggingGuard)> {
    let loaded = ProbeConfig::load_with_source(&DEFAULT_CANDIDATES)?;
    let guard = init_tracing(SERVICE_NAME, &loaded.config.logging)?;
    debug!(
        banner = %VersionInfo::current().banner(),
        config = ?loaded.source,
        "probe starting"
    );
    Ok((loaded.config, guard))
}
