//! Handlers for `fastly compute *`.

use super::Context;
use crate::compute::build::{build, BuildOutcome};
use crate::compute::runner::SystemRunner;
use crate::compute::scaffold::{default_package_name, init, InitOptions};
use crate::compute::resolve_dir;
use crate::error::Error;
use crate::fs::OsFileSystem;
use crate::manifest::Language;
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum ComputeCommands {
    /// Initialize a new Compute package locally
    Init {
        /// Name of package, defaulting to directory name of the --path destination
        #[arg(long, short = 'n')]
        name: Option<String>,
        /// Description of the package
        #[arg(long, short = 'd', default_value = "")]
        description: String,
        /// Author(s) of the package
        #[arg(long = "author", short = 'a', value_name = "AUTHOR")]
        authors: Vec<String>,
        /// Language of the package
        #[arg(long, short = 'l', value_enum, default_value_t = Language::Rust)]
        language: Language,
        /// Existing service ID to record in fastly.toml
        #[arg(long, short = 's', value_name = "ID")]
        service_id: Option<String>,
        /// Destination to write the new package, defaulting to the current directory
        #[arg(long, short = 'p')]
        path: Option<String>,
        /// Skip the non-empty directory check
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Build a Compute package locally
    Build {
        /// Package directory, defaulting to the current directory
        #[arg(long, short = 'p')]
        path: Option<String>,
    },
}

pub fn execute(command: ComputeCommands, ctx: &Context, out: &mut dyn Write) -> Result<(), Error> {
    match command {
        ComputeCommands::Init {
            name,
            description,
            authors,
            language,
            service_id,
            path,
            force,
        } => {
            let dir = resolve_dir(path.as_deref())?;
            let name = name
                .filter(|n| !n.trim().is_empty())
                .or_else(|| default_package_name(&dir))
                .ok_or_else(|| Error::empty_flag("name"))?;

            let options = InitOptions {
                name,
                description,
                authors,
                language,
                service_id: service_id.or_else(|| ctx.env_service_id.clone()),
                dir,
                force,
            };
            let written = init(&OsFileSystem, &options)?;
            for path in &written {
                ctx.output.info(out, format!("  {}", path.display()))?;
            }
            ctx.output.success(
                out,
                format!(
                    "Initialized {} package {} in {}",
                    options.language,
                    options.name,
                    options.dir.display()
                ),
            )
        }
        ComputeCommands::Build { path } => {
            let dir = resolve_dir(path.as_deref())?;
            let outcome = build(&OsFileSystem, &SystemRunner, &dir)?;
            report_build(&outcome, ctx, out)
        }
    }
}

/// The digest is data, so it is printed even in quiet mode.
fn report_build(outcome: &BuildOutcome, ctx: &Context, out: &mut dyn Write) -> Result<(), Error> {
    writeln!(out, "SHA-256: {}", outcome.sha256)?;
    ctx.output.success(
        out,
        format!(
            "Built {} package {} ({})",
            outcome.language,
            outcome.package,
            outcome.artifact.display()
        ),
    )
}
