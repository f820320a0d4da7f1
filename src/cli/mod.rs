pub mod commands;
pub mod errors;
pub mod tracing_init;

use crate::cli::commands::compute::ComputeCommands;
use crate::cli::commands::logging::LoggingCommands;
use crate::cli::commands::service::ServiceCommands;
use crate::cli::commands::service_version::ServiceVersionCommands;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text and tables (default)
    #[default]
    Text,
    /// Output as JSON
    Json,
    /// Output as YAML
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    name = "fastly",
    author,
    version,
    about = "A CLI for interacting with the Fastly platform",
    long_about = "Manage Fastly services, service versions, logging endpoints and\n\
                  Compute packages from the command line.\n\n\
                  Examples:\n  \
                  fastly configure --token <TOKEN>\n  \
                  fastly service list\n  \
                  fastly logging gcs update --service-id <ID> --version 3 --name logs --period 600\n  \
                  fastly compute build"
)]
pub struct Cli {
    /// API token (overrides FASTLY_API_TOKEN and the stored token)
    #[arg(long, short = 't', global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// API endpoint (overrides FASTLY_API_ENDPOINT and the stored endpoint)
    #[arg(long, global = true, value_name = "URL", hide = true)]
    pub endpoint: Option<String>,

    /// Output all errors as structured JSON to stderr
    #[arg(long, global = true, help = "Output errors in JSON format")]
    pub json_errors: bool,

    /// Suppress non-essential output (success messages, hints)
    #[arg(
        long,
        short = 'q',
        global = true,
        help = "Suppress informational output"
    )]
    pub quiet: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbosity: u8,

    /// Output format for list and describe commands
    #[arg(
        long = "output",
        short = 'o',
        global = true,
        value_enum,
        value_name = "FORMAT",
        default_value = "text",
        help = "Output format for list and describe commands"
    )]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store an API token for later invocations
    #[command(long_about = "Validate an API token and store it in the configuration file.\n\n\
                      The token comes from --token or FASTLY_API_TOKEN and is checked\n\
                      against the API unless --no-verify is given.\n\n\
                      Example:\n  \
                      fastly configure --token <TOKEN>")]
    Configure {
        /// API endpoint to store
        #[arg(long = "api-endpoint", value_name = "URL")]
        api_endpoint: Option<String>,
        /// Store the token without checking it against the API
        #[arg(long)]
        no_verify: bool,
    },
    /// Show the customer and user the token belongs to
    Whoami,
    /// Manipulate services
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Manipulate service versions
    ServiceVersion {
        #[command(subcommand)]
        command: ServiceVersionCommands,
    },
    /// Manipulate logging endpoints
    Logging {
        #[command(subcommand)]
        command: LoggingCommands,
    },
    /// Build and scaffold Compute packages
    Compute {
        #[command(subcommand)]
        command: ComputeCommands,
    },
}
