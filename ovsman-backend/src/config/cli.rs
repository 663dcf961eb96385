//! CLI argument parsing for the ovsman backend.
//!
//! This module handles command line argument parsing using clap and provides
//! a structured representation of CLI configuration that the rest of the
//! backend consumes.

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

/// CLI configuration structure containing all parsed command line arguments
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub verbose: bool,
    pub command: CliCommand,
}

/// The selected subcommand with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Execute a scenario request read from a file, or stdin when no file
    /// is given.
    Apply {
        request_file: Option<String>,
        pretty: bool,
    },
    /// List built-in scenario templates and their steps.
    Templates,
    ListBridges,
    ListPorts { bridge: String },
    DumpFlows { bridge: String },
    ListNetns,
}

impl CliConfig {
    /// Parse CLI arguments and create CliConfig
    pub fn from_args() -> Result<Self> {
        let matches = Self::build_cli().get_matches();
        Self::from_matches(&matches)
    }

    /// Create CliConfig from pre-parsed ArgMatches (useful for testing)
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let verbose = matches.get_flag("verbose");

        let command = match matches.subcommand() {
            Some(("apply", sub)) => CliCommand::Apply {
                request_file: sub.get_one::<String>("request").cloned(),
                pretty: sub.get_flag("pretty"),
            },
            Some(("templates", _)) => CliCommand::Templates,
            Some(("list-bridges", _)) => CliCommand::ListBridges,
            Some(("list-ports", sub)) => CliCommand::ListPorts {
                bridge: sub
                    .get_one::<String>("bridge")
                    .ok_or_else(|| anyhow::anyhow!("Bridge name is required"))?
                    .clone(),
            },
            Some(("dump-flows", sub)) => CliCommand::DumpFlows {
                bridge: sub
                    .get_one::<String>("bridge")
                    .ok_or_else(|| anyhow::anyhow!("Bridge name is required"))?
                    .clone(),
            },
            Some(("list-netns", _)) => CliCommand::ListNetns,
            _ => return Err(anyhow::anyhow!("A subcommand is required")),
        };

        Ok(Self { verbose, command })
    }

    /// Build the clap Command structure
    pub fn build_cli() -> Command {
        Command::new("ovsman-backend")
            .version(env!("CARGO_PKG_VERSION"))
            .about("ovsman backend - privileged Open vSwitch scenario operations")
            .long_about(
                "A privileged backend for Open vSwitch management that executes \
                 scenario requests (ordered sequences of bridge, port, bond, mirror, \
                 flow and namespace operations) against the host's OVS toolset.",
            )
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .global(true)
                    .action(clap::ArgAction::SetTrue)
                    .help("Enable verbose logging")
                    .long_help(
                        "Enable verbose debug logging. This will show every toolset \
                         command the backend runs, with its full argument list.",
                    ),
            )
            .subcommand(
                Command::new("apply")
                    .about("Execute a scenario request and print the per-step report")
                    .arg(
                        Arg::new("request")
                            .short('r')
                            .long("request")
                            .value_name("FILE")
                            .help("JSON request file (reads stdin when omitted)")
                            .required(false),
                    )
                    .arg(
                        Arg::new("pretty")
                            .long("pretty")
                            .action(clap::ArgAction::SetTrue)
                            .help("Pretty-print the report JSON"),
                    ),
            )
            .subcommand(Command::new("templates").about("List built-in scenario templates"))
            .subcommand(Command::new("list-bridges").about("List all bridges"))
            .subcommand(
                Command::new("list-ports")
                    .about("List the ports of a bridge")
                    .arg(
                        Arg::new("bridge")
                            .short('b')
                            .long("bridge")
                            .value_name("BRIDGE")
                            .help("Bridge name")
                            .required(true),
                    ),
            )
            .subcommand(
                Command::new("dump-flows")
                    .about("Dump the OpenFlow table of a bridge")
                    .arg(
                        Arg::new("bridge")
                            .short('b')
                            .long("bridge")
                            .value_name("BRIDGE")
                            .help("Bridge name")
                            .required(true),
                    ),
            )
            .subcommand(Command::new("list-netns").about("List network namespaces"))
    }

    /// Validate CLI configuration
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            CliCommand::Apply {
                request_file: Some(path),
                ..
            } if path.is_empty() => Err(anyhow::anyhow!("Request file path cannot be empty")),
            CliCommand::ListPorts { bridge } | CliCommand::DumpFlows { bridge }
                if bridge.is_empty() =>
            {
                Err(anyhow::anyhow!("Bridge name cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}
