//! Command-line interface for netcheck
//!
//! Uses clap with derive for type-safe CLI parsing

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::net::IpAddr;
use std::path::PathBuf;

/// netcheck - container network definition validator
#[derive(Parser)]
#[command(name = "netcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (repeat to merge, later files win)
    #[arg(short, long, default_value = "netcheck.toml")]
    pub config: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate every network in the configuration
    Check,

    /// Network inspection and ad-hoc subnet validation
    Network {
        #[command(subcommand)]
        action: NetworkAction,
    },

    /// Validate a container attachment request against configured networks
    Attach {
        /// Container ID
        container_id: String,

        /// Path of the container's network namespace
        #[arg(long)]
        netns: String,

        /// Container name
        #[arg(long, default_value = "")]
        name: String,

        /// Network to join, optionally with interface name (NAME or NAME=IFACE)
        #[arg(short, long = "network", value_parser = parse_network_opt)]
        networks: Vec<(String, Option<String>)>,

        /// Static IP on a network (NAME=IP, repeatable)
        #[arg(long = "ip", value_parser = parse_static_ip)]
        ips: Vec<(String, IpAddr)>,

        /// DNS alias on a network (NAME=ALIAS, repeatable)
        #[arg(long = "alias", value_parser = parse_key_val)]
        aliases: Vec<(String, String)>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Actions for the network command
#[derive(Subcommand)]
pub enum NetworkAction {
    /// List all validated networks
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show a validated network as JSON
    Inspect {
        /// Network name
        name: String,
    },

    /// Validate a single subnet against configured networks
    Validate {
        /// Subnet in CIDR notation (e.g., 10.0.1.0/24)
        #[arg(short, long)]
        subnet: String,

        /// Gateway address (defaults to first usable in subnet)
        #[arg(short, long)]
        gateway: Option<IpAddr>,

        /// First address of the lease range
        #[arg(long)]
        lease_start: Option<IpAddr>,

        /// Last address of the lease range
        #[arg(long)]
        lease_end: Option<IpAddr>,

        /// Treat the subnet as part of an internal network (no default gateway)
        #[arg(long)]
        internal: bool,
    },
}

/// Parse key=value pairs
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Parse NAME=IP
fn parse_static_ip(s: &str) -> Result<(String, IpAddr), String> {
    let (name, ip) = parse_key_val(s)?;
    let ip = ip
        .parse::<IpAddr>()
        .map_err(|e| format!("invalid IP address `{ip}`: {e}"))?;
    Ok((name, ip))
}

/// Parse NAME or NAME=IFACE
fn parse_network_opt(s: &str) -> Result<(String, Option<String>), String> {
    match s.split_once('=') {
        Some((name, iface)) => Ok((name.to_string(), Some(iface.to_string()))),
        None => Ok((s.to_string(), None)),
    }
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Generate shell completion scripts
    pub fn generate_completion(shell: Shell) {
        let mut cmd = Self::command();
        clap_complete::generate(shell, &mut cmd, "netcheck", &mut std::io::stdout());
    }
}
