//! netcheck - container network definition validator
//!
//! Checks subnet, gateway and lease range configuration of container
//! networks, and container attachment requests against those networks.

mod cli;
mod error;
mod manifest;
mod network;

use cli::{Cli, Commands, NetworkAction};
use error::Result;
use network::{
    validate_attachment_request, validate_subnet, AttachmentRequest, Network, NetworkRegistry,
    PerNetworkOptions, SubnetConfig,
};
use std::net::IpAddr;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't require config
    if let Commands::Completion { shell } = cli.command {
        Cli::generate_completion(shell);
        return Ok(());
    }

    let config = match cli.config.as_slice() {
        [path] => manifest::load(path)?,
        paths => manifest::load_merged(paths)?,
    };
    let registry = NetworkRegistry::from_config(&config)?;

    match cli.command {
        Commands::Check => {
            println!("Configuration is valid");
            if registry.is_empty() {
                println!("  (no networks configured)");
            }
            for network in registry.iter() {
                print_summary(network);
            }
        }

        Commands::Network { action } => match action {
            NetworkAction::List { json } => {
                if json {
                    let networks: Vec<&Network> = registry.iter().collect();
                    println!("{}", serde_json::to_string_pretty(&networks)?);
                } else {
                    println!(
                        "{:<16} {:<10} {:<24} {:<20} {:<9} IPV6",
                        "NAME", "DRIVER", "SUBNET", "GATEWAY", "INTERNAL"
                    );
                    for network in registry.iter() {
                        for (i, subnet) in network.subnets.iter().enumerate() {
                            let gateway = subnet
                                .gateway
                                .map(|g| g.to_string())
                                .unwrap_or_else(|| "-".into());
                            let (name, driver) = if i == 0 {
                                (network.name.as_str(), network.driver.as_str())
                            } else {
                                ("", "")
                            };
                            println!(
                                "{:<16} {:<10} {:<24} {:<20} {:<9} {}",
                                name,
                                driver,
                                subnet.subnet.to_string(),
                                gateway,
                                network.internal,
                                network.ipv6_enabled
                            );
                        }
                        if network.subnets.is_empty() {
                            println!(
                                "{:<16} {:<10} {:<24} {:<20} {:<9} {}",
                                network.name, network.driver, "-", "-", network.internal, false
                            );
                        }
                    }
                }
            }
            NetworkAction::Inspect { name } => {
                let network = registry
                    .get(&name)
                    .ok_or_else(|| error::Error::NetworkNotFound(name.clone()))?;
                println!("{}", serde_json::to_string_pretty(network)?);
            }
            NetworkAction::Validate {
                subnet,
                gateway,
                lease_start,
                lease_end,
                internal,
            } => {
                let mut subnet_config = SubnetConfig::new(subnet);
                subnet_config.gateway = gateway;
                if lease_start.is_some() || lease_end.is_some() {
                    subnet_config = subnet_config.with_lease_range(lease_start, lease_end);
                }

                let mut used = config.config.used_networks.clone();
                used.extend(registry.used_networks());

                let subnet = validate_subnet(&subnet_config, !internal, &used)?;
                println!("Subnet: {}", subnet.subnet);
                if let Some(gw) = subnet.gateway {
                    println!("  Gateway: {}", gw);
                }
                if let Some(range) = &subnet.lease_range {
                    if let Some(start) = range.start_ip {
                        println!("  Lease start: {}", start);
                    }
                    if let Some(end) = range.end_ip {
                        println!("  Lease end: {}", end);
                    }
                }
            }
        },

        Commands::Attach {
            container_id,
            netns,
            name,
            networks,
            ips,
            aliases,
        } => {
            let request = build_attachment_request(
                container_id,
                name,
                networks,
                ips,
                aliases,
                &config.config.default_interface,
            );

            validate_attachment_request(&registry, &netns, &request)?;
            println!(
                "Attachment for container '{}' is valid ({} network(s))",
                request.container_id,
                request.networks.len()
            );
        }

        // Already handled above
        Commands::Completion { .. } => unreachable!(),
    }

    Ok(())
}

/// Assemble an attachment request from `attach` arguments
///
/// `--ip` and `--alias` for a network not named with `-n` join it on the
/// default interface.
fn build_attachment_request(
    container_id: String,
    name: String,
    networks: Vec<(String, Option<String>)>,
    ips: Vec<(String, IpAddr)>,
    aliases: Vec<(String, String)>,
    default_interface: &str,
) -> AttachmentRequest {
    let mut request = AttachmentRequest::new(container_id);
    request.container_name = name;
    for (net, iface) in networks {
        let iface = iface.unwrap_or_else(|| default_interface.to_string());
        request.networks.insert(net, PerNetworkOptions::new(iface));
    }
    for (net, ip) in ips {
        request
            .networks
            .entry(net)
            .or_insert_with(|| PerNetworkOptions::new(default_interface))
            .static_ips
            .push(ip);
    }
    for (net, alias) in aliases {
        request
            .networks
            .entry(net)
            .or_insert_with(|| PerNetworkOptions::new(default_interface))
            .aliases
            .push(alias);
    }
    request
}

fn print_summary(network: &Network) {
    let kind = if network.internal { "internal" } else { "external" };
    println!("  {} ({}, {})", network.name, network.driver, kind);
    for subnet in &network.subnets {
        match subnet.gateway {
            Some(gw) => println!("    {} via {}", subnet.subnet, gw),
            None => println!("    {}", subnet.subnet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_attachment_request() {
        let request = build_attachment_request(
            "abc".into(),
            "web-1".into(),
            vec![("web".into(), Some("eth1".into())), ("db".into(), None)],
            vec![("web".into(), "10.0.0.5".parse().unwrap())],
            vec![("db".into(), "database".into())],
            "eth0",
        );
        assert_eq!(request.container_name, "web-1");
        assert_eq!(request.networks["web"].interface_name, "eth1");
        let web_ip: IpAddr = "10.0.0.5".parse().unwrap();
        assert_eq!(request.networks["web"].static_ips, vec![web_ip]);
        assert_eq!(request.networks["db"].interface_name, "eth0");
        assert_eq!(request.networks["db"].aliases, vec!["database".to_string()]);
    }

    #[test]
    fn test_alias_joins_network() {
        let request = build_attachment_request(
            "abc".into(),
            String::new(),
            vec![],
            vec![("web".into(), "10.0.0.5".parse().unwrap())],
            vec![("web".into(), "www".into()), ("cache".into(), "redis".into())],
            "eth0",
        );
        assert_eq!(request.networks.len(), 2);
        assert_eq!(request.networks["web"].aliases, vec!["www".to_string()]);
        assert_eq!(request.networks["cache"].interface_name, "eth0");
        assert_eq!(request.networks["cache"].aliases, vec!["redis".to_string()]);
        assert!(request.networks["cache"].static_ips.is_empty());
    }
}
