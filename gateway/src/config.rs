//! Gateway configuration.
//!
//! Every setting is a command-line flag whose default is taken from the
//! environment (optionally seeded from a `.env` file). The parsed [`Cli`]
//! is validated once into an immutable [`GatewayConfig`] that is threaded
//! through the rest of the process.

use std::convert::Infallible;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use biconomy_exporter::{FeatureToggles, NodeClientConfig, ScrapeConfig};
use clap::{ArgAction, Parser, ValueEnum};

/// Log threshold; messages below it are dropped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// `EnvFilter` directives applying this level to the workspace crates.
    /// Dependencies stay at `warn`.
    pub fn filter_directives(self) -> String {
        let level = self.as_str();
        format!("warn,exporter_gateway={level},biconomy_exporter={level}")
    }
}

fn parse_toggle(raw: &str) -> Result<bool, Infallible> {
    Ok(FeatureToggles::parse_flag(raw))
}

/// Prometheus exporter for a Biconomy node.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Port the `/metrics` and `/health` server listens on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Base URL of the Biconomy node.
    #[arg(long, env = "BICONOMY_NODE_URL", default_value = "http://localhost:3000")]
    pub node_url: String,

    /// Milliseconds between the starts of consecutive scrapes.
    #[arg(long, env = "SCRAPE_INTERVAL", default_value_t = 30_000)]
    pub scrape_interval: u64,

    /// Minimum severity that is logged.
    #[arg(long, env = "LOG_LEVEL", value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Export `biconomy_node_health`. Only `false` disables.
    #[arg(long, env = "ENABLE_HEALTH_CHECK", action = ArgAction::Set, default_value = "true", value_parser = parse_toggle)]
    pub enable_health_check: bool,

    /// Export `biconomy_native_balance`. Only `false` disables.
    #[arg(long, env = "ENABLE_NATIVE_BALANCE", action = ArgAction::Set, default_value = "true", value_parser = parse_toggle)]
    pub enable_native_balance: bool,

    /// Export the execution queue gauges. Only `false` disables.
    #[arg(long, env = "ENABLE_QUEUE_METRICS", action = ArgAction::Set, default_value = "true", value_parser = parse_toggle)]
    pub enable_queue_metrics: bool,
}

/// Process-wide configuration, immutable after startup.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Address to bind the HTTP server to.
    pub listen_addr: SocketAddr,
    pub node: NodeClientConfig,
    pub scrape: ScrapeConfig,
    pub log_level: LogLevel,
}

impl From<Cli> for GatewayConfig {
    fn from(cli: Cli) -> Self {
        Self {
            // Bind to all interfaces so the port is reachable from outside a container.
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, cli.port)),
            node: NodeClientConfig {
                base_url: cli.node_url,
            },
            scrape: ScrapeConfig {
                interval: Duration::from_millis(cli.scrape_interval),
                toggles: FeatureToggles {
                    health_check: cli.enable_health_check,
                    native_balance: cli.enable_native_balance,
                    queue_metrics: cli.enable_queue_metrics,
                },
            },
            log_level: cli.log_level,
        }
    }
}
