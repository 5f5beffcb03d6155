pub mod api;
pub mod check;
pub mod guide;
pub mod system;
pub mod ws;

use clap::{ArgAction, Parser, Subcommand};
use reachr_common::config::Config;

#[derive(Parser)]
#[command(name = "reachr")]
#[command(about = "Checks whether a local API and WebSocket stack is reachable locally and from the internet.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the HTTP API
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// WebSocket endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub ws_url: Option<String>,

    /// Base URL of the WebSocket server's HTTP API
    #[arg(long, global = true, value_name = "URL")]
    pub ws_http_url: Option<String>,

    /// Service that echoes the caller's public IP
    #[arg(long, global = true, value_name = "URL")]
    pub ip_echo_url: Option<String>,

    /// Do not look up the public IP and skip the external access checks
    #[arg(long, global = true)]
    pub skip_external: bool,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Less output; repeat to also hide the setup guide
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run every check and print the setup guide (default)
    #[command(alias = "c")]
    Check,
    /// Test the HTTP API locally and through the public IP
    #[command(alias = "a")]
    Api,
    /// Test the WebSocket server
    #[command(alias = "w")]
    Ws,
    /// Show firewall and network interface configuration
    #[command(alias = "s")]
    System,
    /// Print the port-forwarding and firewall setup guide
    #[command(alias = "g")]
    Guide,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Check)
    }

    /// Defaults from [`Config::default`], overridden by whatever flags were given.
    pub fn to_config(&self) -> Config {
        let mut cfg = Config::default();
        if let Some(url) = &self.api_url {
            cfg.api_base_url = url.clone();
        }
        if let Some(url) = &self.ws_url {
            cfg.ws_url = url.clone();
        }
        if let Some(url) = &self.ws_http_url {
            cfg.ws_http_url = url.clone();
        }
        if let Some(url) = &self.ip_echo_url {
            cfg.ip_echo_url = url.clone();
        }
        cfg.skip_external = self.skip_external;
        cfg.no_banner = self.no_banner;
        cfg.quiet = self.quiet;
        cfg
    }
}
