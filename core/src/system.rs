//! Firewall and interface inspection through the platform's own tools.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use reachr_common::error::ProbeError;
use reachr_common::report::FirewallReport;
use reachr_common::system::SystemInspector;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// An external program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Runs the tool and returns its stdout.
    ///
    /// Spawn failures, non-zero exits and overruns of `limit` are errors. A
    /// tool that overruns is killed.
    pub async fn run(&self, limit: Duration) -> Result<String, ProbeError> {
        debug!("Running {} {}", self.program, self.args.join(" "));

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match timeout(limit, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(self.failure(e.to_string())),
            Err(_elapsed) => return Err(ProbeError::Timeout(limit)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.lines().map(str::trim).find(|line| !line.is_empty()) {
                Some(line) => format!("{} ({line})", output.status),
                None => output.status.to_string(),
            };
            return Err(self.failure(reason));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn failure(&self, reason: String) -> ProbeError {
        ProbeError::CommandFailed {
            program: self.program.clone(),
            reason,
        }
    }
}

/// Inspector backed by external commands.
#[derive(Debug, Clone)]
pub struct CommandInspector {
    pub firewall: ToolCommand,
    /// Run in order; their outputs are concatenated before filtering.
    pub interfaces: Vec<ToolCommand>,
    /// A line of interface output is kept when it contains any of these.
    pub markers: Vec<String>,
    pub timeout: Duration,
}

impl CommandInspector {
    pub fn windows(timeout: Duration) -> Self {
        Self {
            firewall: ToolCommand::new(
                "powershell",
                &["-Command", "Get-NetFirewallProfile | Select-Object Name,Enabled"],
            ),
            interfaces: vec![ToolCommand::new("ipconfig", &[])],
            markers: vec!["IPv4".into(), "Default Gateway".into()],
            timeout,
        }
    }

    pub fn linux(timeout: Duration) -> Self {
        Self {
            firewall: ToolCommand::new("ufw", &["status"]),
            interfaces: vec![
                ToolCommand::new("ip", &["-4", "addr", "show"]),
                ToolCommand::new("ip", &["route", "show", "default"]),
            ],
            markers: vec!["inet ".into(), "default via".into()],
            timeout,
        }
    }

    pub fn macos(timeout: Duration) -> Self {
        Self {
            firewall: ToolCommand::new(
                "/usr/libexec/ApplicationFirewall/socketfilterfw",
                &["--getglobalstate"],
            ),
            interfaces: vec![
                ToolCommand::new("ifconfig", &[]),
                ToolCommand::new("route", &["-n", "get", "default"]),
            ],
            markers: vec!["inet ".into(), "gateway".into()],
            timeout,
        }
    }
}

#[async_trait]
impl SystemInspector for CommandInspector {
    async fn query_firewall_status(&self) -> Result<FirewallReport, ProbeError> {
        let output = self.firewall.run(self.timeout).await?;
        Ok(FirewallReport::from_output(output))
    }

    async fn query_network_interfaces(&self) -> Result<Vec<String>, ProbeError> {
        let mut output = String::new();
        for tool in &self.interfaces {
            output.push_str(&tool.run(self.timeout).await?);
            output.push('\n');
        }
        Ok(filter_lines(&output, &self.markers))
    }
}

/// Stand-in for platforms without known tooling. Never runs anything.
#[derive(Debug, Clone)]
pub struct UnsupportedInspector {
    pub platform: String,
}

#[async_trait]
impl SystemInspector for UnsupportedInspector {
    async fn query_firewall_status(&self) -> Result<FirewallReport, ProbeError> {
        Err(ProbeError::Unsupported(self.platform.clone()))
    }

    async fn query_network_interfaces(&self) -> Result<Vec<String>, ProbeError> {
        Err(ProbeError::Unsupported(self.platform.clone()))
    }
}

/// The inspector matching the OS this binary was built for.
pub fn platform_inspector(timeout: Duration) -> Box<dyn SystemInspector> {
    #[cfg(target_os = "windows")]
    {
        Box::new(CommandInspector::windows(timeout))
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(CommandInspector::linux(timeout))
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(CommandInspector::macos(timeout))
    }
    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        let _ = timeout;
        Box::new(UnsupportedInspector {
            platform: std::env::consts::OS.to_string(),
        })
    }
}

/// Trimmed lines of `output` that contain at least one of `markers`.
pub fn filter_lines(output: &str, markers: &[String]) -> Vec<String> {
    output
        .lines()
        .filter(|line| markers.iter().any(|marker| line.contains(marker.as_str())))
        .map(|line| line.trim().to_string())
        .collect()
}
