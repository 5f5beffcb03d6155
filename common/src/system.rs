use async_trait::async_trait;

use crate::error::ProbeError;
use crate::report::FirewallReport;

/// Host introspection the tester relies on.
///
/// Implementations shell out to whatever the platform provides; platforms
/// without suitable tooling answer [`ProbeError::Unsupported`] instead of
/// trying anything.
#[async_trait]
pub trait SystemInspector: Send + Sync {
    async fn query_firewall_status(&self) -> Result<FirewallReport, ProbeError>;

    /// Address and default gateway lines of the local interface configuration.
    async fn query_network_interfaces(&self) -> Result<Vec<String>, ProbeError>;
}
