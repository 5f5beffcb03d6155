use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use tracing::debug;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    IsLoopback,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// The interface carries no private IPv4 address a router could forward to.
    NoPrivateIpv4,
}

/// Private IPv4 address of the interface a router would forward ports to.
///
/// Returns `None` when no interface qualifies, e.g. on a host that is only
/// connected through a VPN.
pub fn get_lan_ipv4() -> Option<Ipv4Addr> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    debug!("Inspecting {} network interface(s)", interfaces.len());
    select_lan_ipv4(&interfaces)
}

/// Picks the LAN address out of `interfaces`, preferring wired interfaces.
pub fn select_lan_ipv4(interfaces: &[NetworkInterface]) -> Option<Ipv4Addr> {
    let viable: Vec<&NetworkInterface> = interfaces
        .iter()
        .filter(|interface| match is_viable_lan_interface(interface) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping interface {}: {:?}", interface.name, reason);
                false
            }
        })
        .collect();

    let best: &NetworkInterface = viable
        .iter()
        .find(|interface| is_probably_wired(interface))
        .or(viable.first())
        .copied()?;

    private_ipv4(best)
}

fn is_viable_lan_interface(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if private_ipv4(interface).is_none() {
        return Err(ViabilityError::NoPrivateIpv4);
    }
    Ok(())
}

fn private_ipv4(interface: &NetworkInterface) -> Option<Ipv4Addr> {
    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if v4.ip().is_private() => Some(v4.ip()),
        _ => None,
    })
}

// Approximated by name: eth0, enp3s0, en0 and friends.
fn is_probably_wired(interface: &NetworkInterface) -> bool {
    interface.name.starts_with('e')
}
