//! Low-level probes: raw TCP connects and single HTTP requests.

pub mod http;
pub mod tcp;
