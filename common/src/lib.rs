//! Shared building blocks for reachr: configuration, the error type, report
//! models and the platform capability traits.

pub mod config;
pub mod error;
pub mod message;
pub mod network;
pub mod report;
pub mod system;
pub mod websocket;
