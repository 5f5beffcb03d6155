pub mod network;
pub mod public_ip;
pub mod system;
pub mod tester;
pub mod websocket;
