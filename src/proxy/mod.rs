//! Proxy forwarding module for the upstream CMS API.

mod forwarder;

pub use forwarder::{ForwardOutcome, Forwarder};
