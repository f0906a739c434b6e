//! Inbound adapters that translate external requests into controller calls
//! while keeping framework details at the edge.

pub mod http;
