//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTML pages and the JSON API both live under [`http`].

pub mod http;
