//! Tab Roulette daemon
//!
//! Listens on a Unix socket, one request per connection, and applies the
//! roulette operations to a running browser through its DevTools port.

pub mod logger;
pub mod server;

pub use logger::*;
pub use server::*;
