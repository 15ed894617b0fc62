//! Tab sources for tab-roulette
//!
//! A tab source is the system's whole view of a browser: list the open tabs,
//! remove one, create one.
//!
//! # Backends
//! - `CdpTabSource` drives a Chromium-family browser over the DevTools
//!   `/json` HTTP endpoints
//! - `MockTabSource` emulates a single window in memory for tests

pub mod cdp;
pub mod mock;
pub mod traits;

pub use cdp::{CdpTabSource, CdpTarget, CdpVersion, DEFAULT_DEBUG_PORT};
pub use mock::MockTabSource;
pub use traits::TabSource;
