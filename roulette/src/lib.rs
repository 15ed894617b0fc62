//! Roulette engine for Tab Roulette
//!
//! This crate holds the decision logic between the wire protocol and the
//! browser: which tab to close, what to remember about it, and when that
//! memory goes stale.
//!
//! # Features
//! - Random close with a last-tab guard
//! - Single-slot undo buffer with a five minute, lazily evaluated window
//! - Reopen that restores URL, position, and pinned state
//! - Request dispatch with silent drop of unrecognized actions

pub mod clock;
pub mod controller;
pub mod dispatch;
pub mod picker;
pub mod undo_buffer;

pub use clock::*;
pub use controller::*;
pub use dispatch::*;
pub use picker::*;
pub use undo_buffer::*;

// Re-export commonly used types
pub use tab_roulette_core::*;
