//! Tab selection
//!
//! The production picker draws uniformly over the open tabs. Tests swap
//! in a scripted picker so the "random" victim is known in advance.

use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Picks which tab position to close.
///
/// `count` is the number of candidates and is always at least 1; the
/// returned position is in `0..count`.
pub trait TabPicker: Send + Sync {
    fn pick(&self, count: usize) -> usize;
}

/// Uniform draw over all open tabs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformPicker;

impl TabPicker for UniformPicker {
    fn pick(&self, count: usize) -> usize {
        rand::rng().random_range(0..count)
    }
}

/// Replays a fixed sequence of draws.
///
/// When the sequence runs out it returns position 0. Entries are clamped
/// into range so the picker contract holds regardless of the script.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    draws: Mutex<VecDeque<usize>>,
}

impl ScriptedPicker {
    pub fn new<I: IntoIterator<Item = usize>>(draws: I) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }
}

impl TabPicker for ScriptedPicker {
    fn pick(&self, count: usize) -> usize {
        let mut draws = self.draws.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        draws.pop_front().unwrap_or(0).min(count.saturating_sub(1))
    }
}
