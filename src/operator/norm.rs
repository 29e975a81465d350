//! Lazily computed operator norm.
use std::cell::Cell;

/// Lifecycle of a cached norm. `Computed` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum NormState {
    #[default]
    Uncomputed,
    Computed(f64),
}

/// Compute-once cell for an operator norm.
///
/// The `Cell` keeps owners `!Sync`: an operator cannot be shared across
/// threads while its first `get_norm` may still write. Compute the norm
/// before handing instances to workers, or give each worker its own.
#[derive(Debug, Default)]
pub struct NormCache {
    state: Cell<NormState>,
}

impl NormCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NormState {
        self.state.get()
    }

    /// Return the cached value, running `compute` only on the first call.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> f64) -> f64 {
        match self.state.get() {
            NormState::Computed(value) => value,
            NormState::Uncomputed => {
                let value = compute();
                self.state.set(NormState::Computed(value));
                value
            }
        }
    }
}

impl Clone for NormCache {
    fn clone(&self) -> Self {
        Self {
            state: Cell::new(self.state.get()),
        }
    }
}
