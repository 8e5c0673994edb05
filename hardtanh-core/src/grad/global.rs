use std::cell::Cell;

thread_local! {
    static RECORDING: Cell<bool> = const { Cell::new(true) };
}

/// Whether ops on the current thread record the autograd graph.
pub fn is_grad_enabled() -> bool {
    RECORDING.with(Cell::get)
}

/// Switches graph recording on the current thread and returns the previous mode.
pub fn set_grad_enabled(enabled: bool) -> bool {
    RECORDING.with(|recording| recording.replace(enabled))
}

/// Turns graph recording off until dropped, then restores the previous mode.
pub struct NoGradGuard {
    restore: bool,
}

impl NoGradGuard {
    pub fn new() -> Self {
        Self { restore: set_grad_enabled(false) }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        set_grad_enabled(self.restore);
    }
}
