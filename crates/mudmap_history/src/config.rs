//! Configuration for the history stack.

/// Configuration for the history stack.
///
/// Unbounded by default. With a capacity set, committing past it drops the
/// oldest snapshot, so undo can no longer reach that state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    capacity: Option<usize>,
}

impl HistoryConfig {
    /// Creates an unbounded configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to cap the number of snapshots.
    ///
    /// A capacity of zero is treated as one: the current state is always kept.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(if capacity == 0 { 1 } else { capacity });
        self
    }

    /// Maximum number of snapshots retained, or `None` for no limit.
    ///
    /// Never `Some(0)`.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Builder method to remove the cap.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.capacity = None;
        self
    }
}
