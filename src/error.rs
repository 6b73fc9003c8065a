use core::fmt;

/// Invalid-argument failures. The operation that returned one left all state unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    #[error("index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("insert position {index} is outside 0..={len}")]
    InsertOutOfRange { index: usize, len: usize },
    #[error("item {index} has no explicit size and its identifier has no default size")]
    MissingDefaultSize { index: usize },
}

/// Configuration failures raised while building a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("at least one template is required")]
    NoTemplates,
    #[error("template {position} repeats an identifier registered earlier")]
    DuplicateIdentifier { position: usize },
}

/// A node handed back by [`crate::EntityPool::release`] because its identifier has no pool.
pub struct Rejected<N> {
    pub node: N,
}

impl<N> fmt::Debug for Rejected<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected").finish_non_exhaustive()
    }
}

impl<N> fmt::Display for Rejected<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("released node's identifier has no registered pool")
    }
}

impl<N> core::error::Error for Rejected<N> {}
