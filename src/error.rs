use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by memory resources and queues.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The upstream heap could not satisfy a request, or the request did not
  /// describe a valid layout.
  #[error("allocation failed: {size} bytes aligned to {alignment}")]
  AllocationFailure { size: usize, alignment: usize },

  /// `pop` or `front` on a queue with no elements.
  #[error("operation on empty queue")]
  EmptyContainer,
}
