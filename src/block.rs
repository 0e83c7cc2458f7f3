use std::ptr::NonNull;

/// Ledger entry for one block handed out by a
/// [`TrackingResource`](crate::TrackingResource).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRecord {
  pub address: NonNull<u8>,
  pub size: usize,
  pub alignment: usize,
  pub live: bool,
}

impl BlockRecord {
  pub fn new(
    address: NonNull<u8>,
    size: usize,
    alignment: usize,
  ) -> Self {
    Self {
      address,
      size,
      alignment,
      live: true,
    }
  }

  /// Marks the block as released. Returns `false` if it already was.
  pub fn release(&mut self) -> bool {
    std::mem::replace(&mut self.live, false)
  }

  /// Reuses a freed record for a new block at the same address.
  pub fn revive(
    &mut self,
    size: usize,
    alignment: usize,
  ) {
    debug_assert!(!self.live);

    self.size = size;
    self.alignment = alignment;
    self.live = true;
  }
}
