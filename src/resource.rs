use std::{
  cell::{Cell, RefCell},
  fmt,
  ptr::{self, NonNull},
};

use log::{debug, trace, warn};

use crate::{
  block::BlockRecord,
  error::{Error, Result},
  upstream::{SystemHeap, Upstream, heap_layout},
};

/// Source of raw storage for allocator-aware containers.
pub trait MemoryResource {
  /// Returns a block of at least `size` bytes aligned to `alignment`.
  fn allocate(
    &self,
    size: usize,
    alignment: usize,
  ) -> Result<NonNull<u8>>;

  /// Gives a block back to the resource.
  ///
  /// # Safety
  ///
  /// No reference into the block may be used afterwards. Resources that do
  /// not keep a ledger additionally require `ptr` to be a live block from
  /// this resource with the same `size` and `alignment`.
  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    size: usize,
    alignment: usize,
  );

  /// Two resources are equal only if they are the same instance.
  fn is_equal(
    &self,
    other: &dyn MemoryResource,
  ) -> bool {
    ptr::addr_eq(ptr::from_ref(self), ptr::from_ref(other))
  }
}

/// Memory resource that records every block it hands out.
///
/// Deallocating an unknown or already freed address is ignored. Blocks still
/// live when the resource is dropped are released then.
pub struct TrackingResource<U: Upstream = SystemHeap> {
  upstream: U,
  ledger: RefCell<Vec<BlockRecord>>,
  allocations: Cell<usize>,
}

impl TrackingResource {
  pub fn new() -> Self {
    Self::with_upstream(SystemHeap)
  }
}

impl Default for TrackingResource {
  fn default() -> Self {
    Self::new()
  }
}

impl<U: Upstream> TrackingResource<U> {
  pub fn with_upstream(upstream: U) -> Self {
    Self {
      upstream,
      ledger: RefCell::new(Vec::new()),
      allocations: Cell::new(0),
    }
  }

  pub fn upstream(&self) -> &U {
    &self.upstream
  }

  /// Snapshot of the ledger.
  pub fn blocks(&self) -> Vec<BlockRecord> {
    self.ledger.borrow().clone()
  }

  pub fn live_blocks(&self) -> usize {
    self.ledger.borrow().iter().filter(|b| b.live).count()
  }

  pub fn live_bytes(&self) -> usize {
    self
      .ledger
      .borrow()
      .iter()
      .filter(|b| b.live)
      .map(|b| b.size)
      .sum()
  }

  /// Number of successful `allocate` calls over the resource's lifetime.
  pub fn total_allocations(&self) -> usize {
    self.allocations.get()
  }

  /// Returns `true` if `ptr` is a live block of this resource.
  pub fn owns(
    &self,
    ptr: NonNull<u8>,
  ) -> bool {
    self
      .ledger
      .borrow()
      .iter()
      .any(|b| b.address == ptr && b.live)
  }

  /// Hands the block described by `record` back to the upstream heap.
  ///
  /// # Safety
  ///
  /// `record` must be live and describe a block from `upstream`.
  unsafe fn release(
    upstream: &U,
    record: &mut BlockRecord,
  ) {
    // The layout was valid when the block was allocated.
    if let Some(layout) = heap_layout(record.size, record.alignment) {
      unsafe { upstream.deallocate(record.address, layout) };
    }
    record.release();
  }
}

impl<U: Upstream> MemoryResource for TrackingResource<U> {
  fn allocate(
    &self,
    size: usize,
    alignment: usize,
  ) -> Result<NonNull<u8>> {
    let failure = Error::AllocationFailure { size, alignment };

    let layout = heap_layout(size, alignment).ok_or(failure)?;
    let Some(address) = self.upstream.allocate(layout) else {
      warn!("Upstream refused {} bytes aligned to {}", size, alignment);
      return Err(failure);
    };

    let mut ledger = self.ledger.borrow_mut();
    match ledger.iter_mut().find(|b| b.address == address) {
      Some(record) => {
        debug!("Reusing ledger record for {:?}", address);
        record.revive(size, alignment);
      }
      None => ledger.push(BlockRecord::new(address, size, alignment)),
    }
    self.allocations.set(self.allocations.get() + 1);

    trace!(
      "Allocated {} bytes aligned to {} at {:?}",
      size, alignment, address
    );

    Ok(address)
  }

  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    size: usize,
    alignment: usize,
  ) {
    let mut ledger = self.ledger.borrow_mut();

    let Some(record) = ledger.iter_mut().find(|b| b.address == ptr) else {
      debug!("Ignoring deallocation of unknown block {:?}", ptr);
      return;
    };

    if !record.live {
      debug!("Ignoring deallocation of freed block {:?}", ptr);
      return;
    }

    // Release with the recorded layout, whatever the caller passed.
    trace!(
      "Deallocating {:?} ({} bytes aligned to {}, caller said {}/{})",
      ptr, record.size, record.alignment, size, alignment
    );
    unsafe { Self::release(&self.upstream, record) };
  }
}

impl<U: Upstream> Drop for TrackingResource<U> {
  fn drop(&mut self) {
    let mut leaked = 0;

    for record in self.ledger.get_mut().iter_mut().filter(|b| b.live) {
      unsafe { Self::release(&self.upstream, record) };
      leaked += 1;
    }

    if leaked > 0 {
      debug!("Released {} live blocks on resource teardown", leaked);
    }
  }
}

impl<U: Upstream> fmt::Debug for TrackingResource<U> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("TrackingResource")
      .field("records", &self.ledger.borrow().len())
      .field("live_blocks", &self.live_blocks())
      .field("live_bytes", &self.live_bytes())
      .finish()
  }
}

/// Untracked pass-through to the system heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResource;

static DEFAULT_RESOURCE: DefaultResource = DefaultResource;

/// The process-wide resource used by [`Queue::new`](crate::Queue::new).
pub fn default_resource() -> &'static DefaultResource {
  &DEFAULT_RESOURCE
}

impl MemoryResource for DefaultResource {
  fn allocate(
    &self,
    size: usize,
    alignment: usize,
  ) -> Result<NonNull<u8>> {
    heap_layout(size, alignment)
      .and_then(|layout| SystemHeap.allocate(layout))
      .ok_or(Error::AllocationFailure { size, alignment })
  }

  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    size: usize,
    alignment: usize,
  ) {
    if let Some(layout) = heap_layout(size, alignment) {
      unsafe { SystemHeap.deallocate(ptr, layout) };
    }
  }
}
