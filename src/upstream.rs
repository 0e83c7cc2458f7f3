use std::{
  alloc::{GlobalAlloc, Layout, System},
  mem,
  ptr::{self, NonNull},
};

use libc::c_void;

use crate::align::is_valid_alignment;

/// The heap a memory resource draws its storage from.
pub trait Upstream {
  /// Returns `None` if the heap cannot satisfy `layout`.
  fn allocate(
    &self,
    layout: Layout,
  ) -> Option<NonNull<u8>>;

  /// # Safety
  ///
  /// `ptr` must come from [`Upstream::allocate`] on this heap with the same
  /// `layout`, and must not have been released yet.
  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    layout: Layout,
  );
}

/// Layout requested from the heap for a caller's `(size, alignment)`.
///
/// Zero-size requests are bumped to one alignment unit, so the heap never
/// sees a zero-size layout. Returns `None` for invalid pairs.
pub fn heap_layout(
  size: usize,
  alignment: usize,
) -> Option<Layout> {
  if !is_valid_alignment(alignment) {
    return None;
  }

  let size = size.max(1);
  if size > usize::MAX - (alignment - 1) {
    return None;
  }

  Layout::from_size_align(crate::align_up!(size, alignment), alignment).ok()
}

/// The process's standard allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHeap;

impl Upstream for SystemHeap {
  fn allocate(
    &self,
    layout: Layout,
  ) -> Option<NonNull<u8>> {
    NonNull::new(unsafe { System.alloc(layout) })
  }

  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    layout: Layout,
  ) {
    unsafe { System.dealloc(ptr.as_ptr(), layout) }
  }
}

/// C heap through `posix_memalign(3)` and `free(3)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibcHeap;

impl Upstream for LibcHeap {
  fn allocate(
    &self,
    layout: Layout,
  ) -> Option<NonNull<u8>> {
    // posix_memalign wants at least pointer alignment.
    let alignment = layout.align().max(mem::size_of::<*mut c_void>());
    let mut address: *mut c_void = ptr::null_mut();

    let rc = unsafe { libc::posix_memalign(&mut address, alignment, layout.size()) };
    if rc != 0 {
      return None;
    }

    NonNull::new(address as *mut u8)
  }

  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    _layout: Layout,
  ) {
    unsafe { libc::free(ptr.as_ptr() as *mut c_void) }
  }
}
