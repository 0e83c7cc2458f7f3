#![allow(dead_code)]

use std::{alloc::Layout, cell::Cell, ptr::NonNull, rc::Rc};

use rqueue::{SystemHeap, Upstream};

/// Upstream heap that counts what passes through it.
#[derive(Debug, Default, Clone)]
pub struct CountingHeap {
  pub allocs: Rc<Cell<usize>>,
  pub frees: Rc<Cell<usize>>,
}

impl CountingHeap {
  pub fn outstanding(&self) -> usize {
    self.allocs.get() - self.frees.get()
  }
}

impl Upstream for CountingHeap {
  fn allocate(
    &self,
    layout: Layout,
  ) -> Option<NonNull<u8>> {
    let ptr = SystemHeap.allocate(layout)?;
    self.allocs.set(self.allocs.get() + 1);
    Some(ptr)
  }

  unsafe fn deallocate(
    &self,
    ptr: NonNull<u8>,
    layout: Layout,
  ) {
    self.frees.set(self.frees.get() + 1);
    unsafe { SystemHeap.deallocate(ptr, layout) }
  }
}

/// Upstream heap that refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustedHeap;

impl Upstream for ExhaustedHeap {
  fn allocate(
    &self,
    _layout: Layout,
  ) -> Option<NonNull<u8>> {
    None
  }

  unsafe fn deallocate(
    &self,
    _ptr: NonNull<u8>,
    _layout: Layout,
  ) {
    unreachable!("nothing was ever allocated")
  }
}
