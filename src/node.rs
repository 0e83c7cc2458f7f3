use std::{alloc::Layout, ptr::NonNull};

/// A queue node, stored in a block obtained from the queue's resource.
pub(crate) struct Node<T> {
  pub value: T,
  pub next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
  /// The memory layout of a node.
  pub const LAYOUT: Layout = Layout::new::<Self>();

  pub fn new(value: T) -> Self {
    Self { value, next: None }
  }
}
