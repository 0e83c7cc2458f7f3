use std::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use crate::node::Node;

/// Forward cursor over a [`Queue`](crate::Queue), front to back.
///
/// Cursors compare equal when they point at the same node; every exhausted
/// cursor equals [`Queue::end`](crate::Queue::end). A cursor borrows its
/// queue, so the queue cannot be pushed to or popped from while it lives.
pub struct Iter<'a, T> {
  node: Option<NonNull<Node<T>>>,
  remaining: usize,
  _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
  pub(crate) fn new(
    head: Option<NonNull<Node<T>>>,
    len: usize,
  ) -> Self {
    Self {
      node: head,
      remaining: len,
      _marker: PhantomData,
    }
  }

  pub(crate) fn end() -> Self {
    Self::new(None, 0)
  }

  /// The element under the cursor, `None` at the end.
  pub fn get(&self) -> Option<&'a T> {
    self.node.map(|node| unsafe { &(*node.as_ptr()).value })
  }
}

impl<T> Clone for Iter<'_, T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Iter<'_, T> {}

impl<T> PartialEq for Iter<'_, T> {
  fn eq(
    &self,
    other: &Self,
  ) -> bool {
    self.node == other.node
  }
}

impl<T> Eq for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  fn next(&mut self) -> Option<&'a T> {
    let node = self.node?;

    let node: &'a Node<T> = unsafe { &*node.as_ptr() };
    self.node = node.next;
    self.remaining -= 1;

    Some(&node.value)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("Iter")
      .field("node", &self.node)
      .field("remaining", &self.remaining)
      .finish()
  }
}

/// Mutable forward cursor over a [`Queue`](crate::Queue).
pub struct IterMut<'a, T> {
  node: Option<NonNull<Node<T>>>,
  remaining: usize,
  _marker: PhantomData<&'a mut T>,
}

impl<T> IterMut<'_, T> {
  pub(crate) fn new(
    head: Option<NonNull<Node<T>>>,
    len: usize,
  ) -> Self {
    Self {
      node: head,
      remaining: len,
      _marker: PhantomData,
    }
  }
}

impl<'a, T> Iterator for IterMut<'a, T> {
  type Item = &'a mut T;

  fn next(&mut self) -> Option<&'a mut T> {
    let node = self.node?;

    // Each node is yielded once, so the references never alias.
    unsafe {
      self.node = (*node.as_ptr()).next;
      self.remaining -= 1;

      Some(&mut (*node.as_ptr()).value)
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("IterMut")
      .field("node", &self.node)
      .field("remaining", &self.remaining)
      .finish()
  }
}
