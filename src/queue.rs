use std::{fmt, marker::PhantomData, ptr::NonNull};

use log::trace;

use crate::{
  error::{Error, Result},
  iter::{Iter, IterMut},
  node::Node,
  resource::{MemoryResource, default_resource},
};

/// FIFO queue whose nodes live in blocks from a [`MemoryResource`].
///
/// Many queues may share one resource. The queue owns its nodes and hands
/// their storage back to the resource on `pop` and on drop.
pub struct Queue<'r, T> {
  head: Option<NonNull<Node<T>>>,
  tail: Option<NonNull<Node<T>>>,
  len: usize,
  resource: &'r dyn MemoryResource,
  _owns: PhantomData<T>,
}

impl<T> Queue<'static, T> {
  /// Creates a queue backed by [`default_resource`].
  pub fn new() -> Self {
    Self::new_in(default_resource())
  }
}

impl<T> Default for Queue<'static, T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'r, T> Queue<'r, T> {
  pub fn new_in(resource: &'r dyn MemoryResource) -> Self {
    Self {
      head: None,
      tail: None,
      len: 0,
      resource,
      _owns: PhantomData,
    }
  }

  /// The resource node storage comes from.
  pub fn resource(&self) -> &'r dyn MemoryResource {
    self.resource
  }

  /// Appends `value` at the back.
  ///
  /// On allocation failure the queue is unchanged and `value` is dropped.
  pub fn push(
    &mut self,
    value: T,
  ) -> Result<()> {
    let block = self
      .resource
      .allocate(Node::<T>::LAYOUT.size(), Node::<T>::LAYOUT.align())?;

    let node = block.cast::<Node<T>>();
    unsafe { node.as_ptr().write(Node::new(value)) };

    match self.tail {
      None => self.head = Some(node),
      Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
    }
    self.tail = Some(node);
    self.len += 1;

    trace!("Pushed node {:?}, len = {}", node, self.len);

    Ok(())
  }

  /// Appends a clone of `value` at the back.
  pub fn push_clone(
    &mut self,
    value: &T,
  ) -> Result<()>
  where
    T: Clone,
  {
    self.push(value.clone())
  }

  /// Removes the front element and returns it.
  pub fn pop(&mut self) -> Result<T> {
    let head = self.head.ok_or(Error::EmptyContainer)?;

    let node = unsafe { head.as_ptr().read() };
    self.head = node.next;
    if self.head.is_none() {
      self.tail = None;
    }
    self.len -= 1;

    unsafe { self.free_node(head) };

    Ok(node.value)
  }

  pub fn front(&self) -> Result<&T> {
    self
      .head
      .map(|head| unsafe { &(*head.as_ptr()).value })
      .ok_or(Error::EmptyContainer)
  }

  pub fn front_mut(&mut self) -> Result<&mut T> {
    self
      .head
      .map(|head| unsafe { &mut (*head.as_ptr()).value })
      .ok_or(Error::EmptyContainer)
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    debug_assert_eq!(self.head.is_none(), self.tail.is_none());
    debug_assert_eq!(self.head.is_none(), self.len == 0);

    self.len == 0
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(self.head, self.len)
  }

  /// Cursor at the front element; equals [`Queue::end`] when empty.
  pub fn begin(&self) -> Iter<'_, T> {
    self.iter()
  }

  /// The past-the-end cursor.
  pub fn end(&self) -> Iter<'_, T> {
    Iter::end()
  }

  pub fn iter_mut(&mut self) -> IterMut<'_, T> {
    IterMut::new(self.head, self.len)
  }

  /// Returns a node's storage to the resource. The value must already have
  /// been moved out or dropped.
  unsafe fn free_node(
    &self,
    node: NonNull<Node<T>>,
  ) {
    unsafe {
      self.resource.deallocate(
        node.cast(),
        Node::<T>::LAYOUT.size(),
        Node::<T>::LAYOUT.align(),
      )
    }
  }
}

impl<T> Drop for Queue<'_, T> {
  fn drop(&mut self) {
    let mut current = self.head.take();
    self.tail = None;

    while let Some(node) = current {
      unsafe {
        current = (*node.as_ptr()).next;
        node.as_ptr().drop_in_place();
        self.free_node(node);
      }
    }
  }
}

impl<T: fmt::Debug> fmt::Debug for Queue<'_, T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<'a, T> IntoIterator for &'a Queue<'_, T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Queue<'_, T> {
  type Item = &'a mut T;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;
  use crate::TrackingResource;

  #[test]
  fn test_push_front_pop() {
    let resource = TrackingResource::new();
    let mut queue = Queue::new_in(&resource);

    queue.push(10).unwrap();
    queue.push(20).unwrap();
    queue.push(30).unwrap();

    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    assert_eq!(queue.front(), Ok(&10));

    assert_eq!(queue.pop(), Ok(10));
    assert_eq!(queue.front(), Ok(&20));
    assert_eq!(queue.len(), 2);
  }

  #[test]
  fn test_empty_queue() {
    let resource = TrackingResource::new();
    let mut queue: Queue<'_, i32> = Queue::new_in(&resource);

    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.front(), Err(Error::EmptyContainer));
    assert_eq!(queue.front_mut(), Err(Error::EmptyContainer));
    assert_eq!(queue.pop(), Err(Error::EmptyContainer));
    assert_eq!(queue.begin(), queue.end());
    assert!(resource.blocks().is_empty());
  }

  #[test]
  fn test_drain_to_empty_and_refill() {
    let resource = TrackingResource::new();
    let mut queue = Queue::new_in(&resource);

    queue.push(1).unwrap();
    assert_eq!(queue.pop(), Ok(1));
    assert!(queue.is_empty());
    assert_eq!(queue.begin(), queue.end());

    queue.push(2).unwrap();
    queue.push(3).unwrap();
    assert_eq!(queue.front(), Ok(&2));
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
  }

  #[test]
  fn test_front_mut() {
    let resource = TrackingResource::new();
    let mut queue = Queue::new_in(&resource);

    queue.push(String::from("a")).unwrap();
    queue.front_mut().unwrap().push('b');

    assert_eq!(queue.front().map(String::as_str), Ok("ab"));
  }

  #[test]
  fn test_push_clone() {
    let resource = TrackingResource::new();
    let mut queue = Queue::new_in(&resource);

    let value = vec![1, 2, 3];
    queue.push_clone(&value).unwrap();
    queue.push(value).unwrap();

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pop(), queue.pop());
  }

  #[test]
  fn test_storage_routed_through_resource() {
    let resource = TrackingResource::new();
    let mut queue = Queue::new_in(&resource);

    queue.push(1u8).unwrap();
    queue.push(2u8).unwrap();
    assert_eq!(resource.live_blocks(), 2);
    assert_eq!(resource.live_bytes(), 2 * Node::<u8>::LAYOUT.size());

    queue.pop().unwrap();
    assert_eq!(resource.live_blocks(), 1);

    drop(queue);
    assert_eq!(resource.live_blocks(), 0);
  }

  #[test]
  fn test_bound_resource() {
    let resource = TrackingResource::new();
    let queue: Queue<'_, i32> = Queue::new_in(&resource);

    assert!(queue.resource().is_equal(&resource));
    assert!(!Queue::<i32>::new().resource().is_equal(&resource));
  }

  #[test]
  fn test_default_resource_queue() {
    let mut queue = Queue::new();
    queue.push("x").unwrap();
    queue.push("y").unwrap();

    assert_eq!(queue.pop(), Ok("x"));
    assert_eq!(format!("{:?}", queue), r#"["y"]"#);
  }

  struct DropCounter(Rc<Cell<usize>>);

  impl Drop for DropCounter {
    fn drop(&mut self) {
      self.0.set(self.0.get() + 1);
    }
  }

  #[test]
  fn test_drop_runs_value_destructors() {
    let drops = Rc::new(Cell::new(0));
    let resource = TrackingResource::new();

    {
      let mut queue = Queue::new_in(&resource);
      for _ in 0..5 {
        queue.push(DropCounter(drops.clone())).unwrap();
      }

      drop(queue.pop().unwrap());
      assert_eq!(drops.get(), 1);
    }

    assert_eq!(drops.get(), 5);
    assert_eq!(resource.live_blocks(), 0);
  }
}
