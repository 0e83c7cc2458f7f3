//! # rqueue - A Tracking Memory Resource and an Allocator-Aware Queue
//!
//! This crate pairs a **tracking memory resource**, which hands out raw
//! aligned blocks and keeps a ledger of every one of them, with a singly
//! linked **FIFO queue** whose nodes are allocated exclusively through such a
//! resource.
//!
//! ## Overview
//!
//! ```text
//!   Layering:
//!
//!   ┌────────────────────┐   ┌────────────────────┐
//!   │   Queue<'r, i32>   │   │  Queue<'r, Point>  │     many queues ...
//!   └─────────┬──────────┘   └─────────┬──────────┘
//!             │ &'r dyn MemoryResource │
//!             └───────────┬────────────┘
//!                         ▼
//!   ┌──────────────────────────────────────────────┐
//!   │              TrackingResource<U>             │    ... one resource
//!   │  ledger: [ BlockRecord, BlockRecord, ... ]   │
//!   └──────────────────────┬───────────────────────┘
//!                          ▼
//!   ┌──────────────────────────────────────────────┐
//!   │   Upstream heap (SystemHeap / LibcHeap)      │
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rqueue
//!   ├── align      - Alignment macro (align_up!) and checks
//!   ├── block      - BlockRecord ledger entry
//!   ├── error      - Error and Result
//!   ├── iter       - Iter / IterMut forward cursors
//!   ├── node       - Queue node (internal)
//!   ├── queue      - Queue implementation
//!   ├── resource   - MemoryResource, TrackingResource, DefaultResource
//!   └── upstream   - Upstream heaps
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rqueue::{Queue, TrackingResource};
//!
//! let resource = TrackingResource::new();
//! let mut queue = Queue::new_in(&resource);
//!
//! queue.push(10)?;
//! queue.push(20)?;
//! queue.push(30)?;
//!
//! assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
//! assert_eq!(queue.pop()?, 10);
//! assert_eq!(*queue.front()?, 20);
//! assert_eq!(resource.live_blocks(), 2);
//! # Ok::<(), rqueue::Error>(())
//! ```
//!
//! ## How It Works
//!
//! Each queue node is one block of the resource:
//!
//! ```text
//!   head                                  tail
//!    │                                     │
//!    ▼                                     ▼
//!   ┌──────────┬──────┐   ┌──────────┬──────┐   ┌──────────┬──────┐
//!   │ value 10 │ next ├──►│ value 20 │ next ├──►│ value 30 │ None │
//!   └──────────┴──────┘   └──────────┴──────┘   └──────────┴──────┘
//!    block #0               block #1               block #2
//! ```
//!
//! The ledger holds one record per address:
//!
//! ```text
//!   ┌────────────────┬──────┬───────────┬───────┐
//!   │ address        │ size │ alignment │ live  │
//!   ├────────────────┼──────┼───────────┼───────┤
//!   │ 0x5581_2a40    │  16  │     8     │ true  │
//!   │ 0x5581_2a60    │  16  │     8     │ false │ ◄── popped
//!   └────────────────┴──────┴───────────┴───────┘
//! ```
//!
//! Deallocating an address that is unknown or already freed does nothing.
//! When the resource is dropped, every record still live is released, so
//! even a leaked queue leaves no storage behind.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no synchronization, types are `!Send`/`!Sync`
//! - **No reuse**: freed blocks go straight back to the upstream heap
//! - **Linear ledger**: lookups scan every record ever made

pub mod align;
mod block;
mod error;
mod iter;
mod node;
mod queue;
mod resource;
mod upstream;

pub use block::BlockRecord;
pub use error::{Error, Result};
pub use iter::{Iter, IterMut};
pub use queue::Queue;
pub use resource::{DefaultResource, MemoryResource, TrackingResource, default_resource};
pub use upstream::{LibcHeap, SystemHeap, Upstream, heap_layout};
