use std::fmt;

use rqueue::{Queue, TrackingResource};

#[derive(Debug, Clone, Copy)]
struct Point {
  x: i32,
  y: i32,
}

impl fmt::Display for Point {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// Prints every element of `queue` on one line.
fn print_queue<T: fmt::Display>(
  label: &str,
  queue: &Queue<'_, T>,
) {
  let items: Vec<String> = queue.iter().map(ToString::to_string).collect();
  println!("{}: {}", label, items.join(" "));
}

fn main() -> Result<(), rqueue::Error> {
  // RUST_LOG=trace shows every allocation and release.
  env_logger::init();

  // One resource backs both queues.
  let resource = TrackingResource::new();

  let mut int_queue = Queue::new_in(&resource);
  int_queue.push(10)?;
  int_queue.push(20)?;
  int_queue.push(30)?;
  print_queue("int queue", &int_queue);

  let mut point_queue = Queue::new_in(&resource);
  point_queue.push(Point { x: 1, y: 2 })?;
  point_queue.push(Point { x: 3, y: 4 })?;
  point_queue.push_clone(&Point { x: 5, y: 6 })?;
  print_queue("point queue", &point_queue);

  println!(
    "\nledger: {} live blocks, {} live bytes, {} allocations",
    resource.live_blocks(),
    resource.live_bytes(),
    resource.total_allocations()
  );

  drop(point_queue);
  drop(int_queue);

  println!("after dropping both queues: {} live blocks", resource.live_blocks());

  Ok(())
}
