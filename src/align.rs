/// Rounds `value` up to the next multiple of `align`.
///
/// `align` must be a power of two.
///
/// # Examples
///
/// ```rust
/// use rqueue::align_up;
///
/// assert_eq!(align_up!(13, 8), 16);
/// assert_eq!(align_up!(16, 8), 16);
/// assert_eq!(align_up!(1, 64), 64);
/// ```
#[macro_export]
macro_rules! align_up {
  ($value:expr, $align:expr) => {
    ($value + $align - 1) & !($align - 1)
  };
}

/// Returns `true` if `alignment` can be used to build a [`std::alloc::Layout`].
pub fn is_valid_alignment(alignment: usize) -> bool {
  alignment != 0 && alignment.is_power_of_two()
}
