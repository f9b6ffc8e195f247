use crate::error::RangeError;

/// Dynamic integer sequence with range sums and range next-permutation.
///
/// All positions are 1-indexed and ranges are inclusive, `1 <= left <= right <= len`.
/// Operations that return `Err` leave the sequence unchanged.
pub trait PermutationSequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the whole contents with `elements`.
    fn assign(&mut self, elements: &[i64]);

    fn get(&self, position: usize) -> Result<i64, RangeError>;

    /// Sum of `[left, right]`, widened so that no run of `i64` keys can overflow it.
    fn sum(&mut self, left: usize, right: usize) -> Result<i128, RangeError>;

    fn set(&mut self, position: usize, value: i64) -> Result<(), RangeError>;

    /// Inserts `value` so that it ends up at `position`; `len + 1` appends.
    fn insert(&mut self, position: usize, value: i64) -> Result<(), RangeError>;

    fn reverse(&mut self, left: usize, right: usize) -> Result<(), RangeError>;

    /// Rotates `[left, right]` so that the element at `left + shift` comes first.
    /// `shift` is taken modulo the range length.
    fn rotate_left(&mut self, left: usize, right: usize, shift: usize) -> Result<(), RangeError>;

    /// Rearranges `[left, right]` into the lexicographically next permutation.
    ///
    /// Returns `false` if the range was the last permutation and wrapped
    /// around to ascending order.
    fn next_permutation(&mut self, left: usize, right: usize) -> Result<bool, RangeError>;

    fn to_vec(&self) -> Vec<i64>;
}
