use crate::error::{RangeError, check_position, check_range};
use crate::traits::PermutationSequence;

/// Rearranges `values` into the lexicographically next permutation.
///
/// Behaves like C++ `std::next_permutation`: returns `false` and leaves the
/// slice sorted ascending if it was the last permutation.
pub fn next_permutation(values: &mut [i64]) -> bool {
    let Some(pivot) = values.windows(2).rposition(|w| w[0] < w[1]) else {
        values.reverse();
        return false;
    };
    let target = values
        .iter()
        .rposition(|&v| v > values[pivot])
        .expect("pivot has a greater successor");
    values.swap(pivot, target);
    values[pivot + 1..].reverse();
    true
}

/// Flat `Vec` reference with linear-time range operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NaiveSequence {
    data: Vec<i64>,
}

impl NaiveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }
}

impl From<Vec<i64>> for NaiveSequence {
    fn from(data: Vec<i64>) -> Self {
        Self { data }
    }
}

impl PermutationSequence for NaiveSequence {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn assign(&mut self, elements: &[i64]) {
        self.data.clear();
        self.data.extend_from_slice(elements);
    }

    fn get(&self, position: usize) -> Result<i64, RangeError> {
        let index = check_position(position, self.data.len())?;
        Ok(self.data[index])
    }

    fn sum(&mut self, left: usize, right: usize) -> Result<i128, RangeError> {
        let (start, end) = check_range(left, right, self.data.len())?;
        Ok(self.data[start..end].iter().map(|&v| i128::from(v)).sum())
    }

    fn set(&mut self, position: usize, value: i64) -> Result<(), RangeError> {
        let index = check_position(position, self.data.len())?;
        self.data[index] = value;
        Ok(())
    }

    fn insert(&mut self, position: usize, value: i64) -> Result<(), RangeError> {
        let index = check_position(position, self.data.len() + 1)?;
        self.data.insert(index, value);
        Ok(())
    }

    fn reverse(&mut self, left: usize, right: usize) -> Result<(), RangeError> {
        let (start, end) = check_range(left, right, self.data.len())?;
        self.data[start..end].reverse();
        Ok(())
    }

    fn rotate_left(&mut self, left: usize, right: usize, shift: usize) -> Result<(), RangeError> {
        let (start, end) = check_range(left, right, self.data.len())?;
        self.data[start..end].rotate_left(shift % (end - start));
        Ok(())
    }

    fn next_permutation(&mut self, left: usize, right: usize) -> Result<bool, RangeError> {
        let (start, end) = check_range(left, right, self.data.len())?;
        Ok(next_permutation(&mut self.data[start..end]))
    }

    fn to_vec(&self) -> Vec<i64> {
        self.data.clone()
    }
}
