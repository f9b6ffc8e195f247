/// Aggregate cached on every treap node, describing the in-order sequence of
/// its subtree.
///
/// - `inc_run` is the length of the longest non-decreasing prefix.
/// - `dec_run` is the length of the longest non-increasing suffix.
///
/// Reversing a sequence swaps the boundary keys and swaps the two runs, so a
/// summary can be reversed in O(1) without looking at the subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub size: u32,
    pub sum: i128,
    pub leftmost: i64,
    pub rightmost: i64,
    pub inc_run: u32,
    pub dec_run: u32,
}

impl Summary {
    pub fn from_key(key: i64) -> Self {
        Self {
            size: 1,
            sum: i128::from(key),
            leftmost: key,
            rightmost: key,
            inc_run: 1,
            dec_run: 1,
        }
    }

    /// Summary of `left ++ [key] ++ right`.
    pub fn merge(left: Option<&Self>, key: i64, right: Option<&Self>) -> Self {
        let left_size = left.map_or(0, |l| l.size);
        let right_size = right.map_or(0, |r| r.size);

        // The prefix run reaches `key` only if it spans all of `left`.
        let inc_run = match left {
            Some(l) if l.inc_run < l.size || l.rightmost > key => l.inc_run,
            _ => {
                let through_right = match right {
                    Some(r) if r.leftmost >= key => r.inc_run,
                    _ => 0,
                };
                left_size + 1 + through_right
            }
        };

        let dec_run = match right {
            Some(r) if r.dec_run < r.size || r.leftmost > key => r.dec_run,
            _ => {
                let through_left = match left {
                    Some(l) if l.rightmost >= key => l.dec_run,
                    _ => 0,
                };
                right_size + 1 + through_left
            }
        };

        Self {
            size: left_size + 1 + right_size,
            sum: left.map_or(0, |l| l.sum) + i128::from(key) + right.map_or(0, |r| r.sum),
            leftmost: left.map_or(key, |l| l.leftmost),
            rightmost: right.map_or(key, |r| r.rightmost),
            inc_run,
            dec_run,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            size: self.size,
            sum: self.sum,
            leftmost: self.rightmost,
            rightmost: self.leftmost,
            inc_run: self.dec_run,
            dec_run: self.inc_run,
        }
    }

    /// Whether the whole sequence is non-increasing, i.e. the last
    /// permutation of its multiset.
    pub fn is_non_increasing(&self) -> bool {
        self.dec_run == self.size
    }
}
