/// Source of heap priorities for new treap nodes.
///
/// Priorities must not correlate with keys or insertion order, otherwise the
/// expected logarithmic height is lost. Equal priorities are allowed.
pub trait PrioritySource {
    fn next_priority(&mut self) -> u32;
}

pub const DEFAULT_SEED: u64 = 0x5EED_9E27;

#[derive(Clone, Copy, Debug)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl PrioritySource for XorShift64 {
    fn next_priority(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl<F: FnMut() -> u32> PrioritySource for F {
    fn next_priority(&mut self) -> u32 {
        self()
    }
}
