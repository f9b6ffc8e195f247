//! Dynamic integer sequence backed by an implicit treap, supporting range
//! sums, point updates, insertion, range reversal and in-place range
//! next-permutation in expected logarithmic time.

mod error;
mod priority;
mod summary;
mod traits;

pub mod command;
pub mod impls;

pub use command::Command;
pub use error::{DecodeError, RangeError};
pub use impls::{naive::NaiveSequence, treap::ImplicitTreap};
pub use priority::{DEFAULT_SEED, PrioritySource, XorShift64};
pub use summary::Summary;
pub use traits::PermutationSequence;
