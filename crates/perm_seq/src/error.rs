use std::fmt;

/// Error returned when a rank or range falls outside the current sequence.
///
/// Every operation validates its bounds before touching the tree, so an
/// `Err` always leaves the sequence unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// A single 1-indexed position outside `1..=bound`.
    Position { position: usize, bound: usize },
    /// A 1-indexed inclusive range that is empty, reversed or out of `1..=len`.
    Range { left: usize, right: usize, len: usize },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Position { position, bound } => {
                write!(f, "position {position} is outside 1..={bound}")
            }
            RangeError::Range { left, right, len } => {
                write!(f, "range [{left}, {right}] is invalid for length {len}")
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Error returned while decoding a flat integer command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnknownOpcode(i64),
    /// A position or count operand that is negative.
    InvalidOperand(i64),
    /// The stream ended before the announced number of items.
    Truncated,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownOpcode(op) => write!(f, "unknown opcode {op}"),
            DecodeError::InvalidOperand(value) => write!(f, "invalid operand {value}"),
            DecodeError::Truncated => write!(f, "command stream ended early"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Validates a 1-indexed inclusive range and converts it to a half-open
/// 0-indexed `(start, end)`.
pub(crate) fn check_range(
    left: usize,
    right: usize,
    len: usize,
) -> Result<(usize, usize), RangeError> {
    if left == 0 || left > right || right > len {
        return Err(RangeError::Range { left, right, len });
    }
    Ok((left - 1, right))
}

/// Validates a 1-indexed position against `1..=bound` and converts it to a
/// 0-indexed rank.
pub(crate) fn check_position(position: usize, bound: usize) -> Result<usize, RangeError> {
    if position == 0 || position > bound {
        return Err(RangeError::Position { position, bound });
    }
    Ok(position - 1)
}
