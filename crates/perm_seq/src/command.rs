use crate::error::{DecodeError, RangeError};
use crate::traits::PermutationSequence;

/// One operation of a command stream. Positions are 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Sum { left: usize, right: usize },
    Set { position: usize, value: i64 },
    Insert { position: usize, value: i64 },
    NextPermutation { left: usize, right: usize },
    Reverse { left: usize, right: usize },
}

impl Command {
    pub const SUM: i64 = 1;
    pub const SET: i64 = 2;
    pub const INSERT: i64 = 3;
    pub const NEXT_PERMUTATION: i64 = 4;
    pub const REVERSE: i64 = 5;

    /// Decodes an `(opcode, x, y)` triple. Ranges are `(left, right)`, while
    /// `Set` and `Insert` carry `(value, position)`.
    pub fn from_triple(opcode: i64, x: i64, y: i64) -> Result<Self, DecodeError> {
        let command = match opcode {
            Self::SUM => Command::Sum {
                left: operand(x)?,
                right: operand(y)?,
            },
            Self::SET => Command::Set {
                position: operand(y)?,
                value: x,
            },
            Self::INSERT => Command::Insert {
                position: operand(y)?,
                value: x,
            },
            Self::NEXT_PERMUTATION => Command::NextPermutation {
                left: operand(x)?,
                right: operand(y)?,
            },
            Self::REVERSE => Command::Reverse {
                left: operand(x)?,
                right: operand(y)?,
            },
            _ => return Err(DecodeError::UnknownOpcode(opcode)),
        };
        Ok(command)
    }

    pub fn to_triple(&self) -> [i64; 3] {
        match *self {
            Command::Sum { left, right } => [Self::SUM, left as i64, right as i64],
            Command::Set { position, value } => [Self::SET, value, position as i64],
            Command::Insert { position, value } => [Self::INSERT, value, position as i64],
            Command::NextPermutation { left, right } => {
                [Self::NEXT_PERMUTATION, left as i64, right as i64]
            }
            Command::Reverse { left, right } => [Self::REVERSE, left as i64, right as i64],
        }
    }

    /// Applies the command, returning the answer of a `Sum`.
    pub fn apply<S: PermutationSequence + ?Sized>(
        &self,
        seq: &mut S,
    ) -> Result<Option<i128>, RangeError> {
        match *self {
            Command::Sum { left, right } => return seq.sum(left, right).map(Some),
            Command::Set { position, value } => seq.set(position, value)?,
            Command::Insert { position, value } => seq.insert(position, value)?,
            Command::NextPermutation { left, right } => {
                seq.next_permutation(left, right)?;
            }
            Command::Reverse { left, right } => seq.reverse(left, right)?,
        }
        Ok(None)
    }
}

fn operand(value: i64) -> Result<usize, DecodeError> {
    usize::try_from(value).map_err(|_| DecodeError::InvalidOperand(value))
}

/// Loads `initial` into `seq`, runs `commands` in order and collects the
/// answers of every `Sum`. Stops at the first out-of-range command.
pub fn run<S: PermutationSequence + ?Sized>(
    seq: &mut S,
    initial: &[i64],
    commands: &[Command],
) -> Result<Vec<i128>, RangeError> {
    seq.assign(initial);
    let mut output = Vec::new();
    for (step, command) in commands.iter().enumerate() {
        tracing::trace!(step, ?command, "applying");
        if let Some(answer) = command.apply(seq)? {
            output.push(answer);
        }
    }
    Ok(output)
}

/// Decodes a flat stream `n, a_1 .. a_n, m, (op, x, y) * m`.
pub fn decode_stream(stream: &[i64]) -> Result<(Vec<i64>, Vec<Command>), DecodeError> {
    let mut it = stream.iter().copied();
    let mut next = || it.next().ok_or(DecodeError::Truncated);

    let n = operand(next()?)?;
    let initial = (0..n).map(|_| next()).collect::<Result<Vec<_>, _>>()?;
    let m = operand(next()?)?;
    let mut commands = Vec::with_capacity(m);
    for _ in 0..m {
        let (op, x, y) = (next()?, next()?, next()?);
        commands.push(Command::from_triple(op, x, y)?);
    }
    Ok((initial, commands))
}

/// Inverse of [`decode_stream`].
pub fn encode_stream(initial: &[i64], commands: &[Command]) -> Vec<i64> {
    let mut stream = Vec::with_capacity(2 + initial.len() + 3 * commands.len());
    stream.push(initial.len() as i64);
    stream.extend_from_slice(initial);
    stream.push(commands.len() as i64);
    for command in commands {
        stream.extend_from_slice(&command.to_triple());
    }
    stream
}
