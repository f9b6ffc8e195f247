#![allow(dead_code)]

use std::ops::RangeInclusive;

use perm_seq::Command;
use rand::Rng;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Clone)]
pub struct StreamShape {
    pub len: RangeInclusive<usize>,
    pub values: RangeInclusive<i64>,
    pub commands: usize,
    pub with_reverse: bool,
}

/// Random initial sequence plus a command stream that only ever refers to
/// valid positions of the sequence it is applied to.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, shape: &StreamShape) -> (Vec<i64>, Vec<Command>) {
    let mut len = rng.random_range(shape.len.clone());
    let initial = (0..len)
        .map(|_| rng.random_range(shape.values.clone()))
        .collect::<Vec<_>>();

    let opcodes = if shape.with_reverse { 5 } else { 4 };
    let mut commands = Vec::with_capacity(shape.commands);
    while commands.len() < shape.commands {
        let opcode = rng.random_range(1..=opcodes);
        if len == 0 && opcode != Command::INSERT {
            continue;
        }
        let command = match opcode {
            Command::SET => Command::Set {
                position: rng.random_range(1..=len),
                value: rng.random_range(shape.values.clone()),
            },
            Command::INSERT => {
                len += 1;
                Command::Insert {
                    position: rng.random_range(1..=len),
                    value: rng.random_range(shape.values.clone()),
                }
            }
            _ => {
                let left = rng.random_range(1..=len);
                let right = rng.random_range(left..=len);
                match opcode {
                    Command::SUM => Command::Sum { left, right },
                    Command::NEXT_PERMUTATION => Command::NextPermutation { left, right },
                    _ => Command::Reverse { left, right },
                }
            }
        };
        commands.push(command);
    }
    (initial, commands)
}
