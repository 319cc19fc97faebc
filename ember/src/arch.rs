// Copyright (C) 2025 Ethan Uppal and Utku Melemetci. All rights reserved.

use static_assertions::const_assert;

/// Machine word. Every memory cell and every register holds one of these.
pub type Word = u8;

/// Raw opcode byte as fetched from memory.
pub type RawOpcode = u8;

/// Register index operand as encoded in an instruction.
pub type Register = u8;

/// Address into machine memory. Wider than [`Word`] so that walking off the
/// end of the address space is observable instead of wrapping.
pub type Address = usize;

/// Cells in machine memory.
pub const MEMORY_SIZE: usize = 256;
const_assert!(MEMORY_SIZE <= 1usize << Word::BITS);

/// General-purpose registers, `r0` through `r7`.
pub const REGISTER_COUNT: usize = 8;
const_assert!(REGISTER_COUNT <= MEMORY_SIZE);

/// The register reserved for the stack pointer.
pub const SP: Register = 7;
const_assert!((SP as usize) < REGISTER_COUNT);

/// Stack pointer value at power-on. The stack grows downward from here.
pub const STACK_BASE: Word = 244;
const_assert!((STACK_BASE as usize) < MEMORY_SIZE);

/// Outcome of the most recent CMP, consumed by the conditional jumps.
///
/// The power-on default is [`Flag::Equal`]: the register file starts all
/// zeroes, and that is the state a CMP of two untouched registers would
/// produce, so conditional jumps are well-defined before any comparison has
/// run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flag {
    #[default]
    Equal,
    Greater,
    Less,
}
