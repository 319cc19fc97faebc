// Copyright (C) 2025 Ethan Uppal. All rights reserved.

use thiserror::Error;

use crate::arch::{Address, RawOpcode, Register};

/// The ways a guest program can stop the machine. Every one is fatal; there
/// is no recovery path, and a well-formed program never triggers any of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FaultKind {
    #[error("address {0:#06x} out of range")]
    AddressOutOfRange(Address),
    #[error("register r{0} out of range")]
    RegisterOutOfRange(Register),
    #[error("illegal instruction {0:#010b}")]
    IllegalInstruction(RawOpcode),
    #[error("unsupported ALU operation {0:#010b}")]
    UnsupportedAluOperation(RawOpcode),
    #[error("division by zero")]
    DivisionByZero,
}

/// A fault together with the program counter of the faulting instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} at pc {pc:#04x}")]
pub struct Fault {
    pub kind: FaultKind,
    pub pc: Address,
}

pub type MachineResult = Result<(), Fault>;
