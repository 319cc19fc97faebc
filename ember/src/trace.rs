// Copyright (C) 2025 Ethan Uppal. All rights reserved.

use std::fmt;

use crate::{
    arch::{Address, Word, REGISTER_COUNT},
    machine::Machine,
};

/// A read-only view of machine state for debugging: the program counter, the
/// three memory bytes starting at it (the opcode and up to two operands),
/// and every general-purpose register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: Address,
    pub window: [Word; 3],
    pub registers: [Word; REGISTER_COUNT],
}

impl Machine {
    /// Captures the state a debugger wants to see before the next
    /// instruction executes. Never mutates the machine; memory cells past
    /// the end of the address space render as zero.
    pub fn snapshot(&self) -> Snapshot {
        let mut window = [0; 3];
        for (offset, cell) in window.iter_mut().enumerate() {
            *cell = self.memory().read(self.pc() + offset).unwrap_or(0);
        }
        Snapshot {
            pc: self.pc(),
            window,
            registers: self.registers().contents(),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRACE: {:02X} |", self.pc)?;
        for byte in self.window {
            write!(f, " {byte:02X}")?;
        }
        write!(f, " |")?;
        for value in self.registers {
            write!(f, " {value:02X}")?;
        }
        Ok(())
    }
}
