// Copyright (C) 2025 Ethan Uppal and Utku Melemetci. All rights reserved.

use tracing::{debug, trace};

use crate::{
    alu::{self, AluOp, AluOutput},
    arch::{Address, Flag, Register, Word},
    fault::{Fault, FaultKind, MachineResult},
    mem::Memory,
    op::Op,
    regfile::RegisterFile,
};

/// Sink for PRN output. The machine emits one value per PRN in execution
/// order; how values are rendered is up to the sink.
pub trait Output {
    fn emit(&mut self, value: Word);
}

/// Collects emitted values. The sink most tests use.
impl Output for Vec<Word> {
    fn emit(&mut self, value: Word) {
        self.push(value);
    }
}

/// Whether the machine is still executing instructions. `Halted` is entered
/// only by HLT; faults surface through [`MachineResult`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

/// An 8-bit stack-and-register machine: 256 bytes of memory, eight
/// general-purpose registers of which `r7` is the stack pointer, a program
/// counter, and a comparison flag.
///
/// All state lives in this one aggregate; separate machines are fully
/// independent.
pub struct Machine {
    memory: Memory,
    registers: RegisterFile,
    pc: Address,
    flag: Flag,
    status: Status,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            memory: Memory::default(),
            registers: RegisterFile::default(),
            pc: 0,
            flag: Flag::default(),
            status: Status::Running,
        }
    }

    /// Copies `image` into memory starting at address 0.
    pub fn load(&mut self, image: &[Word]) -> MachineResult {
        self.memory.load(image).map_err(|kind| self.fault(kind))?;
        debug!(bytes = image.len(), "program loaded");
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn register(&self, index: Register) -> Result<Word, Fault> {
        self.registers.get(index).map_err(|kind| self.fault(kind))
    }

    pub(crate) fn memory(&self) -> &Memory {
        &self.memory
    }

    pub(crate) fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Runs instructions until HLT executes or a fault stops the machine. A
    /// guest program that never halts keeps this loop alive indefinitely.
    pub fn run<O: Output>(&mut self, out: &mut O) -> MachineResult {
        while self.status == Status::Running {
            self.step(out)?;
        }
        Ok(())
    }

    /// Executes a single instruction: fetch at the program counter, decode,
    /// execute, advance.
    pub fn step<O: Output>(&mut self, out: &mut O) -> MachineResult {
        let op =
            Op::fetch(&self.memory, self.pc).map_err(|kind| self.fault(kind))?;
        trace!(pc = self.pc, ?op, "executing");
        self.execute(op, out).map_err(|kind| self.fault(kind))
    }

    fn fault(&self, kind: FaultKind) -> Fault {
        Fault { kind, pc: self.pc }
    }

    fn execute<O: Output>(
        &mut self,
        op: Op,
        out: &mut O,
    ) -> Result<(), FaultKind> {
        match op {
            Op::Hlt => self.status = Status::Halted,
            Op::Ldi(r, value) => self.registers.set(r, value)?,
            Op::Prn(r) => out.emit(self.registers.get(r)?),
            Op::Push(r) => {
                let value = self.registers.get(r)?;
                self.push(value)?;
            }
            Op::Pop(r) => {
                let value = self.pop()?;
                self.registers.set(r, value)?;
            }
            Op::Call(r) => {
                let target = self.registers.get(r)?;
                self.push((self.pc + op.size()) as Word)?;
                self.pc = target as Address;
                return Ok(());
            }
            Op::Ret => {
                let target = self.pop()?;
                self.pc = target as Address;
                return Ok(());
            }
            Op::Jeq(r) => {
                if self.flag == Flag::Equal {
                    self.pc = self.registers.get(r)? as Address;
                    return Ok(());
                }
            }
            Op::Jne(r) => {
                if self.flag != Flag::Equal {
                    self.pc = self.registers.get(r)? as Address;
                    return Ok(());
                }
            }
            Op::Add(a, b) => self.binary(AluOp::Add, a, b)?,
            Op::Sub(a, b) => self.binary(AluOp::Sub, a, b)?,
            Op::Mul(a, b) => self.binary(AluOp::Mul, a, b)?,
            Op::Div(a, b) => self.binary(AluOp::Div, a, b)?,
            Op::Mod(a, b) => self.binary(AluOp::Mod, a, b)?,
            Op::Cmp(a, b) => self.binary(AluOp::Cmp, a, b)?,
            Op::And(a, b) => self.binary(AluOp::And, a, b)?,
            Op::Or(a, b) => self.binary(AluOp::Or, a, b)?,
            Op::Xor(a, b) => self.binary(AluOp::Xor, a, b)?,
            Op::Not(r) => self.unary(AluOp::Not, r)?,
            Op::Shl(a, b) => self.binary(AluOp::Shl, a, b)?,
            Op::Shr(a, b) => self.binary(AluOp::Shr, a, b)?,
        }

        // everything that did not assign the program counter above advances
        // by its own encoded size, untaken conditional jumps included
        self.pc += op.size();
        Ok(())
    }

    fn push(&mut self, value: Word) -> Result<(), FaultKind> {
        let sp = self.registers.sp().wrapping_sub(1);
        self.registers.set_sp(sp);
        self.memory.write(sp as Address, value)
    }

    fn pop(&mut self) -> Result<Word, FaultKind> {
        let sp = self.registers.sp();
        let value = self.memory.read(sp as Address)?;
        self.registers.set_sp(sp.wrapping_add(1));
        Ok(value)
    }

    /// Runs a two-operand ALU operation, writing a value result back into
    /// the first operand's register and a flag result into the flag
    /// register.
    fn binary(
        &mut self,
        alu_op: AluOp,
        a: Register,
        b: Register,
    ) -> Result<(), FaultKind> {
        let lhs = self.registers.get(a)?;
        let rhs = self.registers.get(b)?;
        match alu::apply(alu_op, lhs, rhs)? {
            AluOutput::Value(value) => self.registers.set(a, value)?,
            AluOutput::Flag(flag) => self.flag = flag,
        }
        Ok(())
    }

    fn unary(&mut self, alu_op: AluOp, a: Register) -> Result<(), FaultKind> {
        let lhs = self.registers.get(a)?;
        match alu::apply(alu_op, lhs, 0)? {
            AluOutput::Value(value) => self.registers.set(a, value)?,
            AluOutput::Flag(flag) => self.flag = flag,
        }
        Ok(())
    }
}
