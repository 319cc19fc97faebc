// Copyright (C) 2025 Ethan Uppal and Utku Melemetci. All rights reserved.

use crate::{
    arch::{Register, Word, REGISTER_COUNT, SP, STACK_BASE},
    fault::FaultKind,
};

/// The eight general-purpose registers. `r7` doubles as the stack pointer
/// and starts at [`STACK_BASE`]; the rest start zeroed.
pub struct RegisterFile {
    regs: [Word; REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        let mut regs = [0; REGISTER_COUNT];
        regs[SP as usize] = STACK_BASE;
        Self { regs }
    }
}

impl RegisterFile {
    pub fn get(&self, index: Register) -> Result<Word, FaultKind> {
        self.regs
            .get(index as usize)
            .copied()
            .ok_or(FaultKind::RegisterOutOfRange(index))
    }

    pub fn set(
        &mut self,
        index: Register,
        value: Word,
    ) -> Result<(), FaultKind> {
        match self.regs.get_mut(index as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(FaultKind::RegisterOutOfRange(index)),
        }
    }

    /// Current stack pointer.
    pub fn sp(&self) -> Word {
        self.regs[SP as usize]
    }

    pub fn set_sp(&mut self, value: Word) {
        self.regs[SP as usize] = value;
    }

    /// All register values in index order.
    pub fn contents(&self) -> [Word; REGISTER_COUNT] {
        self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_except_the_stack_pointer() {
        let regs = RegisterFile::default();
        for index in 0..SP {
            assert_eq!(Ok(0), regs.get(index));
        }
        assert_eq!(Ok(STACK_BASE), regs.get(SP));
        assert_eq!(STACK_BASE, regs.sp());
    }

    #[test]
    fn sets_and_gets() {
        let mut regs = RegisterFile::default();
        regs.set(3, 42).expect("index is in range");
        assert_eq!(Ok(42), regs.get(3));
    }

    #[test]
    fn faults_on_out_of_range_indices() {
        let mut regs = RegisterFile::default();
        assert_eq!(
            Err(FaultKind::RegisterOutOfRange(REGISTER_COUNT as Register)),
            regs.get(REGISTER_COUNT as Register)
        );
        assert_eq!(Err(FaultKind::RegisterOutOfRange(0xff)), regs.set(0xff, 1));
    }
}
