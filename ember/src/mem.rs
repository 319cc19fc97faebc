// Copyright (C) 2025 Ethan Uppal and Utku Melemetci. All rights reserved.

use crate::{
    arch::{Address, Word, MEMORY_SIZE},
    fault::FaultKind,
};

/// Flat byte-addressable storage. Every address in `0..MEMORY_SIZE` always
/// holds a value; cells start zeroed and are only ever overwritten.
pub struct Memory {
    cells: [Word; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }
}

impl Memory {
    pub fn read(&self, address: Address) -> Result<Word, FaultKind> {
        self.cells
            .get(address)
            .copied()
            .ok_or(FaultKind::AddressOutOfRange(address))
    }

    pub fn write(
        &mut self,
        address: Address,
        value: Word,
    ) -> Result<(), FaultKind> {
        match self.cells.get_mut(address) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(FaultKind::AddressOutOfRange(address)),
        }
    }

    /// Copies `image` into memory starting at address 0 and zeroes everything
    /// past it.
    pub fn load(&mut self, image: &[Word]) -> Result<(), FaultKind> {
        if image.len() > MEMORY_SIZE {
            return Err(FaultKind::AddressOutOfRange(image.len() - 1));
        }
        self.cells[..image.len()].copy_from_slice(image);
        self.cells[image.len()..].fill(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_writes() {
        let mut memory = Memory::default();
        assert_eq!(Ok(0), memory.read(0x10));
        memory.write(0x10, 0xab).expect("address is in range");
        assert_eq!(Ok(0xab), memory.read(0x10));
    }

    #[test]
    fn faults_past_the_last_cell() {
        let mut memory = Memory::default();
        assert_eq!(Ok(0), memory.read(MEMORY_SIZE - 1));
        assert_eq!(
            Err(FaultKind::AddressOutOfRange(MEMORY_SIZE)),
            memory.read(MEMORY_SIZE)
        );
        assert_eq!(
            Err(FaultKind::AddressOutOfRange(MEMORY_SIZE)),
            memory.write(MEMORY_SIZE, 1)
        );
    }

    #[test]
    fn load_zeroes_the_tail() {
        let mut memory = Memory::default();
        memory.write(200, 0xff).expect("address is in range");
        memory.load(&[1, 2, 3]).expect("image fits");
        assert_eq!(Ok(1), memory.read(0));
        assert_eq!(Ok(3), memory.read(2));
        assert_eq!(Ok(0), memory.read(200));
    }

    #[test]
    fn load_rejects_oversized_images() {
        let mut memory = Memory::default();
        let image = vec![0; MEMORY_SIZE + 1];
        assert_eq!(
            Err(FaultKind::AddressOutOfRange(MEMORY_SIZE)),
            memory.load(&image)
        );
    }
}
