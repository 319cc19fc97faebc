// Copyright (C) 2025 Ethan Uppal and Utku Melemetci. All rights reserved.

use crate::{arch::Word, fault::FaultKind, mem::Memory, op::Op};

/// Encodes `ops` into the byte image the loader would otherwise produce from
/// source text.
pub fn encode_program(ops: &[Op]) -> Vec<Word> {
    let mut image = Vec::new();
    for op in ops {
        op.encode_into(&mut image);
    }
    image
}

/// Decodes a byte image back into instructions. Operand bytes past the end
/// of the image read as zero, matching what the machine itself would fetch
/// from zeroed memory.
pub fn decode_program(image: &[Word]) -> Result<Vec<Op>, FaultKind> {
    let mut memory = Memory::default();
    memory.load(image)?;

    let mut ops = Vec::new();
    let mut at = 0;
    while at < image.len() {
        let op = Op::fetch(&memory, at)?;
        at += op.size();
        ops.push(op);
    }
    Ok(ops)
}
