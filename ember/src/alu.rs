// Copyright (C) 2025 Ethan Uppal and Utku Melemetci. All rights reserved.

use std::cmp::Ordering;

use crate::{
    arch::{Flag, Word},
    fault::FaultKind,
};

/// Operations the arithmetic/logic unit performs. Unary operations ignore
/// their second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
    Cmp,
}

/// What one ALU operation produces: a word for the destination register, or
/// a new comparison flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOutput {
    Value(Word),
    Flag(Flag),
}

/// Applies `op` to the operand words. Pure and stateless.
///
/// Arithmetic wraps modulo 256. Division truncates (for unsigned words
/// truncation and floor coincide) and a zero divisor is a fault. Shift
/// counts of 8 or more produce 0.
pub fn apply(op: AluOp, a: Word, b: Word) -> Result<AluOutput, FaultKind> {
    Ok(match op {
        AluOp::Add => AluOutput::Value(a.wrapping_add(b)),
        AluOp::Sub => AluOutput::Value(a.wrapping_sub(b)),
        AluOp::Mul => AluOutput::Value(a.wrapping_mul(b)),
        AluOp::Div => {
            if b == 0 {
                return Err(FaultKind::DivisionByZero);
            }
            AluOutput::Value(a / b)
        }
        AluOp::Mod => {
            if b == 0 {
                return Err(FaultKind::DivisionByZero);
            }
            AluOutput::Value(a % b)
        }
        AluOp::And => AluOutput::Value(a & b),
        AluOp::Or => AluOutput::Value(a | b),
        AluOp::Xor => AluOutput::Value(a ^ b),
        AluOp::Not => AluOutput::Value(!a),
        AluOp::Shl => AluOutput::Value(if (b as u32) < Word::BITS {
            a << b
        } else {
            0
        }),
        AluOp::Shr => AluOutput::Value(if (b as u32) < Word::BITS {
            a >> b
        } else {
            0
        }),
        AluOp::Cmp => AluOutput::Flag(match a.cmp(&b) {
            Ordering::Equal => Flag::Equal,
            Ordering::Greater => Flag::Greater,
            Ordering::Less => Flag::Less,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(op: AluOp, a: Word, b: Word) -> Word {
        match apply(op, a, b).expect("operation should not fault") {
            AluOutput::Value(value) => value,
            AluOutput::Flag(flag) => panic!("expected a value, got {flag:?}"),
        }
    }

    fn flag(a: Word, b: Word) -> Flag {
        match apply(AluOp::Cmp, a, b).expect("CMP never faults") {
            AluOutput::Flag(flag) => flag,
            AluOutput::Value(value) => panic!("expected a flag, got {value}"),
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(42, value(AluOp::Add, 40, 2));
        assert_eq!(42, value(AluOp::Sub, 50, 8));
        assert_eq!(42, value(AluOp::Mul, 6, 7));
        assert_eq!(3, value(AluOp::Div, 7, 2));
        assert_eq!(2, value(AluOp::Mod, 47, 5));
    }

    #[test]
    fn arithmetic_wraps_modulo_256() {
        assert_eq!(44, value(AluOp::Add, 200, 100));
        assert_eq!(255, value(AluOp::Sub, 0, 1));
        assert_eq!(0, value(AluOp::Mul, 16, 32));
    }

    #[test]
    fn division_by_zero_faults() {
        assert_eq!(Err(FaultKind::DivisionByZero), apply(AluOp::Div, 1, 0));
        assert_eq!(Err(FaultKind::DivisionByZero), apply(AluOp::Mod, 1, 0));
    }

    #[test]
    fn bitwise() {
        assert_eq!(0b1000, value(AluOp::And, 0b1100, 0b1010));
        assert_eq!(0b1110, value(AluOp::Or, 0b1100, 0b1010));
        assert_eq!(0b0110, value(AluOp::Xor, 0b1100, 0b1010));
        assert_eq!(0b0101_0101, value(AluOp::Not, 0b1010_1010, 0));
    }

    #[test]
    fn shifts() {
        assert_eq!(0b10000, value(AluOp::Shl, 0b1, 4));
        assert_eq!(0b100, value(AluOp::Shr, 0b10000, 2));
        // bits shifted past the word width are dropped
        assert_eq!(0b1000_0000, value(AluOp::Shl, 0b1100_0000, 1));
    }

    #[test]
    fn oversized_shift_counts_produce_zero() {
        assert_eq!(0, value(AluOp::Shl, 0xff, 8));
        assert_eq!(0, value(AluOp::Shr, 0xff, 200));
    }

    #[test]
    fn compare_covers_all_three_flags() {
        assert_eq!(Flag::Equal, flag(5, 5));
        assert_eq!(Flag::Greater, flag(6, 5));
        assert_eq!(Flag::Less, flag(5, 6));
    }
}
