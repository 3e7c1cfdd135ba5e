use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::constants::{
    A_OFFSET, B_OFFSET, C_OFFSET, IMMEDIATE_MASK, OPCODE_MASK, OPCODE_OFFSET, REG_FIELD_MASK,
    SPECIAL_A_MASK, SPECIAL_A_OFFSET,
};
use super::error::Error;
use super::Word;

/// The fourteen operators of the instruction set, keyed by the platter's
/// high nibble. A dense `FromPrimitive` table keyed directly on the opcode
/// value is the simplest and fastest way to turn that nibble into a
/// dispatchable enum.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
pub enum Operator {
    ConditionalMove,
    ArrayIndex,
    ArrayAmendment,
    Addition,
    Multiplication,
    Division,
    NotAnd,
    Halt,
    Allocation,
    Abandonment,
    Output,
    Input,
    LoadProgram,
    Orthography,
}

/// A decoded platter, in either of the instruction set's two encodings.
#[derive(Clone, Copy, Debug)]
pub enum Instruction {
    Standard {
        op: Operator,
        a: usize,
        b: usize,
        c: usize,
    },
    Immediate {
        a: usize,
        value: Word,
    },
}

/// Decodes a platter. Never mutates machine state; an operator code outside
/// 0..=13 is reported as [`Error::InvalidInstruction`].
pub fn decode(word: Word, finger: Word) -> Result<Instruction, Error> {
    let opcode = (word & OPCODE_MASK) >> OPCODE_OFFSET;
    let op = Operator::from_u32(opcode)
        .ok_or(Error::InvalidInstruction { finger, opcode })?;

    if op == Operator::Orthography {
        let a = ((word >> SPECIAL_A_OFFSET) & SPECIAL_A_MASK) as usize;
        let value = word & IMMEDIATE_MASK;
        Ok(Instruction::Immediate { a, value })
    } else {
        let a = ((word >> A_OFFSET) & REG_FIELD_MASK) as usize;
        let b = ((word >> B_OFFSET) & REG_FIELD_MASK) as usize;
        let c = ((word >> C_OFFSET) & REG_FIELD_MASK) as usize;
        Ok(Instruction::Standard { op, a, b, c })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_standard(opcode: u32, a: u32, b: u32, c: u32) -> Word {
        (opcode << OPCODE_OFFSET) | (a << A_OFFSET) | (b << B_OFFSET) | (c << C_OFFSET)
    }

    #[test]
    fn decode_symmetry_for_standard_operators() {
        for opcode in 0..=12u32 {
            let word = encode_standard(opcode, 5, 3, 1);
            match decode(word, 0).unwrap() {
                Instruction::Standard { a, b, c, .. } => {
                    assert_eq!((a, b, c), (5, 3, 1));
                }
                Instruction::Immediate { .. } => panic!("opcode {} decoded as immediate", opcode),
            }
        }
    }

    #[test]
    fn decode_orthography_immediate() {
        let word = (13 << OPCODE_OFFSET) | (4 << SPECIAL_A_OFFSET) | 0x1FF;
        match decode(word, 0).unwrap() {
            Instruction::Immediate { a, value } => {
                assert_eq!(a, 4);
                assert_eq!(value, 0x1FF);
            }
            Instruction::Standard { .. } => panic!("operator 13 decoded as standard"),
        }
    }

    #[test]
    fn unknown_opcode_is_invalid_instruction() {
        let word = 14u32 << OPCODE_OFFSET;
        let err = decode(word, 7).unwrap_err();
        match err {
            Error::InvalidInstruction { finger, opcode } => {
                assert_eq!(finger, 7);
                assert_eq!(opcode, 14);
            }
            _ => panic!("expected InvalidInstruction"),
        }
    }
}
