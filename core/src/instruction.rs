use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

pub type Operation = fn(op: &dyn Opcode, state: &mut State) -> Outcome;

/// A decoded instruction: its assembler mnemonic and the operation that runs it.
#[derive(Clone, Copy)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub execute: Operation,
}

impl Instruction {
    fn new(mnemonic: &'static str, execute: Operation) -> Self {
        Instruction { mnemonic, execute }
    }
}

/// Selects the Instruction for a given Opcode, or None if it isn't one.
pub fn from_op(op: &dyn Opcode) -> Option<Instruction> {
    let instruction = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => Instruction::new("CLS", clr),
        (0x0, 0x0, 0xE, 0xE) => Instruction::new("RET", rts),
        (0x1, ..) => Instruction::new("JP", jump),
        (0x2, ..) => Instruction::new("CALL", call),
        (0x3, ..) => Instruction::new("SE", ske),
        (0x4, ..) => Instruction::new("SNE", skne),
        (0x5, .., 0x0) => Instruction::new("SE", skre),
        (0x6, ..) => Instruction::new("LD", load),
        (0x7, ..) => Instruction::new("ADD", add),
        (0x8, .., 0x0) => Instruction::new("LD", mv),
        (0x8, .., 0x1) => Instruction::new("OR", or),
        (0x8, .., 0x2) => Instruction::new("AND", and),
        (0x8, .., 0x3) => Instruction::new("XOR", xor),
        (0x8, .., 0x4) => Instruction::new("ADD", addr),
        (0x8, .., 0x5) => Instruction::new("SUB", sub),
        (0x8, .., 0x6) => Instruction::new("SHR", shr),
        (0x8, .., 0x7) => Instruction::new("SUBN", subn),
        (0x8, .., 0xE) => Instruction::new("SHL", shl),
        (0x9, .., 0x0) => Instruction::new("SNE", skrne),
        (0xA, ..) => Instruction::new("LD I", loadi),
        (0xB, ..) => Instruction::new("JP V0", jumpi),
        (0xC, ..) => Instruction::new("RND", rand),
        (0xD, ..) => Instruction::new("DRW", draw),
        (0xE, _, 0x9, 0xE) => Instruction::new("SKP", skpr),
        (0xE, _, 0xA, 0x1) => Instruction::new("SKNP", skup),
        (0xF, _, 0x0, 0x7) => Instruction::new("LD Vx, DT", moved),
        (0xF, _, 0x0, 0xA) => Instruction::new("LD K", keyd),
        (0xF, _, 0x1, 0x5) => Instruction::new("LD DT, Vx", loads),
        (0xF, _, 0x1, 0x8) => Instruction::new("LD ST", ld),
        (0xF, _, 0x1, 0xE) => Instruction::new("ADD I", addi),
        (0xF, _, 0x2, 0x9) => Instruction::new("LD F", ldspr),
        (0xF, _, 0x3, 0x3) => Instruction::new("LD B", bcd),
        (0xF, _, 0x5, 0x5) => Instruction::new("LD [I]", stor),
        (0xF, _, 0x6, 0x5) => Instruction::new("LD V [I]", read),
        _ => return None,
    };
    Some(instruction)
}
