use crate::constants::{PROGRAM_START, REGISTER_COUNT};

/// Index of VF, the flag register.
pub const VF: usize = 0xF;

/// # Registers
/// - (v) 16 8-bit registers V0..VF
///     - V0..VE are general purpose
///     - VF doubles as the carry/borrow/collision flag and is overwritten as a side effect
/// - (i) a 16-bit index register, used as a memory pointer
/// - (pc) the 16-bit program counter
///
/// All 8-bit arithmetic wraps modulo 256.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
        }
    }

    pub fn get(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn set(&mut self, x: usize, value: u8) {
        self.v[x] = value;
    }

    /// Vx += Vy; VF = carry
    pub fn add_carry(&mut self, x: usize, y: usize) {
        let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
        self.v[x] = sum;
        self.v[VF] = carry as u8;
    }

    /// Vx -= Vy; VF = Vx >= Vy
    pub fn sub(&mut self, x: usize, y: usize) {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[x] = vx.wrapping_sub(vy);
        self.v[VF] = (vx >= vy) as u8;
    }

    /// Vx = Vy - Vx; VF = Vy >= Vx
    ///
    /// The flag compares against Vx as it was before the subtraction.
    pub fn subn(&mut self, x: usize, y: usize) {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[x] = vy.wrapping_sub(vx);
        self.v[VF] = (vy >= vx) as u8;
    }

    /// Vx >>= 1; VF = old LSB
    pub fn shr(&mut self, x: usize) {
        let vx = self.v[x];
        self.v[x] = vx >> 1;
        self.v[VF] = vx & 0x1;
    }

    /// Vx <<= 1; VF = old MSB
    pub fn shl(&mut self, x: usize) {
        let vx = self.v[x];
        self.v[x] = vx << 1;
        self.v[VF] = vx >> 7;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
