/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word. Decoding cases on:
/// - `(n, _, _, _)` the instruction group; every opcode has one
/// - `(_, _, _, n)` the variant within groups 5, 8 and 9
/// - `(_, _, n, n)` the variant within groups 0, E and F
///
/// The remaining nibbles are operands:
/// - `[_nnn]` a 12-bit address
/// - `[__nn]` an 8-bit literal
/// - `[___n]` a 4-bit literal (sprite height)
/// - `[_x__]` register Vx, or the last register of the range V0..=Vx
/// - `[__y_]` register Vy
pub trait Opcode {
    /// The opcode split into its four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__nn]`
    fn nn(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            (self >> 12) as u8,
            ((self >> 8) & 0xF) as u8,
            ((self >> 4) & 0xF) as u8,
            self.n(),
        )
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
