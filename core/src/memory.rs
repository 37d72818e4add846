use crate::constants::{ADDRESS_MASK, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::LoadError;

/// # Address Space
///
/// 4096 bytes laid out as:
/// ```text
/// 0x000..0x050  font glyphs 0..F
/// 0x050..0x200  unused (reserved for the interpreter on real hardware)
/// 0x200..0x1000 program image and program data
/// ```
///
/// Addresses handed to the accessors must already be below 4096; callers
/// deriving addresses from `I` or the program counter mask them first.
#[derive(Clone)]
pub struct AddressSpace {
    bytes: [u8; MEMORY_SIZE],
}

impl AddressSpace {
    /// Zeroed memory with the sprite sheet preloaded.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        AddressSpace { bytes }
    }

    /// Copies a program image to `PROGRAM_START`.
    ///
    /// Memory past the end of the image keeps whatever it held before.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::too_large(program.len()));
        }
        let start = usize::from(PROGRAM_START);
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr)]
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr)] = value;
    }

    /// Reads the big-endian word at `addr` and `addr + 1`.
    /// The low byte of a word at 0xFFF comes from 0x000.
    pub fn read_word(&self, addr: u16) -> u16 {
        let high = self.read_byte(addr);
        let low = self.read_byte((addr + 1) & ADDRESS_MASK);
        u16::from(high) << 8 | u16::from(low)
    }

    /// Read-only view of all of memory.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_preloaded() {
        let memory = AddressSpace::new();
        assert_eq!(memory.as_slice()[..80], SPRITE_SHEET[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loads_program_at_0x200() {
        let mut memory = AddressSpace::new();
        memory.load_program(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(memory.as_slice()[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(memory.read_byte(0x204), 0x0);
    }

    #[test]
    fn test_load_keeps_trailing_memory() {
        let mut memory = AddressSpace::new();
        memory.write_byte(0x203, 0x77);
        memory.load_program(&[0x1, 0x2]).unwrap();
        assert_eq!(memory.read_byte(0x203), 0x77);
    }

    #[test]
    fn test_loads_largest_program() {
        let mut memory = AddressSpace::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        memory.load_program(&program).unwrap();
        assert_eq!(memory.read_byte(0xFFF), 0xAB);
    }

    #[test]
    fn test_rejects_oversized_program() {
        let mut memory = AddressSpace::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE + 1];
        match memory.load_program(&program) {
            Err(LoadError::ProgramTooLarge { size, max }) => {
                assert_eq!(size, 3585);
                assert_eq!(max, 3584);
            }
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
        assert_eq!(memory.read_byte(0x200), 0x0);
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut memory = AddressSpace::new();
        memory.write_byte(0x300, 0xAA);
        memory.write_byte(0x301, 0xBB);
        assert_eq!(memory.read_word(0x300), 0xAABB);
    }

    #[test]
    fn test_read_word_wraps_at_end_of_memory() {
        let mut memory = AddressSpace::new();
        memory.write_byte(0xFFF, 0x12);
        assert_eq!(memory.read_word(0xFFF), 0x12F0);
    }
}
