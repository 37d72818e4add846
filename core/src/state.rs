use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::ADDRESS_MASK;
use crate::frame_buffer::Framebuffer;
use crate::keypad::Keypad;
use crate::memory::AddressSpace;
use crate::registers::RegisterFile;
use crate::stack::CallStack;
use crate::timers::TimerPair;

/// # CPU State
/// Everything one interpreter instance owns.
///
/// ## CPU
/// - `registers`: V0..VF, I and the program counter
/// - `stack`: 16 return addresses and the stack pointer
/// - `timers`: delay and sound, decremented at 60Hz by the host
///
/// ## Memory
/// - `memory`: 4096 bytes with the font at 0x000 and the program at 0x200
/// - `frame_buffer`: 64x32 cells, plus `draw_flag` marking unseen changes
///
/// ## Input
/// - `keypad`: pressed state of keys 0..F, written by the host
///
/// `rng` feeds `Cxnn`; owning it keeps separate instances independent and
/// lets tests seed it.
pub struct State {
    pub memory: AddressSpace,
    pub registers: RegisterFile,
    pub stack: CallStack,
    pub timers: TimerPair,
    pub keypad: Keypad,
    pub frame_buffer: Framebuffer,
    pub draw_flag: bool,
    pub rng: StdRng,
}

impl State {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A state whose random stream is fixed by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        State {
            memory: AddressSpace::new(),
            registers: RegisterFile::new(),
            stack: CallStack::new(),
            timers: TimerPair::new(),
            keypad: Keypad::new(),
            frame_buffer: Framebuffer::new(),
            draw_flag: false,
            rng,
        }
    }

    /// The byte `offset` past I, wrapping within memory.
    pub fn read_at_i(&self, offset: u16) -> u8 {
        self.memory.read_byte(self.i_addr(offset))
    }

    pub fn write_at_i(&mut self, offset: u16, value: u8) {
        let addr = self.i_addr(offset);
        self.memory.write_byte(addr, value);
    }

    fn i_addr(&self, offset: u16) -> u16 {
        self.registers.i.wrapping_add(offset) & ADDRESS_MASK
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
