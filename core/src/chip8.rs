use std::io::Read;

use crate::constants::{ADDRESS_MASK, MAX_PROGRAM_SIZE};
use crate::error::{Fault, LoadError};
use crate::frame_buffer::Framebuffer;
use crate::instruction;
use crate::state::State;
use crate::timers::SoundGate;

/// What a single `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trace {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: u16,
    /// None if the opcode didn't decode.
    pub mnemonic: Option<&'static str>,
    pub fault: Option<Fault>,
}

/// Called with the `Trace` of every step.
///
/// Must be `Send` for a `Chip8` to move between threads.
pub type Observer = Box<dyn FnMut(&Trace) + Send>;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns one complete machine `state`; separate instances share nothing.
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - stepping the CPU one instruction at a time
/// - ticking its timers, independently of the CPU
/// - inspecting its frame buffer and sound timer for some display and speaker
pub struct Chip8 {
    state: State,
    observer: Option<Observer>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::from_state(State::new())
    }

    /// An interpreter whose `Cxnn` random stream is fixed by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(State::with_seed(seed))
    }

    fn from_state(state: State) -> Self {
        Chip8 {
            state,
            observer: None,
        }
    }

    /// Copies a program image into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_program(program)?;
        log::info!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a program from some source
    ///
    /// # Arguments
    /// * `reader` a reader positioned at the start of the program image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut program = Vec::new();
        // one byte more than fits is enough to tell that it doesn't
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Fetches, decodes and executes one instruction.
    ///
    /// Faults don't stop the machine: the instruction that caused one acts as
    /// a no-op and the fault is reported in the returned `Trace`.
    pub fn step(&mut self) -> Trace {
        let pc = self.state.registers.pc & ADDRESS_MASK;
        let opcode = self.state.memory.read_word(pc);
        self.state.registers.pc = pc + 0x2;

        let (mnemonic, fault) = match instruction::from_op(&opcode) {
            Some(instruction) => (
                Some(instruction.mnemonic),
                (instruction.execute)(&opcode, &mut self.state).err(),
            ),
            None => (None, Some(Fault::UnknownOpcode(opcode))),
        };

        let trace = Trace {
            pc,
            opcode,
            mnemonic,
            fault,
        };
        log::trace!(
            "{:04X} {:04X} {:<8} v{:02X?} i{:04X}",
            pc,
            opcode,
            mnemonic.unwrap_or("???"),
            self.state.registers.v,
            self.state.registers.i
        );
        if let Some(fault) = fault {
            log::warn!("{} at {:04X}", fault, pc);
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&trace);
        }
        trace
    }

    /// Runs `cycles` steps then ticks the timers once: one host frame.
    pub fn run_frame(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.step();
        }
        self.tick_timers();
    }

    /// Decrements the delay and sound timers; call once per 60Hz tick.
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the key 0x0..=0xF
    /// * `pressed` whether it is now held down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.state.keypad.set_key(key, pressed);
    }

    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    pub fn sound_enabled(&self) -> bool {
        self.state.timers.sound_enabled()
    }

    /// A thread-safe handle on the sound timer for an audio callback.
    pub fn sound_gate(&self) -> SoundGate {
        self.state.timers.sound_gate()
    }

    pub fn frame_buffer(&self) -> &Framebuffer {
        &self.state.frame_buffer
    }

    /// Returns the Framebuffer if it changed since it was last taken.
    pub fn take_frame(&mut self) -> Option<&Framebuffer> {
        if std::mem::replace(&mut self.state.draw_flag, false) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Read-only view of the whole machine.
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STACK_DEPTH;
    use crate::registers::VF;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn chip8(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_step_fetches_and_advances() {
        let mut chip8 = chip8(&[0x61, 0x2A, 0x00, 0xE0]);
        let trace = chip8.step();
        assert_eq!(trace.pc, 0x200);
        assert_eq!(trace.opcode, 0x612A);
        assert_eq!(trace.mnemonic, Some("LD"));
        assert_eq!(trace.fault, None);
        assert_eq!(chip8.state().registers.pc, 0x202);
        assert_eq!(chip8.state().registers.get(0x1), 0x2A);
    }

    #[test]
    fn test_unknown_opcode_is_a_noop() {
        let mut chip8 = chip8(&[0xFF, 0xFF]);
        let registers = chip8.state().registers.clone();
        let trace = chip8.step();
        assert_eq!(trace.fault, Some(Fault::UnknownOpcode(0xFFFF)));
        assert_eq!(trace.mnemonic, None);
        assert_eq!(chip8.state().registers.pc, 0x202);
        assert_eq!(chip8.state().registers.v, registers.v);
        assert_eq!(chip8.state().registers.i, registers.i);
    }

    #[test]
    fn test_call_then_return() {
        // 0x200: CALL 0x206; 0x206: RET
        let mut chip8 = chip8(&[0x22, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0xEE]);
        chip8.step();
        assert_eq!(chip8.state().registers.pc, 0x206);
        chip8.step();
        assert_eq!(chip8.state().registers.pc, 0x202);
        assert_eq!(chip8.state().stack.sp(), 0);
    }

    #[test]
    fn test_seventeenth_call_overflows() {
        // 0x200: CALL 0x200, forever
        let mut chip8 = chip8(&[0x22, 0x00]);
        for _ in 0..STACK_DEPTH {
            assert_eq!(chip8.step().fault, None);
        }
        let stack = chip8.state().stack.clone();
        let trace = chip8.step();
        assert_eq!(trace.fault, Some(Fault::StackOverflow));
        assert_eq!(chip8.state().stack, stack);
        assert_eq!(chip8.state().registers.pc, 0x202);
    }

    #[test]
    fn test_return_on_empty_stack_underflows() {
        let mut chip8 = chip8(&[0x00, 0xEE]);
        let trace = chip8.step();
        assert_eq!(trace.fault, Some(Fault::StackUnderflow));
        assert_eq!(chip8.state().registers.pc, 0x202);
    }

    #[test]
    fn test_key_wait_spins_until_pressed() {
        let mut chip8 = chip8(&[0xF3, 0x0A]);
        for _ in 0..5 {
            chip8.step();
            assert_eq!(chip8.state().registers.pc, 0x200);
        }
        chip8.key_press(0x7);
        chip8.step();
        assert_eq!(chip8.state().registers.pc, 0x202);
        assert_eq!(chip8.state().registers.get(0x3), 0x7);
    }

    #[test]
    fn test_key_release() {
        let mut chip8 = chip8(&[]);
        chip8.key_press(0x2);
        chip8.key_release(0x2);
        assert!(!chip8.state().keypad.any_pressed());
    }

    #[test]
    fn test_fetch_wraps_program_counter() {
        // 0x200: LD V0, 0x02; 0x202: JP V0, 0xFFE -> 0x1000
        let mut chip8 = chip8(&[0x60, 0x02, 0xBF, 0xFE]);
        chip8.step();
        chip8.step();
        assert_eq!(chip8.state().registers.pc, 0x1000);
        // 0x1000 wraps to 0x000, where the font lives
        let trace = chip8.step();
        assert_eq!(trace.pc, 0x000);
        assert_eq!(trace.opcode, 0xF090);
    }

    #[test]
    fn test_timers_tick_once_per_frame() {
        // 0x200: LD V0, 0x05; LD DT, V0; LD ST, V0; JP 0x206
        let mut chip8 = chip8(&[0x60, 0x05, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06]);
        chip8.run_frame(11);
        assert_eq!(chip8.state().timers.delay(), 4);
        assert!(chip8.sound_enabled());
        for _ in 0..4 {
            chip8.run_frame(11);
        }
        assert_eq!(chip8.state().timers.delay(), 0);
        assert!(!chip8.sound_enabled());
        assert!(!chip8.sound_gate().is_open());
    }

    #[test]
    fn test_take_frame_only_after_draw() {
        // 0x200: DRW V0, V0, 5; CLS
        let mut chip8 = chip8(&[0xD0, 0x05, 0x00, 0xE0]);
        assert!(chip8.take_frame().is_none());
        chip8.step();
        let lit = chip8.take_frame().map(|frame| frame.get(0, 0));
        assert_eq!(lit, Some(1));
        assert!(chip8.take_frame().is_none());
        chip8.step();
        assert!(chip8.take_frame().is_some());
        assert_eq!(chip8.frame_buffer().get(0, 0), 0);
    }

    #[test]
    fn test_draw_over_lit_cells_sets_flag() {
        // DRW V0, V0, 1 twice at the same place
        let mut chip8 = chip8(&[0xD0, 0x01, 0xD0, 0x01]);
        chip8.step();
        assert_eq!(chip8.state().registers.get(VF), 0);
        chip8.step();
        assert_eq!(chip8.state().registers.get(VF), 1);
        assert!(chip8.frame_buffer().cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_observer_sees_every_step() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut chip8 = chip8(&[0x00, 0xE0, 0x00, 0xEE]);
        chip8.set_observer(Box::new(move |trace: &Trace| sink.lock().unwrap().push(*trace)));
        chip8.step();
        chip8.step();
        chip8.clear_observer();
        chip8.step();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].mnemonic, Some("CLS"));
        assert_eq!(seen[1].fault, Some(Fault::StackUnderflow));
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::with_seed(0);
        let mut rom: &[u8] = &[0x00, 0xE0];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.state().memory.read_word(0x200), 0x00E0);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut chip8 = Chip8::with_seed(0);
        let program = vec![0x12; 4000];
        let mut rom: &[u8] = &program;
        match chip8.load_rom(&mut rom) {
            Err(LoadError::ProgramTooLarge { size, .. }) => assert_eq!(size, MAX_PROGRAM_SIZE + 1),
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn test_load_rom_read_error() {
        let mut chip8 = Chip8::with_seed(0);
        match chip8.load_rom(&mut FailingReader) {
            Err(LoadError::ProgramLoadFailed(e)) => assert_eq!(e.kind(), io::ErrorKind::Other),
            other => panic!("expected ProgramLoadFailed, got {:?}", other),
        }
        assert_eq!(chip8.state().memory.read_word(0x200), 0x0000);
    }

    #[test]
    fn test_runs_on_another_thread() {
        // 0x200: LD V1, 0x2A; LD V2, 0x07
        let mut chip8 = chip8(&[0x61, 0x2A, 0x62, 0x07]);
        chip8.set_observer(Box::new(|_: &Trace| {}));
        let chip8 = std::thread::spawn(move || {
            chip8.step();
            chip8.step();
            chip8
        })
        .join()
        .unwrap();
        assert_eq!(chip8.state().registers.get(0x1), 0x2A);
        assert_eq!(chip8.state().registers.get(0x2), 0x07);
        assert_eq!(chip8.state().registers.pc, 0x204);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = chip8(&[0x61, 0x01]);
        let b = chip8(&[0x61, 0x01]);
        a.step();
        a.key_press(0x1);
        assert_eq!(b.state().registers.get(0x1), 0);
        assert!(!b.state().keypad.any_pressed());
    }
}
