pub use chip8::{Chip8, Observer, Trace};
pub use constants::{CPU_CYCLES_PER_TIMER_CYCLE, TIMER_HZ};
pub use error::{Fault, LoadError};
pub use frame_buffer::Framebuffer;
pub use timers::SoundGate;

mod chip8;
pub mod constants;
mod error;
pub mod frame_buffer;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod stack;
pub mod state;
pub mod timers;
