use crate::constants::STACK_DEPTH;
use crate::error::Fault;

/// # Call Stack
/// Return addresses for subroutine calls, `STACK_DEPTH` deep.
///
/// `sp` is the number of occupied slots, so `0 <= sp <= STACK_DEPTH`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallStack {
    slots: [u16; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            slots: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    /// Stores `addr` on top of the stack; a full stack is left untouched.
    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.sp == STACK_DEPTH {
            return Err(Fault::StackOverflow);
        }
        self.slots[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp])
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Occupied slots, oldest call first.
    pub fn frames(&self) -> &[u16] {
        &self.slots[..self.sp]
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
