//! The bounded stack of return addresses.

use crate::emulator::error::Fault;

/// A fixed capacity stack. Overflow and underflow are decided by the
/// stack pointer alone, a stored return address of 0 is ordinary data.
pub struct CallStack {
    slots: Box<[u16]>,
    pointer: usize,
}

impl CallStack {

    pub fn new(depth: usize) -> CallStack {
        CallStack {
            slots: vec![0; depth].into_boxed_slice(),
            pointer: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.pointer == self.slots.len() {
            return Err(Fault::StackOverflow { depth: self.pointer });
        }
        self.slots[self.pointer] = addr;
        self.pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.pointer == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.slots[self.pointer])
    }

    /// Number of return addresses currently stored.
    pub fn depth(&self) -> usize {
        self.pointer
    }

    /// The stored return addresses, oldest first.
    pub fn frames(&self) -> &[u16] {
        &self.slots[..self.pointer]
    }
}
