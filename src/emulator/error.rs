//! The two kinds of failure the emulator reports.
//!
//! A [`Fault`] comes out of executing a program and halts the machine.
//! An [`Error`] is a rejected request from the host, nothing changes and
//! the machine can keep going.

use thiserror::Error;

/// A fatal condition raised while executing an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("memory access out of bounds at address {addr:#06x}")]
    AddressFault { addr: usize },

    #[error("call stack overflow, already {depth} levels deep")]
    StackOverflow { depth: usize },

    #[error("return with an empty call stack")]
    StackUnderflow,
}

/// A request from the host that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The out-of-bounds case for loading a program.
    #[error("program is {len} bytes, but only {capacity} bytes are available")]
    OutOfBounds { len: usize, capacity: usize },

    /// The out-of-bounds case for resizing: a side is 0 or larger than
    /// [`MAX_DISPLAY_DIMENSION`](crate::emulator::config::MAX_DISPLAY_DIMENSION).
    #[error("display size {width}x{height} is not supported")]
    InvalidDisplaySize { width: usize, height: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_the_details() {
        let fault = Fault::AddressFault { addr: 0x1000 };
        assert_eq!(fault.to_string(), "memory access out of bounds at address 0x1000");

        let error = Error::OutOfBounds { len: 3585, capacity: 3584 };
        assert_eq!(error.to_string(), "program is 3585 bytes, but only 3584 bytes are available");
    }
}
