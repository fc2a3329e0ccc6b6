//! Small helpers that are not tied to the state of a machine.

pub mod opcode;
