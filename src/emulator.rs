//! The virtual machine and the pieces it is made of.

pub mod config;
pub mod display;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod memory;
pub mod observer;
pub mod random;
pub mod stack;
pub mod timers;

pub use config::Config;
pub use emulator::{Emulator, MachineState, Snapshot, Step};
pub use error::{Error, Fault};
pub use input::Keypad;
