//! Machine dimensions, fixed at construction.

use crate::emulator::error::Error;
use crate::emulator::memory::FONT;

/// Largest screen side length, screen sizes are byte sized.
pub const MAX_DISPLAY_DIMENSION: usize = 255;

/// Capacities of a machine. Checked once by [`Config::validate`] when the
/// emulator is built and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub memory_size: usize,
    pub program_start: usize,
    pub stack_depth: usize,
    pub display_width: usize,
    pub display_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            memory_size: 4096,
            program_start: 0x200,
            stack_depth: 16,
            display_width: 64,
            display_height: 32,
        }
    }
}

impl Config {

    pub fn validate(&self) -> Result<(), Error> {
        // Addresses are 16 bits wide
        if self.memory_size > 0x10000 {
            return Err(invalid(format!("memory size {} exceeds 65536 bytes", self.memory_size)));
        }
        if self.program_start < FONT.len() {
            return Err(invalid(format!(
                "program start {:#05x} overlaps the font, which ends at {:#05x}",
                self.program_start,
                FONT.len()
            )));
        }
        if self.program_start % 2 != 0 {
            return Err(invalid(format!("program start {:#05x} is not aligned", self.program_start)));
        }
        if self.memory_size <= self.program_start {
            return Err(invalid(format!(
                "memory size {} leaves no room for a program at {:#05x}",
                self.memory_size, self.program_start
            )));
        }
        if self.stack_depth == 0 {
            return Err(invalid("stack depth must be at least 1".to_string()));
        }
        check_display_size(self.display_width, self.display_height)
    }
}

/// Both sides of a screen must be in `1..=MAX_DISPLAY_DIMENSION`.
pub fn check_display_size(width: usize, height: usize) -> Result<(), Error> {
    let valid = 1..=MAX_DISPLAY_DIMENSION;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(Error::InvalidDisplaySize { width, height })
    }
}

fn invalid(reason: String) -> Error {
    Error::InvalidConfig(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test_case(Config { memory_size: 0x10001, ..Config::default() } ; "memory too large")]
    #[test_case(Config { program_start: 0x20, ..Config::default() } ; "program over font")]
    #[test_case(Config { program_start: 0x201, ..Config::default() } ; "unaligned program start")]
    #[test_case(Config { memory_size: 0x200, ..Config::default() } ; "no program room")]
    #[test_case(Config { stack_depth: 0, ..Config::default() } ; "empty stack")]
    fn rejects_bad_capacities(config: Config) {
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test_case(0, 32)]
    #[test_case(64, 0)]
    #[test_case(256, 32)]
    fn rejects_bad_display_sizes(width: usize, height: usize) {
        assert_eq!(check_display_size(width, height), Err(Error::InvalidDisplaySize { width, height }));
    }

    #[test]
    fn accepts_large_screens() {
        assert_eq!(check_display_size(128, 64), Ok(()));
        assert_eq!(check_display_size(255, 255), Ok(()));
    }
}
