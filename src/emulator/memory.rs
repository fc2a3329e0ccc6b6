//! Flat, byte addressable memory with the font in the reserved low region.

use crate::emulator::error::{Error, Fault};

/// Address of the first font glyph.
pub const FONT_ADDR: usize = 0x000;

/// Each glyph is 5 bytes, one byte per row.
pub const GLYPH_SIZE: usize = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The address of the glyph for the low nibble of `digit`.
pub fn glyph_addr(digit: u8) -> usize {
    FONT_ADDR + GLYPH_SIZE * (digit & 0xF) as usize
}

pub struct Memory {
    bytes: Box<[u8]>,
    program_start: usize,
}

impl Memory {

    /// Zeroed memory of `size` bytes with the font copied in.
    pub fn new(size: usize, program_start: usize) -> Memory {
        let mut bytes = vec![0; size].into_boxed_slice();
        bytes[FONT_ADDR..FONT_ADDR + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes, program_start }
    }

    /// Space available for a program.
    pub fn capacity(&self) -> usize {
        self.bytes.len() - self.program_start
    }

    /// Copy a program into memory at the program start.
    /// Memory is left untouched if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        let capacity = self.capacity();
        if program.len() > capacity {
            return Err(Error::OutOfBounds { len: program.len(), capacity });
        }
        let start = self.program_start;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        log::debug!("Loaded {} bytes at {:#05x}", program.len(), start);
        Ok(())
    }

    pub fn read(&self, addr: usize) -> Result<u8, Fault> {
        self.bytes.get(addr).copied().ok_or(Fault::AddressFault { addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        if addr < self.program_start {
            log::warn!("Write of {:#04x} to {:#05x} is inside the interpreter area", value, addr);
        }
        match self.bytes.get_mut(addr) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Fault::AddressFault { addr }),
        }
    }

    /// The `len` bytes starting at `addr`.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        let end = addr.checked_add(len).ok_or(Fault::AddressFault { addr })?;
        if end > self.bytes.len() {
            // Report the first byte that is out of range
            return Err(Fault::AddressFault { addr: addr.max(self.bytes.len()) });
        }
        Ok(&self.bytes[addr..end])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn memory() -> Memory {
        Memory::new(4096, 0x200)
    }

    #[test]
    fn font_is_loaded_at_construction() {
        let memory = memory();
        assert_eq!(&memory.as_slice()[FONT_ADDR..FONT_ADDR + FONT.len()], &FONT[..]);
        assert_eq!(memory.read(FONT.len()), Ok(0));
    }

    #[test]
    fn glyphs_are_five_bytes_apart() {
        assert_eq!(glyph_addr(0x0), FONT_ADDR);
        assert_eq!(glyph_addr(0xA), FONT_ADDR + 50);
        assert_eq!(glyph_addr(0x1F), glyph_addr(0xF));
    }

    #[test]
    fn program_exactly_filling_memory_is_loaded() {
        let mut memory = memory();
        let program = vec![0xAB; 4096 - 0x200];
        assert_eq!(memory.load(&program), Ok(()));
        assert_eq!(memory.read(0x200), Ok(0xAB));
        assert_eq!(memory.read(4095), Ok(0xAB));
    }

    #[test]
    fn program_one_byte_too_long_is_rejected() {
        let mut memory = memory();
        let before = memory.as_slice().to_vec();
        let program = vec![0xAB; 4096 - 0x200 + 1];
        assert_eq!(memory.load(&program), Err(Error::OutOfBounds { len: 3585, capacity: 3584 }));
        assert_eq!(memory.as_slice(), &before[..]);
    }

    #[test]
    fn accesses_outside_memory_fault() {
        let mut memory = memory();
        assert_eq!(memory.read(4096), Err(Fault::AddressFault { addr: 4096 }));
        assert_eq!(memory.write(5000, 1), Err(Fault::AddressFault { addr: 5000 }));
        assert_eq!(memory.slice(4094, 3), Err(Fault::AddressFault { addr: 4096 }));
        assert_eq!(memory.slice(4094, 2).map(|s| s.len()), Ok(2));
    }

    #[test]
    fn writes_are_visible_to_reads() {
        let mut memory = memory();
        memory.write(0x300, 0x42).unwrap();
        assert_eq!(memory.read(0x300), Ok(0x42));
    }
}
