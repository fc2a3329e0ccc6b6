/// A single fetched instruction word, with accessors for the
/// field groups every CHIP-8 instruction is built from.
///
/// ```text
/// bits:  15..12  11..8  7..4  3..0
///        class   x      y     n
///                       kk----kk
///                nnn----------nnn
/// ```
///
/// Splitting is total, any `u16` has a value for every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(u16);

impl Opcode {

    pub fn new(value: u16) -> Opcode {
        Opcode(value)
    }

    /// Combine the byte at PC (high) and at PC + 1 (low), big-endian.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode((high as u16) << 8 | low as u16)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn class(self) -> u8 {
        (self.0 >> 12) as u8
    }

    pub fn x(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub fn y(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    pub fn kk(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }

    /// All four nibbles, most significant first. Handy for matching.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.class(), self.x(), self.y(), self.n())
    }
}
