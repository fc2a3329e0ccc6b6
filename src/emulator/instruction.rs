use crate::util::opcode::Opcode;
use std::fmt;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    Unknown(u16), // Anything else
}

impl Instruction {

    pub fn from_u16(value: u16) -> Instruction {
        Instruction::decode(Opcode::new(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        Instruction::decode(Opcode::from_bytes(left, right))
    }

    /// Decoding never fails, words that are not instructions become `Unknown`.
    pub fn decode(opcode: Opcode) -> Instruction {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let kk = Const(opcode.kk());
        let nnn = Addr(opcode.nnn());
        match opcode.nibbles() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, _, _, _) => Instruction::IfRegEqConst(x, kk),
            (4, _, _, _) => Instruction::IfRegNeqConst(x, kk),
            (5, _, _, 0) => Instruction::IfRegEqReg(x, y),
            (6, _, _, _) => Instruction::SetRegToConst(x, kk),
            (7, _, _, _) => Instruction::IncRegByConst(x, kk),
            (8, _, _, 0) => Instruction::SetRegToReg(x, y),
            (8, _, _, 1) => Instruction::BitwiseOr(x, y),
            (8, _, _, 2) => Instruction::BitwiseAnd(x, y),
            (8, _, _, 3) => Instruction::BitwiseXor(x, y),
            (8, _, _, 4) => Instruction::IncRegByReg(x, y),
            (8, _, _, 5) => Instruction::DecRegByReg(x, y),
            (8, _, _, 6) => Instruction::BitshiftRight(x),
            (8, _, _, 7) => Instruction::SetVxVyMinusVx(x, y),
            (8, _, _, 0xE) => Instruction::BitshiftLeft(x),
            (9, _, _, 0) => Instruction::IfRegNeqReg(x, y),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, _, _, _) => Instruction::SetVxRand(x, kk),
            (0xD, _, _, n) => Instruction::Draw(x, y, Const(n)),
            (0xE, _, 9, 0xE) => Instruction::IfKeyEqVx(x),
            (0xE, _, 0xA, 1) => Instruction::IfKeyNeqVx(x),
            (0xF, _, 0, 7) => Instruction::SetRegToDelayTimer(x),
            (0xF, _, 0, 0xA) => Instruction::SetRegToGetKey(x),
            (0xF, _, 1, 5) => Instruction::SetDelayTimerToReg(x),
            (0xF, _, 1, 8) => Instruction::SetSoundTimerToReg(x),
            (0xF, _, 1, 0xE) => Instruction::AddRegToI(x),
            (0xF, _, 2, 9) => Instruction::SetIToSpriteAddrVx(x),
            (0xF, _, 3, 3) => Instruction::SetIToBcdOfReg(x),
            (0xF, _, 5, 5) => Instruction::RegDump(x),
            (0xF, _, 6, 5) => Instruction::RegLoad(x),
            _ => Instruction::Unknown(opcode.value()),
        }
    }
}

/// Assembly style mnemonics, as used in traces.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Goto(Addr(a)) => write!(f, "JP {:#05x}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05x}", a),
            IfRegEqConst(Reg(x), Const(k)) => write!(f, "SE V{:X}, {:#04x}", x, k),
            IfRegNeqConst(Reg(x), Const(k)) => write!(f, "SNE V{:X}, {:#04x}", x, k),
            IfRegEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            SetRegToConst(Reg(x), Const(k)) => write!(f, "LD V{:X}, {:#04x}", x, k),
            IncRegByConst(Reg(x), Const(k)) => write!(f, "ADD V{:X}, {:#04x}", x, k),
            SetRegToReg(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            BitwiseOr(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            BitwiseAnd(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            BitwiseXor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            IncRegByReg(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            DecRegByReg(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            BitshiftRight(Reg(x)) => write!(f, "SHR V{:X}", x),
            SetVxVyMinusVx(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            BitshiftLeft(Reg(x)) => write!(f, "SHL V{:X}", x),
            IfRegNeqReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetI(Addr(a)) => write!(f, "LD I, {:#05x}", a),
            SetPcToV0PlusAddr(Addr(a)) => write!(f, "JP V0, {:#05x}", a),
            SetVxRand(Reg(x), Const(k)) => write!(f, "RND V{:X}, {:#04x}", x, k),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            IfKeyEqVx(Reg(x)) => write!(f, "SKP V{:X}", x),
            IfKeyNeqVx(Reg(x)) => write!(f, "SKNP V{:X}", x),
            SetRegToDelayTimer(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            SetRegToGetKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelayTimerToReg(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimerToReg(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddRegToI(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            SetIToSpriteAddrVx(Reg(x)) => write!(f, "LD F, V{:X}", x),
            SetIToBcdOfReg(Reg(x)) => write!(f, "LD B, V{:X}", x),
            RegDump(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            RegLoad(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "DW {:#06x}", op),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Instruction::ClearScreen)]
    #[test_case(0x00EE => Instruction::Return)]
    #[test_case(0x1025 => Instruction::Goto(Addr(0x25)))]
    #[test_case(0x2037 => Instruction::Call(Addr(0x37)))]
    #[test_case(0x3A08 => Instruction::IfRegEqConst(Reg(0xA), Const(8)))]
    #[test_case(0x4A08 => Instruction::IfRegNeqConst(Reg(0xA), Const(8)))]
    #[test_case(0x5AB0 => Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x6B23 => Instruction::SetRegToConst(Reg(0xB), Const(0x23)))]
    #[test_case(0x7CA1 => Instruction::IncRegByConst(Reg(0xC), Const(0xA1)))]
    #[test_case(0x8AB0 => Instruction::SetRegToReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8DE1 => Instruction::BitwiseOr(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8DE2 => Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8DE3 => Instruction::BitwiseXor(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8AB4 => Instruction::IncRegByReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8AB5 => Instruction::DecRegByReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8AB6 => Instruction::BitshiftRight(Reg(0xA)))]
    #[test_case(0x8AB7 => Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8A0E => Instruction::BitshiftLeft(Reg(0xA)))]
    #[test_case(0x9AB0 => Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0xA025 => Instruction::SetI(Addr(0x25)))]
    #[test_case(0xB025 => Instruction::SetPcToV0PlusAddr(Addr(0x25)))]
    #[test_case(0xCA23 => Instruction::SetVxRand(Reg(0xA), Const(0x23)))]
    #[test_case(0xDABC => Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)))]
    #[test_case(0xEA9E => Instruction::IfKeyEqVx(Reg(0xA)))]
    #[test_case(0xEAA1 => Instruction::IfKeyNeqVx(Reg(0xA)))]
    #[test_case(0xFA07 => Instruction::SetRegToDelayTimer(Reg(0xA)))]
    #[test_case(0xFA0A => Instruction::SetRegToGetKey(Reg(0xA)))]
    #[test_case(0xFA15 => Instruction::SetDelayTimerToReg(Reg(0xA)))]
    #[test_case(0xFA18 => Instruction::SetSoundTimerToReg(Reg(0xA)))]
    #[test_case(0xFA1E => Instruction::AddRegToI(Reg(0xA)))]
    #[test_case(0xFA29 => Instruction::SetIToSpriteAddrVx(Reg(0xA)))]
    #[test_case(0xFA33 => Instruction::SetIToBcdOfReg(Reg(0xA)))]
    #[test_case(0xFA55 => Instruction::RegDump(Reg(0xA)))]
    #[test_case(0xFA65 => Instruction::RegLoad(Reg(0xA)))]
    fn opcodes_are_parsed_correctly(opcode: u16) -> Instruction {
        Instruction::from_u16(opcode)
    }

    #[test_case(0x0FFF)]
    #[test_case(0x0000)]
    #[test_case(0x5AB1)]
    #[test_case(0x8AB8)]
    #[test_case(0x9AB3)]
    #[test_case(0xE09F)]
    #[test_case(0xF0FF)]
    fn unassigned_patterns_are_unknown(opcode: u16) {
        assert_eq!(Instruction::from_u16(opcode), Instruction::Unknown(opcode));
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Instruction::from_u16(0x00E0).to_string(), "CLS");
        assert_eq!(Instruction::from_u16(0x6A05).to_string(), "LD VA, 0x05");
        assert_eq!(Instruction::from_u16(0xD125).to_string(), "DRW V1, V2, 5");
        assert_eq!(Instruction::from_u16(0xA123).to_string(), "LD I, 0x123");
        assert_eq!(Instruction::from_u16(0x0FFF).to_string(), "DW 0x0fff");
    }

    proptest! {
        #[test]
        fn decoding_is_total(value in any::<u16>()) {
            // Just has to return
            let _ = Instruction::from_u16(value);
        }
    }
}
