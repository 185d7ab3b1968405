use std::fmt;

use crate::memory::TypeAddr;

/// Every operand field of an instruction word, extracted up front.
///
/// `n1` is the leading nibble, `addr` the low 12 bits (NNN) and `byte` the
/// low 8 bits (NN).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    pub code: u16,
    pub n1: u8,
    pub n2: u8,
    pub n3: u8,
    pub n4: u8,
    pub addr: TypeAddr,
    pub byte: u8,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction {
            code,
            n1: nth_m_digits(code, 1, 1) as u8,
            n2: nth_m_digits(code, 2, 1) as u8,
            n3: nth_m_digits(code, 3, 1) as u8,
            n4: nth_m_digits(code, 4, 1) as u8,
            addr: nth_m_digits(code, 2, 3),
            byte: nth_m_digits(code, 3, 2) as u8,
        }
    }
}

// n is starting digit (1 = most significant), m is length
fn nth_m_digits(code: u16, n: u8, m: u8) -> u16 {
    // 0110 1100 1111 0001
    // -------------------
    //      1111 1111 1111   n = 2, m = 3
    //           1111 1111   n = 3, m = 2
    let shift_places = (4 - m - (n - 1)) * 4;
    let mask = (1u32 << (m * 4)) - 1;
    (code >> shift_places) & mask as u16
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodes {
    // 00E0
    // turn all pixels to 0
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XNN
    SkipEqualConstant(u8, u8),
    // 4XNN
    SkipNotEqualConstant(u8, u8),
    // 5XY0
    SkipEqualRegister(u8, u8),
    // 9XY0
    SkipNotEqualRegister(u8, u8),

    // 6XNN
    // set register VX to value NN
    SetRegister(u8, u8),
    // 7XNN
    // add value NN to VX, VF untouched
    AddToRegister(u8, u8),

    // 8XY0
    CopyRegister(u8, u8),
    // 8XY1
    Or(u8, u8),
    // 8XY2
    And(u8, u8),
    // 8XY3
    XOr(u8, u8),
    /// 8XY4
    Add(u8, u8),
    // 8XY5
    SubtractForward(u8, u8),
    // 8XY6
    RightShift(u8, u8),
    // 8XY7
    SubtractBackward(u8, u8),
    // 8XYE
    LeftShift(u8, u8),

    // ANNN
    // set index register I to address NNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXNN
    Random(u8, u8),
    // DXYN
    // draw an N pixel tall sprite starting at I
    // at Coordinates (VX, VY)
    // XOR pixels on screen using sprite data
    // if pixels on screen were switched OFF: VF set to 1
    Draw(u8, u8, u8),

    // EX9E
    SkipIfPressed(u8),
    // EXA1
    SkipIfNotPressed(u8),

    // FX07
    CopyDelayToRegister(u8),
    // FX0A
    GetKey(u8),
    // FX15
    CopyRegisterToDelay(u8),
    // FX18
    CopyRegisterToSound(u8),
    // FX1E
    AddToIndex(u8),
    // FX29
    PointChar(u8),
    // FX33
    ToDecimal(u8),
    // FX55
    StoreRegisterToMemory(u8),
    // FX65
    LoadRegisterFromMemory(u8),

    /// Any word outside the table, kept verbatim.
    Unrecognized(u16),
}

impl OpCodes {
    pub fn decode_raw(ins: u16) -> Self {
        let raw = RawInstruction::new(ins);
        let (x, y) = (raw.n2, raw.n3);

        match raw.n1 {
            0x0 => match ins {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::PopSubroutine,
                _ => Self::Unrecognized(ins),
            },
            0x1 => Self::Jump(raw.addr),
            0x2 => Self::PushSubroutine(raw.addr),
            0x3 => Self::SkipEqualConstant(x, raw.byte),
            0x4 => Self::SkipNotEqualConstant(x, raw.byte),
            0x5 if raw.n4 == 0x0 => Self::SkipEqualRegister(x, y),
            0x6 => Self::SetRegister(x, raw.byte),
            0x7 => Self::AddToRegister(x, raw.byte),
            0x8 => match raw.n4 {
                0x0 => Self::CopyRegister(x, y),
                0x1 => Self::Or(x, y),
                0x2 => Self::And(x, y),
                0x3 => Self::XOr(x, y),
                0x4 => Self::Add(x, y),
                0x5 => Self::SubtractForward(x, y),
                0x6 => Self::RightShift(x, y),
                0x7 => Self::SubtractBackward(x, y),
                0xE => Self::LeftShift(x, y),
                _ => Self::Unrecognized(ins),
            },
            0x9 if raw.n4 == 0x0 => Self::SkipNotEqualRegister(x, y),
            0xA => Self::SetIndexRegister(raw.addr),
            0xB => Self::JumpWithOffset(raw.addr),
            0xC => Self::Random(x, raw.byte),
            0xD => Self::Draw(x, y, raw.n4),
            0xE => match raw.byte {
                0x9E => Self::SkipIfPressed(x),
                0xA1 => Self::SkipIfNotPressed(x),
                _ => Self::Unrecognized(ins),
            },
            0xF => match raw.byte {
                0x07 => Self::CopyDelayToRegister(x),
                0x0A => Self::GetKey(x),
                0x15 => Self::CopyRegisterToDelay(x),
                0x18 => Self::CopyRegisterToSound(x),
                0x1E => Self::AddToIndex(x),
                0x29 => Self::PointChar(x),
                0x33 => Self::ToDecimal(x),
                0x55 => Self::StoreRegisterToMemory(x),
                0x65 => Self::LoadRegisterFromMemory(x),
                _ => Self::Unrecognized(ins),
            },
            _ => Self::Unrecognized(ins),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

// Conventional assembler mnemonics, used in traces and disassembly.
impl fmt::Display for OpCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ClearScreen => write!(f, "CLS"),
            Self::PopSubroutine => write!(f, "RET"),
            Self::Jump(addr) => write!(f, "JP {addr:#05X}"),
            Self::PushSubroutine(addr) => write!(f, "CALL {addr:#05X}"),
            Self::SkipEqualConstant(x, nn) => write!(f, "SE V{x:X}, {nn:#04X}"),
            Self::SkipNotEqualConstant(x, nn) => write!(f, "SNE V{x:X}, {nn:#04X}"),
            Self::SkipEqualRegister(x, y) => write!(f, "SE V{x:X}, V{y:X}"),
            Self::SkipNotEqualRegister(x, y) => write!(f, "SNE V{x:X}, V{y:X}"),
            Self::SetRegister(x, nn) => write!(f, "LD V{x:X}, {nn:#04X}"),
            Self::AddToRegister(x, nn) => write!(f, "ADD V{x:X}, {nn:#04X}"),
            Self::CopyRegister(x, y) => write!(f, "LD V{x:X}, V{y:X}"),
            Self::Or(x, y) => write!(f, "OR V{x:X}, V{y:X}"),
            Self::And(x, y) => write!(f, "AND V{x:X}, V{y:X}"),
            Self::XOr(x, y) => write!(f, "XOR V{x:X}, V{y:X}"),
            Self::Add(x, y) => write!(f, "ADD V{x:X}, V{y:X}"),
            Self::SubtractForward(x, y) => write!(f, "SUB V{x:X}, V{y:X}"),
            Self::RightShift(x, _) => write!(f, "SHR V{x:X}"),
            Self::SubtractBackward(x, y) => write!(f, "SUBN V{x:X}, V{y:X}"),
            Self::LeftShift(x, _) => write!(f, "SHL V{x:X}"),
            Self::SetIndexRegister(addr) => write!(f, "LD I, {addr:#05X}"),
            Self::JumpWithOffset(addr) => write!(f, "JP V0, {addr:#05X}"),
            Self::Random(x, nn) => write!(f, "RND V{x:X}, {nn:#04X}"),
            Self::Draw(x, y, n) => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            Self::SkipIfPressed(x) => write!(f, "SKP V{x:X}"),
            Self::SkipIfNotPressed(x) => write!(f, "SKNP V{x:X}"),
            Self::CopyDelayToRegister(x) => write!(f, "LD V{x:X}, DT"),
            Self::GetKey(x) => write!(f, "LD V{x:X}, K"),
            Self::CopyRegisterToDelay(x) => write!(f, "LD DT, V{x:X}"),
            Self::CopyRegisterToSound(x) => write!(f, "LD ST, V{x:X}"),
            Self::AddToIndex(x) => write!(f, "ADD I, V{x:X}"),
            Self::PointChar(x) => write!(f, "LD F, V{x:X}"),
            Self::ToDecimal(x) => write!(f, "LD B, V{x:X}"),
            Self::StoreRegisterToMemory(x) => write!(f, "LD [I], V{x:X}"),
            Self::LoadRegisterFromMemory(x) => write!(f, "LD V{x:X}, [I]"),
            Self::Unrecognized(code) => write!(f, "DW {code:#06X}"),
        }
    }
}
