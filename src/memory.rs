use log::debug;

use crate::{
    error::{Chip8Error, Result},
    registers::{IndexRegister, ProgramCounter},
};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const FONT_START: TypeAddr = 0x050;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
pub const STACK_DEPTH: usize = 16;

const ADDR_MASK: TypeAddr = 0x0FFF;

const DEFAULT_FONT: FontBytes = [
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

/// Height in rows of one font glyph.
pub const FONT_GLYPH_HEIGHT: TypeAddr = 5;

struct Font {
    data: FontBytes,
}

impl Default for Font {
    fn default() -> Self {
        Self { data: DEFAULT_FONT }
    }
}

impl Font {
    fn range(&self) -> std::ops::Range<usize> {
        FONT_START as usize..FONT_START as usize + self.data.len()
    }
}

/// 4k of RAM plus the special purpose registers that address it.
///
/// Font glyphs live at 050 -> 09F and are read-only once loaded, programs
/// start at 200. Every address wraps to 12 bits.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    font: Font,
    pub stack: Stack,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut mem = Self {
            bytes: [0; MEMORY_SIZE],
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
            font: Font::default(),
        };
        mem.load_font();
        mem
    }

    fn load_font(&mut self) {
        let range = self.font.range();
        self.bytes[range].copy_from_slice(&self.font.data);
    }

    fn is_protected(&self, addr: TypeAddr) -> bool {
        self.font.range().contains(&(addr as usize))
    }

    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    pub fn set(&mut self, addr: TypeAddr, val: u8) -> Result<()> {
        self.write(addr, &[val])
    }

    /// `len` bytes starting at `addr`, wrapping past FFF back to 000.
    pub fn read(&self, addr: TypeAddr, len: usize) -> impl Iterator<Item = u8> + '_ {
        (0..len).map(move |i| self.get(addr.wrapping_add(i as TypeAddr)))
    }

    /// Writes all of `data` or nothing: the whole range is checked against the
    /// font area before the first byte lands.
    pub fn write(&mut self, addr: TypeAddr, data: &[u8]) -> Result<()> {
        let target = |i: usize| addr.wrapping_add(i as TypeAddr) & ADDR_MASK;
        if let Some(bad) = (0..data.len()).map(target).find(|a| self.is_protected(*a)) {
            return Err(Chip8Error::ProtectedWrite { addr: bad });
        }
        for (i, byte) in data.iter().enumerate() {
            self.bytes[target(i) as usize] = *byte;
        }
        Ok(())
    }

    /// Big-endian word at `addr`, high byte first.
    pub fn word_at(&self, addr: TypeAddr) -> u16 {
        let (l, r) = (self.get(addr), self.get(addr.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    pub fn next_instruction(&mut self) -> u16 {
        let ins = self.word_at(self.pc.0);
        self.increment_pc();
        ins
    }

    pub fn increment_pc(&mut self) {
        self.pc.increment();
    }

    pub fn decrement_pc(&mut self) {
        self.pc.decrement();
    }

    pub fn set_pc(&mut self, addr: TypeAddr) {
        self.pc.set_addr(addr);
    }

    pub fn set_index(&mut self, addr: TypeAddr) {
        self.index.set_addr(addr);
    }

    // loads program bytes starting at address 0x200
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: bytes.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start_index = PROGRAM_START as usize;
        self.bytes[start_index..].fill(0);
        self.bytes[start_index..start_index + bytes.len()].copy_from_slice(bytes);
        debug!("loaded {} byte program at {:#05x}", bytes.len(), start_index);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

/// Fixed capacity call stack.
///
/// A call stores the return address at the current pointer and then bumps
/// it; a return drops the pointer and then reads. `addr` on both is the
/// address of the instruction doing the call or return, used for errors.
pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    sp: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, ret: TypeAddr, addr: TypeAddr) -> Result<()> {
        let slot = self
            .addresses
            .get_mut(self.sp)
            .ok_or(Chip8Error::StackOverflow { addr })?;
        *slot = ret;
        self.sp += 1;
        debug!("call from {addr:#05x}, depth {}", self.sp);
        Ok(())
    }

    pub fn pop(&mut self, addr: TypeAddr) -> Result<TypeAddr> {
        let sp = self
            .sp
            .checked_sub(1)
            .ok_or(Chip8Error::StackUnderflow { addr })?;
        self.sp = sp;
        debug!("return from {addr:#05x}, depth {}", self.sp);
        Ok(self.addresses[sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// Live return addresses, oldest first.
    pub fn frames(&self) -> &[TypeAddr] {
        &self.addresses[..self.sp]
    }
}
