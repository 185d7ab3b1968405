use crate::memory::TypeAddr;

pub const FLAG_REGISTER: u8 = 0xF;

/// V0 through VF. VF doubles as the carry / borrow / collision flag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[(reg_num & 0xF) as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let total = self.get(reg_num).wrapping_add(value);
        self.set_register(reg_num, total);
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[(reg_num & 0xF) as usize]
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG_REGISTER, flag as u8);
    }

    pub fn flag(&self) -> u8 {
        self.get(FLAG_REGISTER)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(2) & 0x0FFF;
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(2) & 0x0FFF;
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr & 0x0FFF;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr & 0x0FFF;
    }

    pub fn add(&mut self, offset: u8) {
        self.set_addr(self.0 + offset as TypeAddr);
    }
}
