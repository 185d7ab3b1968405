use thiserror::Error;

use crate::memory::TypeAddr;

pub type Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("unrecognized opcode {opcode:#06x} at {addr:#05x}")]
    UnrecognizedOpcode { opcode: u16, addr: TypeAddr },
    #[error("call stack overflow at {addr:#05x}")]
    StackOverflow { addr: TypeAddr },
    #[error("return with empty call stack at {addr:#05x}")]
    StackUnderflow { addr: TypeAddr },
    #[error("key {key:#04x} out of range at {addr:#05x}")]
    InvalidKey { key: u8, addr: TypeAddr },
    #[error("write to protected font memory at {addr:#05x}")]
    ProtectedWrite { addr: TypeAddr },
    #[error("rom is {size} bytes, at most {max} fit in program memory")]
    RomTooLarge { size: usize, max: usize },
}
