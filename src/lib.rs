// 16 8-bit data registers named V0 to VF, VF doubling as the flag
// I -> address register (12 bits)
//
// Call stack of 16 return addresses
//
// Delay & Sound timer: count down once per step until 0
//
// Display res: 64 width, 32 height, XOR drawn
//
// 35 opcodes, each are 2 bytes (big-endian)
//      NNN: address
//      NN: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier
//
// The crate is only the machine. Stepping speed, the window, key mapping
// and reading rom files belong to the host (see the binary).

pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod timer;

pub use decode::{OpCodes, RawInstruction};
pub use display::{FrameBuffer, HEIGHT, WIDTH};
pub use emulator::Emulator;
pub use error::{Chip8Error, Result};
pub use keyboard::{Keyboard, VKeys};
pub use memory::{TypeAddr, PROGRAM_START};
