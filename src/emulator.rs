use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    decode::OpCodes,
    display::FrameBuffer,
    error::{Chip8Error, Result},
    keyboard::Keyboard,
    memory::{Memory, TypeAddr, FONT_GLYPH_HEIGHT, FONT_START},
    registers::Registers,
    timer::Timer,
};

/// The whole machine: registers, memory, stack, timers, keypad and screen,
/// plus the random source behind `CXNN`.
///
/// One call to [`Emulator::step`] runs one instruction. Pacing, input and
/// rendering are up to whoever owns the emulator.
pub struct Emulator<R: Rng = StdRng> {
    fb: FrameBuffer,
    pub regs: Registers,
    pub mem: Memory,
    pub keypad: Keyboard,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    rng: R,
}

impl Default for Emulator<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Emulator<StdRng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Emulator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            fb: FrameBuffer::new(),
            keypad: Keyboard::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            rng,
        }
    }

    /// Back to power-on state. The random source and keypad are kept.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.mem = Memory::new();
        self.fb = FrameBuffer::new();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.mem.load_rom(rom)
    }

    /// Returns the address the word was fetched from along with the decoded
    /// instruction. The program counter is already past it.
    pub fn fetch_decode(&mut self) -> (TypeAddr, OpCodes) {
        let addr = self.mem.pc.0;
        let ins = self.mem.next_instruction();
        (addr, OpCodes::decode_raw(ins))
    }

    /// Fetch, decode, execute, then tick both timers.
    ///
    /// Timers tick even when the instruction fails, and the program counter
    /// stays past the failing word, so the caller may keep stepping.
    pub fn step(&mut self) -> Result<()> {
        let (addr, operation) = self.fetch_decode();
        trace!("{addr:03x}: {operation}");
        let result = self.execute_ins(operation, addr);
        self.sync_timers();
        result
    }

    pub fn sync_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    /// Applies one instruction. `addr` is where it was fetched from and is
    /// only used for error reporting.
    pub fn execute_ins(&mut self, ins: OpCodes, addr: TypeAddr) -> Result<()> {
        match ins {
            OpCodes::ClearScreen => {
                self.fb.clear_buffer();
            }
            OpCodes::PopSubroutine => {
                let ret = self.mem.stack.pop(addr)?;
                self.mem.set_pc(ret);
            }
            OpCodes::Jump(target) => {
                self.mem.set_pc(target);
            }
            OpCodes::PushSubroutine(target) => {
                // return to the instruction after the call
                self.mem.stack.push(self.mem.pc.0, addr)?;
                self.mem.set_pc(target);
            }
            OpCodes::SkipEqualConstant(vx, nn) => {
                if self.regs.get(vx) == nn {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipNotEqualConstant(vx, nn) => {
                if self.regs.get(vx) != nn {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipEqualRegister(vx, vy) => {
                if self.regs.get(vx) == self.regs.get(vy) {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipNotEqualRegister(vx, vy) => {
                if self.regs.get(vx) != self.regs.get(vy) {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SetRegister(vx, nn) => {
                self.regs.set_register(vx, nn);
            }
            OpCodes::AddToRegister(vx, nn) => {
                self.regs.add_to_register(vx, nn);
            }
            OpCodes::CopyRegister(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            OpCodes::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            OpCodes::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            OpCodes::XOr(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            OpCodes::Add(vx, vy) => {
                let sum = self.regs.get(vx) as u16 + self.regs.get(vy) as u16;
                self.regs.set_register(vx, (sum & 0xFF) as u8);
                self.regs.set_flag(sum > 0xFF);
            }
            OpCodes::SubtractForward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_flag(x > y);
                self.regs.set_register(vx, x.wrapping_sub(y));
            }
            OpCodes::RightShift(vx, _) => {
                let x = self.regs.get(vx);
                self.regs.set_flag(x & 1 == 1);
                self.regs.set_register(vx, x >> 1);
            }
            OpCodes::SubtractBackward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_flag(y > x);
                self.regs.set_register(vx, y.wrapping_sub(x));
            }
            OpCodes::LeftShift(vx, _) => {
                let x = self.regs.get(vx);
                self.regs.set_flag((x >> 7) & 1 == 1);
                self.regs.set_register(vx, x << 1);
            }
            OpCodes::SetIndexRegister(target) => self.mem.set_index(target),
            OpCodes::JumpWithOffset(target) => {
                self.mem.set_pc(target + self.regs.get(0) as TypeAddr);
            }
            OpCodes::Random(vx, nn) => {
                let ransuu: u8 = self.rng.gen();
                self.regs.set_register(vx, nn & ransuu);
            }
            OpCodes::Draw(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                // rows I..I+N, 8 pixels wide each
                let sprite: Vec<u8> = self.mem.read(self.mem.index.0, height as usize).collect();
                let vf = self.fb.paint(x, y, &sprite);
                self.regs.set_flag(vf);
                self.fb.set_frame_ready();
            }
            OpCodes::SkipIfPressed(vx) => {
                if self.key_state(vx, addr)? {
                    self.mem.increment_pc();
                }
            }
            OpCodes::SkipIfNotPressed(vx) => {
                if !self.key_state(vx, addr)? {
                    self.mem.increment_pc();
                }
            }
            OpCodes::CopyDelayToRegister(vx) => self.regs.set_register(vx, self.delay_timer.get()),
            OpCodes::GetKey(vx) => match self.keypad.first_pressed() {
                Some(key) => self.regs.set_register(vx, key),
                // run this instruction again next step
                None => self.mem.decrement_pc(),
            },
            OpCodes::CopyRegisterToDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            OpCodes::CopyRegisterToSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            OpCodes::AddToIndex(vx) => {
                self.mem.index.add(self.regs.get(vx));
            }
            OpCodes::PointChar(vx) => {
                let glyph = (self.regs.get(vx) & 0xF) as TypeAddr;
                self.mem.set_index(FONT_START + glyph * FONT_GLYPH_HEIGHT);
            }
            OpCodes::ToDecimal(vx) => {
                let value = self.regs.get(vx);
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.mem.write(self.mem.index.0, &digits)?;
            }
            OpCodes::StoreRegisterToMemory(vx) => {
                let values: Vec<u8> = (0..=vx).map(|reg| self.regs.get(reg)).collect();
                self.mem.write(self.mem.index.0, &values)?;
            }
            OpCodes::LoadRegisterFromMemory(vx) => {
                for (reg, reg_val) in self.mem.read(self.mem.index.0, vx as usize + 1).enumerate() {
                    self.regs.set_register(reg as u8, reg_val);
                }
            }
            OpCodes::Unrecognized(opcode) => {
                return Err(Chip8Error::UnrecognizedOpcode { opcode, addr });
            }
        }
        Ok(())
    }

    fn key_state(&self, vx: u8, addr: TypeAddr) -> Result<bool> {
        let key = self.regs.get(vx);
        self.keypad
            .is_pressed(key)
            .ok_or(Chip8Error::InvalidKey { key, addr })
    }

    /// Decodes the word at `addr` without touching any state.
    pub fn disassemble_at(&self, addr: TypeAddr) -> OpCodes {
        OpCodes::decode_raw(self.mem.word_at(addr))
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn frame_ready(&self) -> bool {
        self.fb.frame_ready()
    }

    pub fn clear_frame_ready(&mut self) {
        self.fb.clear_frame_ready();
    }

    /// The screen, if it was drawn to since the last call. Clears the flag.
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if !self.fb.frame_ready() {
            return None;
        }
        self.fb.clear_frame_ready();
        Some(&self.fb)
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    pub fn pc(&self) -> TypeAddr {
        self.mem.pc.0
    }

    pub fn index(&self) -> TypeAddr {
        self.mem.index.0
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::{keyboard::VKeys, memory::PROGRAM_START};

    fn setup(rom: &[u8]) -> Emulator<StepRng> {
        let mut emu = Emulator::new(StepRng::new(0xA5, 0));
        emu.load_rom(rom).unwrap();
        emu
    }

    fn run(emu: &mut Emulator<StepRng>, steps: usize) {
        for _ in 0..steps {
            emu.step().unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let emu = setup(&[]);
        assert_eq!(emu.pc(), PROGRAM_START);
        assert_eq!(emu.index(), 0);
        assert!(emu.regs.as_slice().iter().all(|v| *v == 0));
        assert!(emu.mem.stack.is_empty());
        assert!(!emu.frame_ready());
        assert_eq!(emu.framebuffer().lit_count(), 0);
    }

    #[test]
    fn test_load_and_add() {
        let mut emu = setup(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14]);
        run(&mut emu, 3);
        assert_eq!(emu.regs.get(0), 15);
        assert_eq!(emu.regs.flag(), 0);
        assert_eq!(emu.pc(), 0x206);
    }

    #[test]
    fn test_add_with_carry() {
        let mut emu = setup(&[0x60, 0xFA, 0x61, 0x0A, 0x80, 0x14]);
        run(&mut emu, 3);
        assert_eq!(emu.regs.get(0), 4);
        assert_eq!(emu.regs.flag(), 1);
    }

    #[test]
    fn test_add_immediate_leaves_flag() {
        let mut emu = setup(&[0x6F, 0x07, 0x60, 0xFF, 0x70, 0x02]);
        run(&mut emu, 3);
        assert_eq!(emu.regs.get(0), 1);
        assert_eq!(emu.regs.flag(), 7);
    }

    #[test]
    fn test_subtract_flags() {
        let mut emu = setup(&[]);
        emu.regs.set_register(1, 5);
        emu.regs.set_register(2, 5);
        emu.execute_ins(OpCodes::SubtractForward(1, 2), 0x200).unwrap();
        // equal operands borrow nothing but do not count as greater
        assert_eq!(emu.regs.get(1), 0);
        assert_eq!(emu.regs.flag(), 0);

        emu.regs.set_register(1, 3);
        emu.regs.set_register(2, 5);
        emu.execute_ins(OpCodes::SubtractForward(1, 2), 0x200).unwrap();
        assert_eq!(emu.regs.get(1), 0xFE);
        assert_eq!(emu.regs.flag(), 0);

        emu.regs.set_register(1, 3);
        emu.execute_ins(OpCodes::SubtractBackward(1, 2), 0x200).unwrap();
        assert_eq!(emu.regs.get(1), 2);
        assert_eq!(emu.regs.flag(), 1);
    }

    #[test]
    fn test_flag_register_as_operand() {
        let mut emu = setup(&[]);
        emu.regs.set_register(0xF, 200);
        emu.regs.set_register(1, 100);
        // the sum lands in VF first, then the carry overwrites it
        emu.execute_ins(OpCodes::Add(0xF, 1), 0x200).unwrap();
        assert_eq!(emu.regs.flag(), 1);

        emu.regs.set_register(0xF, 9);
        emu.regs.set_register(1, 4);
        // the flag is written first, the difference wins
        emu.execute_ins(OpCodes::SubtractForward(0xF, 1), 0x200).unwrap();
        assert_eq!(emu.regs.flag(), 5);
    }

    #[test]
    fn test_shifts() {
        let mut emu = setup(&[]);
        emu.regs.set_register(3, 0b1000_0011);
        emu.execute_ins(OpCodes::RightShift(3, 7), 0x200).unwrap();
        assert_eq!(emu.regs.get(3), 0b0100_0001);
        assert_eq!(emu.regs.flag(), 1);

        emu.execute_ins(OpCodes::LeftShift(3, 7), 0x200).unwrap();
        assert_eq!(emu.regs.get(3), 0b1000_0010);
        assert_eq!(emu.regs.flag(), 0);

        emu.execute_ins(OpCodes::LeftShift(3, 7), 0x200).unwrap();
        assert_eq!(emu.regs.get(3), 0b0000_0100);
        assert_eq!(emu.regs.flag(), 1);
    }

    #[test]
    fn test_bitwise() {
        let mut emu = setup(&[]);
        emu.regs.set_register(0, 0b1100);
        emu.regs.set_register(1, 0b1010);
        emu.execute_ins(OpCodes::Or(0, 1), 0x200).unwrap();
        assert_eq!(emu.regs.get(0), 0b1110);
        emu.execute_ins(OpCodes::And(0, 1), 0x200).unwrap();
        assert_eq!(emu.regs.get(0), 0b1010);
        emu.execute_ins(OpCodes::XOr(0, 1), 0x200).unwrap();
        assert_eq!(emu.regs.get(0), 0);
        emu.execute_ins(OpCodes::CopyRegister(2, 1), 0x200).unwrap();
        assert_eq!(emu.regs.get(2), 0b1010);
    }

    #[test]
    fn test_jump() {
        let mut emu = setup(&[0x13, 0x00]);
        emu.step().unwrap();
        assert_eq!(emu.pc(), 0x300);
    }

    #[test]
    fn test_jump_with_offset() {
        let mut emu = setup(&[0x60, 0x10, 0xB3, 0x00]);
        run(&mut emu, 2);
        assert_eq!(emu.pc(), 0x310);
    }

    #[test]
    fn test_call_and_return() {
        // 200: CALL 206; 202: LD V1, 1; 204: JP 204; 206: LD V0, 1; 208: RET
        let mut emu = setup(&[0x22, 0x06, 0x61, 0x01, 0x12, 0x04, 0x60, 0x01, 0x00, 0xEE]);
        emu.step().unwrap();
        assert_eq!(emu.pc(), 0x206);
        assert_eq!(emu.mem.stack.frames(), &[0x202]);
        run(&mut emu, 2);
        assert_eq!(emu.pc(), 0x202);
        assert!(emu.mem.stack.is_empty());
        run(&mut emu, 1);
        assert_eq!(emu.regs.get(0), 1);
        assert_eq!(emu.regs.get(1), 1);
    }

    #[test]
    fn test_return_on_empty_stack() {
        let mut emu = setup(&[0x00, 0xEE]);
        assert_eq!(
            emu.step(),
            Err(Chip8Error::StackUnderflow { addr: 0x200 })
        );
        assert_eq!(emu.pc(), 0x202);
    }

    #[test]
    fn test_call_overflow() {
        // 200: CALL 200, forever
        let mut emu = setup(&[0x22, 0x00]);
        run(&mut emu, 16);
        assert_eq!(emu.mem.stack.depth(), 16);
        assert_eq!(
            emu.step(),
            Err(Chip8Error::StackOverflow { addr: 0x200 })
        );
        assert_eq!(emu.mem.stack.depth(), 16);
        assert_eq!(emu.pc(), 0x202);
    }

    #[test]
    fn test_skips() {
        let mut emu = setup(&[]);
        emu.regs.set_register(1, 0x42);
        emu.regs.set_register(2, 0x42);
        let cases = [
            (OpCodes::SkipEqualConstant(1, 0x42), true),
            (OpCodes::SkipEqualConstant(1, 0x41), false),
            (OpCodes::SkipNotEqualConstant(1, 0x41), true),
            (OpCodes::SkipNotEqualConstant(1, 0x42), false),
            (OpCodes::SkipEqualRegister(1, 2), true),
            (OpCodes::SkipEqualRegister(1, 3), false),
            (OpCodes::SkipNotEqualRegister(1, 3), true),
            (OpCodes::SkipNotEqualRegister(1, 2), false),
        ];
        for (op, skips) in cases {
            emu.mem.set_pc(0x202);
            emu.execute_ins(op, 0x200).unwrap();
            let expected = if skips { 0x204 } else { 0x202 };
            assert_eq!(emu.pc(), expected, "{op}");
        }
    }

    #[test]
    fn test_random_uses_injected_source() {
        let mut emu = setup(&[0xC3, 0x0F, 0xC4, 0xFF]);
        run(&mut emu, 2);
        assert_eq!(emu.regs.get(3), 0x05);
        assert_eq!(emu.regs.get(4), 0xA5);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let rom = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let mut a = Emulator::with_seed(7);
        let mut b = Emulator::with_seed(7);
        a.load_rom(&rom).unwrap();
        b.load_rom(&rom).unwrap();
        for _ in 0..3 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.regs, b.regs);
    }

    #[test]
    fn test_draw_font_glyph() {
        // LD V0, 0; LD F, V0; DRW V0, V0, 5
        let mut emu = setup(&[0x60, 0x00, 0xF0, 0x29, 0xD0, 0x05]);
        run(&mut emu, 3);
        let fb = emu.framebuffer();
        // "0" glyph: F0 90 90 90 F0
        assert!((0..4).all(|x| fb.get(x, 0) && fb.get(x, 4)));
        assert!(fb.get(0, 2) && fb.get(3, 2));
        assert!(!fb.get(1, 2) && !fb.get(4, 0));
        assert_eq!(fb.lit_count(), 14);
        assert_eq!(emu.regs.flag(), 0);
        assert!(emu.frame_ready());
    }

    #[test]
    fn test_draw_twice_erases() {
        let mut emu = setup(&[0x00, 0xE0, 0xA0, 0x50, 0xD0, 0x05, 0xD0, 0x05]);
        run(&mut emu, 3);
        assert_eq!(emu.regs.flag(), 0);
        run(&mut emu, 1);
        assert_eq!(emu.framebuffer().lit_count(), 0);
        assert_eq!(emu.regs.flag(), 1);
    }

    #[test]
    fn test_take_frame_clears_flag() {
        let mut emu = setup(&[0xD0, 0x01, 0x00, 0xE0]);
        assert!(emu.take_frame().is_none());
        emu.step().unwrap();
        assert!(emu.take_frame().is_some());
        assert!(!emu.frame_ready());
        // clearing the screen alone does not raise the flag
        emu.step().unwrap();
        assert!(!emu.frame_ready());
    }

    #[test]
    fn test_key_skips() {
        let mut emu = setup(&[]);
        emu.regs.set_register(2, 0xB);
        emu.mem.set_pc(0x202);
        emu.execute_ins(OpCodes::SkipIfPressed(2), 0x200).unwrap();
        assert_eq!(emu.pc(), 0x202);
        emu.execute_ins(OpCodes::SkipIfNotPressed(2), 0x200).unwrap();
        assert_eq!(emu.pc(), 0x204);

        emu.keypad.press(VKeys::KeyB);
        emu.execute_ins(OpCodes::SkipIfPressed(2), 0x200).unwrap();
        assert_eq!(emu.pc(), 0x206);
        emu.execute_ins(OpCodes::SkipIfNotPressed(2), 0x200).unwrap();
        assert_eq!(emu.pc(), 0x206);
    }

    #[test]
    fn test_key_skip_rejects_out_of_range_key() {
        // SKP V2; SKNP V2
        let mut emu = setup(&[0xE2, 0x9E, 0xE2, 0xA1]);
        emu.regs.set_register(2, 0x1A);
        emu.keypad.press(VKeys::KeyA);
        assert_eq!(
            emu.step(),
            Err(Chip8Error::InvalidKey { key: 0x1A, addr: 0x200 })
        );
        assert_eq!(emu.pc(), 0x202);
        assert_eq!(
            emu.step(),
            Err(Chip8Error::InvalidKey { key: 0x1A, addr: 0x202 })
        );
        assert_eq!(emu.pc(), 0x204);
    }

    #[test]
    fn test_get_key_stalls_until_pressed() {
        let mut emu = setup(&[0xF5, 0x0A, 0x60, 0x01]);
        run(&mut emu, 3);
        assert_eq!(emu.pc(), 0x200);
        assert_eq!(emu.regs.get(5), 0);

        emu.keypad.press(VKeys::KeyD);
        emu.keypad.press(VKeys::Key9);
        emu.step().unwrap();
        assert_eq!(emu.regs.get(5), 0x9);
        assert_eq!(emu.pc(), 0x202);
    }

    #[test]
    fn test_timers() {
        // LD V0, 3; LD DT, V0; LD ST, V0; LD V1, DT
        let mut emu = setup(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18, 0xF1, 0x07]);
        run(&mut emu, 2);
        // set then ticked once in the same step
        assert_eq!(emu.delay_timer.get(), 2);
        run(&mut emu, 1);
        assert_eq!(emu.sound_timer.get(), 2);
        assert!(emu.sound_active());
        run(&mut emu, 1);
        assert_eq!(emu.regs.get(1), 1);
        assert_eq!(emu.delay_timer.get(), 0);
        assert_eq!(emu.sound_timer.get(), 1);
        emu.sync_timers();
        emu.sync_timers();
        assert_eq!(emu.sound_timer.get(), 0);
        assert!(!emu.sound_active());
    }

    #[test]
    fn test_index_ops() {
        let mut emu = setup(&[]);
        emu.execute_ins(OpCodes::SetIndexRegister(0xFFE), 0x200).unwrap();
        emu.regs.set_register(4, 3);
        emu.execute_ins(OpCodes::AddToIndex(4), 0x200).unwrap();
        assert_eq!(emu.index(), 0x001);
        // VF is not a carry for I
        assert_eq!(emu.regs.flag(), 0);

        emu.regs.set_register(4, 0xA);
        emu.execute_ins(OpCodes::PointChar(4), 0x200).unwrap();
        assert_eq!(emu.index(), 0x050 + 50);
    }

    #[test]
    fn test_bcd() {
        let mut emu = setup(&[]);
        emu.mem.set_index(0x300);
        for (value, digits) in [(254u8, [2u8, 5, 4]), (7, [0, 0, 7]), (60, [0, 6, 0])] {
            emu.regs.set_register(2, value);
            emu.execute_ins(OpCodes::ToDecimal(2), 0x200).unwrap();
            assert_eq!(emu.mem.read(0x300, 3).collect::<Vec<_>>(), digits);
        }
    }

    #[test]
    fn test_store_and_load_registers() {
        let mut emu = setup(&[]);
        for reg in 0..16 {
            emu.regs.set_register(reg, reg * 3 + 1);
        }
        emu.mem.set_index(0x400);
        emu.execute_ins(OpCodes::StoreRegisterToMemory(4), 0x200).unwrap();
        // inclusive of V4, nothing past it
        assert_eq!(emu.mem.get(0x404), 13);
        assert_eq!(emu.mem.get(0x405), 0);
        assert_eq!(emu.index(), 0x400);

        emu.mem.set(0x400, 0x99).unwrap();
        emu.mem.set(0x405, 0x77).unwrap();
        emu.execute_ins(OpCodes::LoadRegisterFromMemory(4), 0x200).unwrap();
        assert_eq!(emu.regs.get(0), 0x99);
        assert_eq!(emu.regs.get(4), 13);
        assert_eq!(emu.regs.get(5), 16);
    }

    #[test]
    fn test_store_into_font_rejected() {
        let mut emu = setup(&[0xA0, 0x4E, 0xF3, 0x55]);
        emu.step().unwrap();
        assert_eq!(
            emu.step(),
            Err(Chip8Error::ProtectedWrite { addr: 0x50 })
        );
        assert_eq!(emu.mem.get(0x4E), 0);
    }

    #[test]
    fn test_unrecognized_reports_and_continues() {
        let mut emu = setup(&[0x01, 0x23, 0x60, 0x05]);
        emu.delay_timer.set(2);
        assert_eq!(
            emu.step(),
            Err(Chip8Error::UnrecognizedOpcode {
                opcode: 0x0123,
                addr: 0x200
            })
        );
        assert_eq!(emu.delay_timer.get(), 1);
        assert!(emu.regs.as_slice().iter().all(|v| *v == 0));
        emu.step().unwrap();
        assert_eq!(emu.regs.get(0), 5);
    }

    #[test]
    fn test_reset() {
        let mut emu = setup(&[0x60, 0x05, 0xD0, 0x01]);
        run(&mut emu, 2);
        emu.reset();
        assert_eq!(emu.pc(), PROGRAM_START);
        assert_eq!(emu.regs.get(0), 0);
        assert_eq!(emu.mem.get(0x200), 0);
        assert_eq!(emu.mem.get(0x50), 0xF0);
        assert!(!emu.frame_ready());
    }

    #[test]
    fn test_disassemble_at() {
        let emu = setup(&[0xA2, 0x2A, 0xD0, 0x1F]);
        assert_eq!(emu.disassemble_at(0x200), OpCodes::SetIndexRegister(0x22A));
        assert_eq!(emu.disassemble_at(0x202).to_string(), "DRW V0, V1, 15");
    }
}
