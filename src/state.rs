use crate::constants::{MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, SPRITE_SHEET_START};
use crate::error::{Error, Fault};
use crate::screen::Screen;
use crate::stack::CallStack;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, pointing past the instruction being executed
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per frame until they reach 0
///
/// ## Memory
/// - a call stack of at most `STACK_DEPTH` return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the digit sprite sheet
///     - programs are loaded at 0x200
/// - the screen
///
/// ## Input
/// - Fx0A spins until a key is released; `waiting_for_key` is set while it spins and
///   `released_key` holds a release delivered in the meantime
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: CallStack,
    pub memory: [u8; MEMORY_SIZE],
    pub screen: Screen,
    pub waiting_for_key: bool,
    pub released_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let sheet = SPRITE_SHEET_START as usize;
        memory[sheet..sheet + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: CallStack::new(),
            memory,
            screen: Screen::new(),
            waiting_for_key: false,
            released_key: None,
        }
    }

    /// Copies a ROM verbatim into memory starting at 0x200.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<(), Error> {
        let start = PROGRAM_START as usize;
        let max = MEMORY_SIZE - start;
        if rom.len() > max {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max,
            });
        }
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16, Fault> {
        let bytes = self.read(self.pc, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Bounds-checked view of `len` bytes of memory starting at `addr`.
    pub fn read(&self, addr: u16, len: usize) -> Result<&[u8], Fault> {
        let range = Self::range(addr, len)?;
        Ok(&self.memory[range])
    }

    /// Bounds-checked mutable view of `len` bytes of memory starting at `addr`.
    pub fn read_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Fault> {
        let range = Self::range(addr, len)?;
        Ok(&mut self.memory[range])
    }

    fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>, Fault> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first address that doesn't exist
            return Err(Fault::AddressOutOfBounds(start.max(MEMORY_SIZE)));
        }
        Ok(start..end)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
