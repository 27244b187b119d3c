use std::fmt;

use crate::opcode::{self, Opcode};

/// A decoded Chip-8 instruction.
///
/// `x` and `y` name registers (`Vx`, `Vy`), `kk` is an 8-bit immediate, `n` a 4-bit immediate
/// and `addr` a 12-bit address. Any word that doesn't encode one of the defined instructions
/// decodes to `Invalid`, which keeps the word around for error reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Clear,
    /// `00EE` return from a subroutine
    Return,
    /// `1nnn` PC = addr
    Jump { addr: u16 },
    /// `2nnn` STACK.push(PC); PC = addr
    Call { addr: u16 },
    /// `3xkk` if Vx == kk then skip
    SkipEqual { x: u8, kk: u8 },
    /// `4xkk` if Vx != kk then skip
    SkipNotEqual { x: u8, kk: u8 },
    /// `5xy0` if Vx == Vy then skip
    SkipEqualReg { x: u8, y: u8 },
    /// `6xkk` Vx = kk
    Load { x: u8, kk: u8 },
    /// `7xkk` Vx += kk
    AddImmediate { x: u8, kk: u8 },
    /// `8xy0` Vx = Vy
    Move { x: u8, y: u8 },
    /// `8xy1` Vx |= Vy
    Or { x: u8, y: u8 },
    /// `8xy2` Vx &= Vy
    And { x: u8, y: u8 },
    /// `8xy3` Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// `8xy4` Vx += Vy; VF = carry
    AddRegister { x: u8, y: u8 },
    /// `8xy5` Vx -= Vy; VF = !borrow
    Subtract { x: u8, y: u8 },
    /// `8xy6` Vx = Vy >> 1; VF = lsb(Vy)
    ShiftRight { x: u8, y: u8 },
    /// `8xy7` Vx = Vy - Vx; VF = !borrow
    SubFrom { x: u8, y: u8 },
    /// `8xyE` Vx = Vy << 1; VF = msb(Vy)
    ShiftLeft { x: u8, y: u8 },
    /// `9xy0` if Vx != Vy then skip
    SkipNotEqualReg { x: u8, y: u8 },
    /// `Annn` I = addr
    LoadIndex { addr: u16 },
    /// `Bnnn` PC = V0 + addr
    JumpRelative { addr: u16 },
    /// `Cxkk` Vx = random & kk
    Random { x: u8, kk: u8 },
    /// `Dxyn` draw the n-byte sprite at I to (Vx, Vy); VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// `Ex9E` if key Vx is pressed then skip
    SkipIfKey { x: u8 },
    /// `ExA1` if key Vx is not pressed then skip
    SkipIfNotKey { x: u8 },
    /// `Fx07` Vx = DT
    GetDelay { x: u8 },
    /// `Fx0A` block until a key is released; Vx = key
    WaitForKey { x: u8 },
    /// `Fx15` DT = Vx
    SetDelay { x: u8 },
    /// `Fx18` ST = Vx
    SetSound { x: u8 },
    /// `Fx1E` I += Vx
    AddIndex { x: u8 },
    /// `Fx29` I = address of the digit sprite for Vx
    LoadDigit { x: u8 },
    /// `Fx33` mem[I..I+3] = bcd(Vx)
    StoreBcd { x: u8 },
    /// `Fx55` mem[I..=I+x] = V0..=Vx
    SaveRegisters { x: u8 },
    /// `Fx65` V0..=Vx = mem[I..=I+x]
    RestoreRegisters { x: u8 },
    /// Anything else
    Invalid(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given opcode.
    ///
    /// Decoding is total: every one of the 65536 words maps to exactly one variant.
    pub fn decode(op: u16) -> Instruction {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqual { x, kk },
            (0x4, ..) => SkipNotEqual { x, kk },
            (0x5, .., 0x0) => SkipEqualReg { x, y },
            (0x6, ..) => Load { x, kk },
            (0x7, ..) => AddImmediate { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddRegister { x, y },
            (0x8, .., 0x5) => Subtract { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubFrom { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipNotEqualReg { x, y },
            (0xA, ..) => LoadIndex { addr },
            (0xB, ..) => JumpRelative { addr },
            (0xC, ..) => Random { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipIfKey { x },
            (0xE, _, 0xA, 0x1) => SkipIfNotKey { x },
            (0xF, _, 0x0, 0x7) => GetDelay { x },
            (0xF, _, 0x0, 0xA) => WaitForKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadDigit { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => SaveRegisters { x },
            (0xF, _, 0x6, 0x5) => RestoreRegisters { x },
            _ => Invalid(op),
        }
    }

    /// Packs the Instruction back into its opcode.
    pub fn encode(&self) -> u16 {
        use Instruction::*;

        match *self {
            Clear => 0x00E0,
            Return => 0x00EE,
            Jump { addr } => opcode::from_addr(0x1, addr),
            Call { addr } => opcode::from_addr(0x2, addr),
            SkipEqual { x, kk } => opcode::from_byte(0x3, x, kk),
            SkipNotEqual { x, kk } => opcode::from_byte(0x4, x, kk),
            SkipEqualReg { x, y } => opcode::from_nibbles(0x5, x, y, 0x0),
            Load { x, kk } => opcode::from_byte(0x6, x, kk),
            AddImmediate { x, kk } => opcode::from_byte(0x7, x, kk),
            Move { x, y } => opcode::from_nibbles(0x8, x, y, 0x0),
            Or { x, y } => opcode::from_nibbles(0x8, x, y, 0x1),
            And { x, y } => opcode::from_nibbles(0x8, x, y, 0x2),
            Xor { x, y } => opcode::from_nibbles(0x8, x, y, 0x3),
            AddRegister { x, y } => opcode::from_nibbles(0x8, x, y, 0x4),
            Subtract { x, y } => opcode::from_nibbles(0x8, x, y, 0x5),
            ShiftRight { x, y } => opcode::from_nibbles(0x8, x, y, 0x6),
            SubFrom { x, y } => opcode::from_nibbles(0x8, x, y, 0x7),
            ShiftLeft { x, y } => opcode::from_nibbles(0x8, x, y, 0xE),
            SkipNotEqualReg { x, y } => opcode::from_nibbles(0x9, x, y, 0x0),
            LoadIndex { addr } => opcode::from_addr(0xA, addr),
            JumpRelative { addr } => opcode::from_addr(0xB, addr),
            Random { x, kk } => opcode::from_byte(0xC, x, kk),
            Draw { x, y, n } => opcode::from_nibbles(0xD, x, y, n),
            SkipIfKey { x } => opcode::from_byte(0xE, x, 0x9E),
            SkipIfNotKey { x } => opcode::from_byte(0xE, x, 0xA1),
            GetDelay { x } => opcode::from_byte(0xF, x, 0x07),
            WaitForKey { x } => opcode::from_byte(0xF, x, 0x0A),
            SetDelay { x } => opcode::from_byte(0xF, x, 0x15),
            SetSound { x } => opcode::from_byte(0xF, x, 0x18),
            AddIndex { x } => opcode::from_byte(0xF, x, 0x1E),
            LoadDigit { x } => opcode::from_byte(0xF, x, 0x29),
            StoreBcd { x } => opcode::from_byte(0xF, x, 0x33),
            SaveRegisters { x } => opcode::from_byte(0xF, x, 0x55),
            RestoreRegisters { x } => opcode::from_byte(0xF, x, 0x65),
            Invalid(op) => op,
        }
    }
}

impl From<u16> for Instruction {
    fn from(op: u16) -> Self {
        Instruction::decode(op)
    }
}

/// Disassembles the Instruction using the conventional Chip-8 mnemonics.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEqual { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNotEqual { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqualReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImmediate { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddRegister { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Subtract { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubFrom { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNotEqualReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpRelative { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKey { x } => write!(f, "SKP V{:X}", x),
            SkipIfNotKey { x } => write!(f, "SKNP V{:X}", x),
            GetDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadDigit { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            SaveRegisters { x } => write!(f, "LD [I], V{:X}", x),
            RestoreRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Invalid(op) => write!(f, "DW {:#06X}", op),
        }
    }
}
