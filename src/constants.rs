/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 0x1000;

/// ROMs are loaded (and execution starts) here.
pub const PROGRAM_START: u16 = 0x200;

/// Number of general purpose registers V0..VF.
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry/borrow/collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// Maximum number of nested subroutine calls.
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Instructions executed per frame unless configured otherwise.
pub const DEFAULT_TICKS_PER_UPDATE: u32 = 10;

/// Frames per second unless configured otherwise; timers tick once per frame.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Address of the first digit glyph.
pub const SPRITE_SHEET_START: u16 = 0x000;

/// Bytes per digit glyph.
pub const SPRITE_LEN: u16 = 5;

/// # Sprite sheet
/// Glyphs for the hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
///
/// ```text
/// 0: ████   1:   █    2: ████   3: ████
///    █  █       ██          █         █
///    █  █        █       ████      ████
///    █  █        █       █            █
///    ████       ███      ████      ████
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
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
