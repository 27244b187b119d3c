use log::info;

use vip8::{Chip8, Config, Error};
use vip8_display::Display;

use crate::input::SdlInput;

/// Loads `rom` and runs it in a window until the user quits or the machine halts.
///
/// The ROM is checked before SDL is touched so a bad ROM never opens a window.
pub fn run(rom: &[u8], config: Config, scale: u32) -> Result<(), Error> {
    let mut chip8 = Chip8::new(config)?;
    chip8.load_rom(rom)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::Frontend)?;
    let mut display = Display::new(&sdl, scale).map_err(Error::Frontend)?;
    let mut input = SdlInput::new(&sdl).map_err(Error::Frontend)?;

    info!(
        "running at {} instructions per frame, {} frames per second",
        config.ticks_per_update, config.frame_rate
    );
    chip8.run(&mut input, &mut display)
}
