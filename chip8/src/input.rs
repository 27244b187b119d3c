use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use vip8::{InputFrame, InputSource, Keypad};

use crate::keymap::keymap;

/// Reads the keypad off an SDL2 window's event queue.
///
/// Escape or closing the window asks the machine to quit.
pub struct SdlInput {
    events: EventPump,
    held: Keypad,
}

impl SdlInput {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        Ok(SdlInput {
            events: sdl.event_pump()?,
            held: Keypad::new(),
        })
    }
}

impl InputSource for SdlInput {
    fn poll(&mut self) -> InputFrame {
        let mut frame = InputFrame::default();

        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => frame.quit = true,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        self.held.press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        self.held.release(kc);
                        frame.released.push(kc);
                    }
                }
                _ => continue,
            }
        }

        frame.pressed = self.held;
        frame
    }
}
