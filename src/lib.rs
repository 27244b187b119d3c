//! A CHIP-8 virtual machine.
//!
//! The core is platform free: it knows nothing about windows or keyboards. Hosts feed it
//! input through an `InputSource`, receive frames through a `DisplaySink`, and drive it with
//! `Chip8::run` or one `Chip8::run_frame` at a time.

pub use chip8::Chip8;
pub use config::{Config, FaultPolicy};
pub use error::{Error, Fault};
pub use frontend::{DisplaySink, InputFrame, InputSource};
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use operations::execute;
pub use screen::{FrameBuffer, Screen};
pub use stack::CallStack;
pub use state::State;

mod chip8;
mod clock;
mod config;
pub mod constants;
mod error;
mod frontend;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod screen;
mod stack;
mod state;
