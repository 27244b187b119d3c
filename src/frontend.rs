use crate::keypad::Keypad;
use crate::screen::FrameBuffer;

/// Everything the input layer observed since the previous frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// The host asked the machine to stop.
    pub quit: bool,
    /// Keys held right now.
    pub pressed: Keypad,
    /// Keys released since the last poll, in the order they were released.
    pub released: Vec<u8>,
}

/// A source of keypad input, e.g. a window's event pump.
///
/// Mapping physical keys to the 16 logical keys is the implementor's job.
pub trait InputSource {
    /// Drains pending host events into an InputFrame.
    fn poll(&mut self) -> InputFrame;
}

/// Somewhere to show the FrameBuffer.
pub trait DisplaySink {
    /// Presents a complete frame.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), String>;
}
