use thiserror::Error;

/// Faults a running program can cause.
///
/// These are reported by the CPU as values rather than panics; whether a fault stops the
/// machine is decided by the configured `FaultPolicy`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("invalid instruction {0:#06X}")]
    InvalidInstruction(u16),

    #[error("memory access out of bounds at {0:#06X}")]
    AddressOutOfBounds(usize),
}

/// Errors surfaced to whoever is hosting the machine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ROM is too large ({size} bytes), at most {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("machine halted: {0}")]
    Halted(#[source] Fault),

    #[error("frontend error: {0}")]
    Frontend(String),
}
