use crate::constants::{DEFAULT_FRAME_RATE, DEFAULT_TICKS_PER_UPDATE};
use crate::error::Error;

/// What the machine does once a running program faults.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Stop executing for good; every later frame reports the same fault.
    Halt,
    /// Log the fault, step over the offending instruction and keep running.
    Skip,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        FaultPolicy::Halt
    }
}

/// # Config
/// Knobs supplied by whoever hosts the machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per frame.
    pub ticks_per_update: u32,
    /// Frames per second; 0 runs frames back to back without pacing.
    pub frame_rate: u32,
    pub fault_policy: FaultPolicy,
    /// Seed for Cxkk's random bytes; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.ticks_per_update == 0 {
            return Err(Error::InvalidConfig("ticks per update must be at least 1"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ticks_per_update: DEFAULT_TICKS_PER_UPDATE,
            frame_rate: DEFAULT_FRAME_RATE,
            fault_policy: FaultPolicy::default(),
            rng_seed: None,
        }
    }
}
