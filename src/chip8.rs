use log::{debug, error, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::clock::FrameClock;
use crate::config::{Config, FaultPolicy};
use crate::constants::KEY_COUNT;
use crate::error::{Error, Fault};
use crate::frontend::{DisplaySink, InputFrame, InputSource};
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::operations::execute;
use crate::screen::FrameBuffer;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keypad` as of the last input frame
///  - the `rng` behind Cxkk
///  - the fault that `halted` the machine, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - applying the keys the input layer saw each frame
/// - advancing the CPU a single instruction or a whole frame at a time
/// - inspecting its frame buffer for rendering by some display
/// - driving all of the above against an input source and a display
pub struct Chip8<R = StdRng> {
    state: State,
    keypad: Keypad,
    config: Config,
    rng: R,
    halted: Option<Fault>,
}

impl Chip8<StdRng> {
    /// Creates a machine whose random bytes come from `config.rng_seed`, or the OS if unset.
    pub fn new(config: Config) -> Result<Self, Error> {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RngCore> Chip8<R> {
    /// Creates a machine that draws random bytes from `rng`.
    pub fn with_rng(config: Config, rng: R) -> Result<Self, Error> {
        config.validate()?;
        Ok(Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            config,
            rng,
            halted: None,
        })
    }

    /// Load a rom into memory at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        self.state.load_program(rom)?;
        debug!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// The fault that stopped the machine under `FaultPolicy::Halt`.
    pub fn halted(&self) -> Option<Fault> {
        self.halted
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.state.screen.frame_buffer()
    }

    /// Unset the pressed status of key
    /// - if the CPU is waiting on Fx0A the key is handed to it
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        if key as usize >= KEY_COUNT {
            return;
        }
        self.keypad.release(key);
        if self.state.waiting_for_key {
            debug!("key {:X} released while waiting", key);
            self.state.released_key = Some(key);
        }
    }

    /// Takes in everything the input layer saw since the last frame.
    pub fn apply_input(&mut self, input: &InputFrame) {
        for &key in &input.released {
            self.key_release(key);
        }
        self.keypad = input.pressed;
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode pointed at by the pc
    /// - decodes and executes it
    ///
    /// A halted machine executes nothing and reports the fault that halted it.
    pub fn step(&mut self) -> Result<(), Fault> {
        if let Some(fault) = self.halted {
            return Err(fault);
        }

        let pc = self.state.pc;
        let op = self.state.fetch()?;
        let instruction = Instruction::decode(op);
        trace!(
            "{:03X}: {:04X} {} v{:02X?} i{:03X}",
            pc,
            op,
            instruction,
            self.state.v,
            self.state.i
        );
        execute(instruction, &mut self.state, &self.keypad, &mut self.rng)
    }

    /// Runs a single frame
    /// - executes `ticks_per_update` instructions, stopping early at the first fault
    /// - advances the timers if the whole frame ran
    ///
    /// A halted machine executes nothing and keeps reporting the fault that halted it.
    pub fn run_frame(&mut self) -> Result<(), Fault> {
        if let Some(fault) = self.halted {
            return Err(fault);
        }

        for _ in 0..self.config.ticks_per_update {
            let pc = self.state.pc;
            if let Err(fault) = self.step() {
                self.handle_fault(fault, pc);
                return Err(fault);
            }
        }
        self.advance_timers();
        Ok(())
    }

    fn handle_fault(&mut self, fault: Fault, pc: u16) {
        match self.config.fault_policy {
            FaultPolicy::Halt => {
                error!("{} at {:03X}; halting", fault, pc);
                self.halted = Some(fault);
            }
            FaultPolicy::Skip => warn!("{} at {:03X}; skipping", fault, pc),
        }
    }

    /// Decrements both timers towards 0
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Runs frames until the input source asks to quit
    /// - polls input and hands it to the CPU
    /// - runs a frame
    /// - presents the frame buffer
    /// - sleeps out the rest of the frame
    ///
    /// Returns `Error::Halted` once a fault halts the machine.
    pub fn run<I, D>(&mut self, input: &mut I, display: &mut D) -> Result<(), Error>
    where
        I: InputSource,
        D: DisplaySink,
    {
        let mut clock = FrameClock::new(self.config.frame_rate);
        debug!("frame time {:?}", clock.frame_time());

        loop {
            let frame = input.poll();
            if frame.quit {
                debug!("quit requested");
                return Ok(());
            }
            self.apply_input(&frame);

            let outcome = self.run_frame();
            display
                .present(self.frame_buffer())
                .map_err(Error::Frontend)?;

            if let (Err(fault), Some(_)) = (outcome, self.halted) {
                return Err(Error::Halted(fault));
            }
            clock.tick();
        }
    }
}
