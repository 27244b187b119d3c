use log::debug;
use rand::{Rng, RngCore};

use crate::constants::{FLAG_REGISTER, SPRITE_LEN, SPRITE_SHEET_START};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::State;

/// The outcome of a single instruction; `Ok` means it executed normally.
pub type Outcome = Result<(), Fault>;

/// Applies a single Instruction to the State.
///
/// The pc is bumped past the instruction before it executes, so jumps, calls and returns
/// overwrite it and skips add another 2 on top.
///
/// # Arguments
/// * `instruction` the decoded instruction to execute
/// * `state` the machine state to mutate
/// * `keypad` which keys are currently held
/// * `rng` the source of random bytes for Cxkk
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    keypad: &Keypad,
    rng: &mut dyn RngCore,
) -> Outcome {
    use Instruction::*;

    state.pc = state.pc.wrapping_add(0x2);

    match instruction {
        Clear => clr(state),
        Return => rts(state),
        Jump { addr } => jump(state, addr),
        Call { addr } => call(state, addr),
        SkipEqual { x, kk } => ske(state, x, kk),
        SkipNotEqual { x, kk } => skne(state, x, kk),
        SkipEqualReg { x, y } => skre(state, x, y),
        Load { x, kk } => load(state, x, kk),
        AddImmediate { x, kk } => add(state, x, kk),
        Move { x, y } => mv(state, x, y),
        Or { x, y } => or(state, x, y),
        And { x, y } => and(state, x, y),
        Xor { x, y } => xor(state, x, y),
        AddRegister { x, y } => addr(state, x, y),
        Subtract { x, y } => sub(state, x, y),
        ShiftRight { x, y } => shr(state, x, y),
        SubFrom { x, y } => subn(state, x, y),
        ShiftLeft { x, y } => shl(state, x, y),
        SkipNotEqualReg { x, y } => skrne(state, x, y),
        LoadIndex { addr } => loadi(state, addr),
        JumpRelative { addr } => jumpi(state, addr),
        Random { x, kk } => rnd(state, x, kk, rng),
        Draw { x, y, n } => draw(state, x, y, n),
        SkipIfKey { x } => skpr(state, keypad, x),
        SkipIfNotKey { x } => skup(state, keypad, x),
        GetDelay { x } => moved(state, x),
        WaitForKey { x } => keyd(state, x),
        SetDelay { x } => loadd(state, x),
        SetSound { x } => loads(state, x),
        AddIndex { x } => addi(state, x),
        LoadDigit { x } => ldspr(state, x),
        StoreBcd { x } => bcd(state, x),
        SaveRegisters { x } => stor(state, x),
        RestoreRegisters { x } => read(state, x),
        Invalid(op) => Err(Fault::InvalidInstruction(op)),
    }
}

/// clear
fn clr(state: &mut State) -> Outcome {
    state.screen.clear();
    Ok(())
}

/// PC = STACK.pop()
/// The pushed pc already points past the CALL so execution resumes right after it.
fn rts(state: &mut State) -> Outcome {
    state.pc = state.stack.pop()?;
    Ok(())
}

/// PC = addr
fn jump(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Outcome {
    state.stack.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// pc += 2 when the condition holds
fn skip_if(state: &mut State, condition: bool) -> Outcome {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Ok(())
}

/// if Vx == kk then pc += 2
fn ske(state: &mut State, x: u8, kk: u8) -> Outcome {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition)
}

/// if Vx != kk then pc += 2
fn skne(state: &mut State, x: u8, kk: u8) -> Outcome {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
fn skre(state: &mut State, x: u8, y: u8) -> Outcome {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition)
}

/// if Vx != Vy then pc += 2
fn skrne(state: &mut State, x: u8, y: u8) -> Outcome {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition)
}

/// if Vx.pressed then pc += 2
fn skpr(state: &mut State, keypad: &Keypad, x: u8) -> Outcome {
    let condition = keypad.is_pressed(state.v[x as usize]);
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
fn skup(state: &mut State, keypad: &Keypad, x: u8) -> Outcome {
    let condition = !keypad.is_pressed(state.v[x as usize]);
    skip_if(state, condition)
}

/// Vx = kk
fn load(state: &mut State, x: u8, kk: u8) -> Outcome {
    state.v[x as usize] = kk;
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
fn add(state: &mut State, x: u8, kk: u8) -> Outcome {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    Ok(())
}

/// Vx = Vy
fn mv(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] = state.v[y as usize];
    Ok(())
}

/// Vx |= Vy
fn or(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] |= state.v[y as usize];
    Ok(())
}

/// Vx &= Vy
fn and(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] &= state.v[y as usize];
    Ok(())
}

/// Vx ^= Vy
fn xor(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] ^= state.v[y as usize];
    Ok(())
}

/// Vx += Vy; VF = carry
fn addr(state: &mut State, x: u8, y: u8) -> Outcome {
    let sum = u16::from(state.v[x as usize]) + u16::from(state.v[y as usize]);
    state.v[x as usize] = sum as u8;
    state.v[FLAG_REGISTER] = (sum > 0xFF) as u8;
    Ok(())
}

/// Vx -= Vy; VF = !borrow
fn sub(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vx.wrapping_sub(vy);
    state.v[FLAG_REGISTER] = (vx >= vy) as u8;
    Ok(())
}

/// Vx = Vy >> 1; VF = the bit shifted out
fn shr(state: &mut State, x: u8, y: u8) -> Outcome {
    let vy = state.v[y as usize];
    state.v[x as usize] = vy >> 1;
    state.v[FLAG_REGISTER] = vy & 0x1;
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
fn subn(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vy.wrapping_sub(vx);
    state.v[FLAG_REGISTER] = (vy >= vx) as u8;
    Ok(())
}

/// Vx = Vy << 1; VF = the bit shifted out
fn shl(state: &mut State, x: u8, y: u8) -> Outcome {
    let vy = state.v[y as usize];
    state.v[x as usize] = vy << 1;
    state.v[FLAG_REGISTER] = vy >> 7;
    Ok(())
}

/// I = addr
fn loadi(state: &mut State, addr: u16) -> Outcome {
    state.i = addr;
    Ok(())
}

/// PC = V0 + addr
fn jumpi(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr + u16::from(state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & kk
fn rnd(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) -> Outcome {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the screen at (Vx, Vy).
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Outcome {
    let n = n as usize;
    let mut sprite = [0; 0xF];
    sprite[..n].copy_from_slice(state.read(state.i, n)?);

    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let collision = state.screen.draw_sprite(vx, vy, &sprite[..n]);
    state.v[FLAG_REGISTER] = collision as u8;
    Ok(())
}

/// Vx = DT
fn moved(state: &mut State, x: u8) -> Outcome {
    state.v[x as usize] = state.delay_timer;
    Ok(())
}

/// await a key release for Vx
/// Until a release shows up the pc is wound back so this instruction runs again.
fn keyd(state: &mut State, x: u8) -> Outcome {
    match state.released_key.take() {
        Some(key) => {
            debug!("key {:X} ends the wait", key);
            state.v[x as usize] = key;
            state.waiting_for_key = false;
        }
        None => {
            if !state.waiting_for_key {
                debug!("waiting for a key at {:03X}", state.pc.wrapping_sub(0x2));
            }
            state.waiting_for_key = true;
            state.pc = state.pc.wrapping_sub(0x2);
        }
    }
    Ok(())
}

/// DT = Vx
fn loadd(state: &mut State, x: u8) -> Outcome {
    state.delay_timer = state.v[x as usize];
    Ok(())
}

/// ST = Vx
/// Values below 2 are too short to sound and leave the timer at 0.
fn loads(state: &mut State, x: u8) -> Outcome {
    let vx = state.v[x as usize];
    state.sound_timer = if vx > 1 { vx } else { 0 };
    Ok(())
}

/// I += Vx
fn addi(state: &mut State, x: u8) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
fn ldspr(state: &mut State, x: u8) -> Outcome {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = SPRITE_SHEET_START + digit * SPRITE_LEN;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
fn bcd(state: &mut State, x: u8) -> Outcome {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.read_mut(state.i, 3)?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
fn stor(state: &mut State, x: u8) -> Outcome {
    let len = x as usize + 1;
    let v = state.v;
    state.read_mut(state.i, len)?.copy_from_slice(&v[..len]);
    state.i = state.i.wrapping_add(len as u16);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
fn read(state: &mut State, x: u8) -> Outcome {
    let len = x as usize + 1;
    let mut v = state.v;
    v[..len].copy_from_slice(state.read(state.i, len)?);
    state.v = v;
    state.i = state.i.wrapping_add(len as u16);
    Ok(())
}

#[cfg(test)]
mod test_operations {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, STACK_DEPTH};

    fn run(op: u16, state: &mut State) -> Outcome {
        run_with_keys(op, state, &Keypad::new())
    }

    fn run_with_keys(op: u16, state: &mut State, keypad: &Keypad) -> Outcome {
        let mut rng = StepRng::new(0xAB, 0);
        execute(Instruction::decode(op), state, keypad, &mut rng)
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.screen.draw_sprite(0, 0, &[0x80]);
        run(0x00E0, &mut state).unwrap();
        assert!(!state.screen.pixel(0, 0));
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.stack.push(0x0ABC).unwrap();
        run(0x00EE, &mut state).unwrap();
        assert!(state.stack.is_empty());
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let mut state = State::new();
        assert_eq!(run(0x00EE, &mut state), Err(Fault::StackUnderflow));
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        run(0x1ABC, &mut state).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.pc = 0x0ABC;
        run(0x2123, &mut state).unwrap();
        // the address of the instruction after the call is what gets pushed
        assert_eq!(state.stack.frames(), &[0x0ABE]);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_then_ret_resumes_after_call() {
        let mut state = State::new();
        run(0x2300, &mut state).unwrap();
        run(0x00EE, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_2nnn_call_overflows() {
        let mut state = State::new();
        for _ in 0..STACK_DEPTH {
            run(0x2200, &mut state).unwrap();
        }
        let before = state.stack;
        assert_eq!(run(0x2300, &mut state), Err(Fault::StackOverflow));
        assert_eq!(state.stack, before);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = State::new();
        run(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = State::new();
        run(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::new();
        run(0x6122, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        run(0x7102, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x1;
        run(0x8120, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        state.v[0xF] = 0x7;
        run(0x8121, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x7);
        assert_eq!(state.v[0xF], 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(0x8122, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(0x8123, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        run(0x8124, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 200;
        state.v[0x2] = 100;
        run(0x8124, &mut state).unwrap();
        assert_eq!(state.v[0x1], 44);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 10;
        state.v[0x2] = 5;
        run(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 5);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.v[0x1] = 5;
        state.v[0x2] = 10;
        run(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 251);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub_equal_is_no_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x42;
        state.v[0x2] = 0x42;
        run(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x0);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.v[0x2] = 0x5;
        run(0x8126, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = State::new();
        state.v[0x2] = 0x4;
        run(0x8126, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        run(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        run(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.v[0x2] = 0xFF;
        run(0x812E, &mut state).unwrap();
        // 0xFF << 1 = 0x01FE
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.v[0x2] = 0x4;
        run(0x812E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_into_vf() {
        let mut state = State::new();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x1;
        run(0x8F14, &mut state).unwrap();
        // the carry, not the sum
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_into_vf() {
        let mut state = State::new();
        state.v[0xF] = 5;
        state.v[0x1] = 10;
        run(0x8F15, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_into_vf() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        run(0x8F16, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_into_vf() {
        let mut state = State::new();
        state.v[0xF] = 10;
        state.v[0x1] = 5;
        run(0x8F17, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_into_vf() {
        let mut state = State::new();
        state.v[0x1] = 0x81;
        run(0x8F1E, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        run(0xAABC, &mut state).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        run(0xBABC, &mut state).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_past_memory_faults_on_fetch() {
        let mut state = State::new();
        state.v[0x0] = 0xFF;
        run(0xBFFF, &mut state).unwrap();
        assert_eq!(state.pc, 0x10FE);
        assert_eq!(state.fetch(), Err(Fault::AddressOutOfBounds(0x10FE)));
    }

    #[test]
    fn test_1nnn_jp_odd_target() {
        let mut state = State::new();
        state.load_program(&[0x00, 0x12, 0x34]).unwrap();
        run(0x1201, &mut state).unwrap();
        assert_eq!(state.pc, 0x201);
        assert_eq!(state.fetch(), Ok(0x1234));
    }

    #[test]
    fn test_cxkk_rnd_masks_random_byte() {
        let mut state = State::new();
        // the mock rng always yields 0xAB
        run(0xC10F, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x0B);
        run(0xC2FF, &mut state).unwrap();
        assert_eq!(state.v[0x2], 0xAB);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // Draw the 0x0 sprite with a 1x 1y offset
        run(0xD005, &mut state).unwrap();
        let mut expected = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[true, true, true, true]);
        expected[2][1..5].copy_from_slice(&[true, false, false, true]);
        expected[3][1..5].copy_from_slice(&[true, false, false, true]);
        expected[4][1..5].copy_from_slice(&[true, false, false, true]);
        expected[5][1..5].copy_from_slice(&[true, true, true, true]);
        assert_eq!(state.screen.frame_buffer(), &expected);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_twice_collides_and_erases() {
        let mut state = State::new();
        state.v[0x3] = 0x7;
        state.v[0x4] = 0x9;
        run(0xF329, &mut state).unwrap();
        run(0xD345, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x0);
        run(0xD345, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert!(state
            .screen
            .frame_buffer()
            .iter()
            .all(|row| row.iter().all(|&pixel| !pixel)));
    }

    #[test]
    fn test_dxyn_drw_out_of_bounds_sprite_faults() {
        let mut state = State::new();
        state.i = 0xFFE;
        assert_eq!(run(0xD005, &mut state), Err(Fault::AddressOutOfBounds(0x1000)));
        assert_eq!(state.screen, State::new().screen);
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        run_with_keys(0xE19E, &mut state, &Keypad::with_pressed(&[0xE])).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        run(0xE19E, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_ex9e_skp_ignores_values_that_arent_keys() {
        let mut state = State::new();
        state.v[0x1] = 0x1E;
        run_with_keys(0xE19E, &mut state, &Keypad::with_pressed(&[0xE])).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        run(0xE1A1, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        run_with_keys(0xE1A1, &mut state, &Keypad::with_pressed(&[0xE])).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.delay_timer = 0xF;
        run(0xF107, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_spins_without_release() {
        let mut state = State::new();
        run(0xF10A, &mut state).unwrap();
        assert!(state.waiting_for_key);
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_fx0a_ld_takes_released_key() {
        let mut state = State::new();
        state.waiting_for_key = true;
        state.released_key = Some(0xA);
        run(0xF10A, &mut state).unwrap();
        assert!(!state.waiting_for_key);
        assert_eq!(state.released_key, None);
        assert_eq!(state.v[0x1], 0xA);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        run(0xF115, &mut state).unwrap();
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        run(0xF118, &mut state).unwrap();
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld_ignores_single_tick() {
        let mut state = State::new();
        state.sound_timer = 0x9;
        state.v[0x1] = 0x1;
        run(0xF118, &mut state).unwrap();
        assert_eq!(state.sound_timer, 0x0);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        run(0xF11E, &mut state).unwrap();
        assert_eq!(state.i, 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        run(0xF129, &mut state).unwrap();
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        // 0x7B -> 123
        state.v[0x1] = 0x7B;
        state.i = 0x300;
        run(0xF133, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_fx33_ld_max() {
        let mut state = State::new();
        state.v[0x1] = 255;
        state.i = 0x300;
        run(0xF133, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x303], [2, 5, 5]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx_55_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        run(0xF455, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x305);
    }

    #[test]
    fn test_fx_65_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        run(0xF465, &mut state).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x305);
    }

    #[test]
    fn test_fx_55_then_65_round_trips() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        run(0xF355, &mut state).unwrap();
        assert_eq!(state.i, 0x304);

        state.v = [0; 16];
        state.i = 0x300;
        run(0xF365, &mut state).unwrap();
        assert_eq!(state.v[0x0..0x4], [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(state.i, 0x304);
    }

    #[test]
    fn test_fx_55_out_of_bounds_faults_without_writing() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.v[0x0..0x3].copy_from_slice(&[0x1, 0x2, 0x3]);
        assert!(matches!(
            run(0xF255, &mut state),
            Err(Fault::AddressOutOfBounds(_))
        ));
        assert_eq!(state.memory[0xFFE..], [0x0, 0x0]);
        assert_eq!(state.i, 0xFFE);
    }

    #[test]
    fn test_invalid_only_advances_pc() {
        let mut state = State::new();
        state.v[0x3] = 0x33;
        let mut expected = state;
        expected.pc = 0x0202;
        assert_eq!(run(0x5121, &mut state), Err(Fault::InvalidInstruction(0x5121)));
        assert_eq!(state, expected);
    }
}
