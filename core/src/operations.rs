//! One function per instruction.
//!
//! Each runs after the fetch has already moved the program counter past the
//! opcode, so "skip" means one more `+2` and jumps simply overwrite `pc`.

use rand::Rng;

use crate::constants::GLYPH_SIZE;
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::registers::VF;
use crate::state::State;

pub type Outcome = Result<(), Fault>;

fn skip_if(state: &mut State, condition: bool) -> Outcome {
    if condition {
        state.registers.pc = state.registers.pc.wrapping_add(0x2);
    }
    Ok(())
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State) -> Outcome {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.pc = state.stack.pop()?;
    Ok(())
}

/// PC = nnn
pub fn jump(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = nnn
pub fn call(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.stack.push(state.registers.pc)?;
    state.registers.pc = op.nnn();
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State) -> Outcome {
    let skip = state.registers.get(op.x()) == op.nn();
    skip_if(state, skip)
}

/// if Vx != nn then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State) -> Outcome {
    let skip = state.registers.get(op.x()) != op.nn();
    skip_if(state, skip)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State) -> Outcome {
    let skip = state.registers.get(op.x()) == state.registers.get(op.y());
    skip_if(state, skip)
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &mut State) -> Outcome {
    let skip = state.registers.get(op.x()) != state.registers.get(op.y());
    skip_if(state, skip)
}

/// Vx = nn
pub fn load(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.set(op.x(), op.nn());
    Ok(())
}

/// Vx += nn; no carry
pub fn add(op: &dyn Opcode, state: &mut State) -> Outcome {
    let sum = state.registers.get(op.x()).wrapping_add(op.nn());
    state.registers.set(op.x(), sum);
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State) -> Outcome {
    let vy = state.registers.get(op.y());
    state.registers.set(op.x(), vy);
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State) -> Outcome {
    let value = state.registers.get(op.x()) | state.registers.get(op.y());
    state.registers.set(op.x(), value);
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State) -> Outcome {
    let value = state.registers.get(op.x()) & state.registers.get(op.y());
    state.registers.set(op.x(), value);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State) -> Outcome {
    let value = state.registers.get(op.x()) ^ state.registers.get(op.y());
    state.registers.set(op.x(), value);
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.add_carry(op.x(), op.y());
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.sub(op.x(), op.y());
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.shr(op.x());
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.subn(op.x(), op.y());
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.shl(op.x());
    Ok(())
}

/// I = nnn
pub fn loadi(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.i = op.nnn();
    Ok(())
}

/// PC = V0 + nnn
pub fn jumpi(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.pc = u16::from(state.registers.get(0x0)) + op.nnn();
    Ok(())
}

/// Vx = rand_byte & nn
pub fn rand(op: &dyn Opcode, state: &mut State) -> Outcome {
    let rand_byte: u8 = state.rng.gen();
    state.registers.set(op.x(), rand_byte & op.nn());
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-byte sprite at I onto the frame buffer with wrapping.
/// VF = 1 if any lit cell was erased
pub fn draw(op: &dyn Opcode, state: &mut State) -> Outcome {
    let x = state.registers.get(op.x());
    let y = state.registers.get(op.y());
    let mut rows = [0; 0xF];
    let sprite = &mut rows[..usize::from(op.n())];
    for (line, byte) in (0..).zip(sprite.iter_mut()) {
        *byte = state.read_at_i(line);
    }

    state.registers.set(VF, 0x0);
    let collision = state.frame_buffer.draw_sprite(x, y, sprite);
    state.registers.set(VF, collision as u8);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State) -> Outcome {
    let skip = state.keypad.is_pressed(state.registers.get(op.x()));
    skip_if(state, skip)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State) -> Outcome {
    let skip = !state.keypad.is_pressed(state.registers.get(op.x()));
    skip_if(state, skip)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.set(op.x(), state.timers.delay());
    Ok(())
}

/// Vx = lowest pressed key, or retry this instruction on the next step
pub fn keyd(op: &dyn Opcode, state: &mut State) -> Outcome {
    match state.keypad.first_pressed() {
        Some(key) => state.registers.set(op.x(), key),
        None => state.registers.pc = state.registers.pc.wrapping_sub(0x2),
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.timers.set_delay(state.registers.get(op.x()));
    Ok(())
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.timers.set_sound(state.registers.get(op.x()));
    Ok(())
}

/// I += Vx; no flag
pub fn addi(op: &dyn Opcode, state: &mut State) -> Outcome {
    let vx = u16::from(state.registers.get(op.x()));
    state.registers.i = state.registers.i.wrapping_add(vx);
    Ok(())
}

/// I = Vx * 5
/// The address of the font glyph for digit Vx
pub fn ldspr(op: &dyn Opcode, state: &mut State) -> Outcome {
    state.registers.i = u16::from(state.registers.get(op.x())) * GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &dyn Opcode, state: &mut State) -> Outcome {
    let vx = state.registers.get(op.x());
    state.write_at_i(0, vx / 100);
    state.write_at_i(1, vx / 10 % 10);
    state.write_at_i(2, vx % 10);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: &dyn Opcode, state: &mut State) -> Outcome {
    for r in 0..=op.x() {
        let value = state.registers.get(r);
        state.write_at_i(r as u16, value);
    }
    state.registers.i = state.registers.i.wrapping_add(op.x() as u16 + 1);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I is left as is
pub fn read(op: &dyn Opcode, state: &mut State) -> Outcome {
    for r in 0..=op.x() {
        let value = state.read_at_i(r as u16);
        state.registers.set(r, value);
    }
    Ok(())
}
