use log::debug;

use crate::constants::{ADDRESS_MASK, GLYPH_SIZE};
use crate::cpu::{Cpu, Mode};
use crate::error::Fault;
use crate::opcode::Opcode;

// Every operation runs with the pc already moved past its opcode.
// Flag setting operations compute the flag and result from the original
// operands, then write VF, then Vx.

fn vx(op: &dyn Opcode) -> usize {
    usize::from(op.x())
}

fn vy(op: &dyn Opcode) -> usize {
    usize::from(op.y())
}

/// clear
pub fn clr(_op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.display.clear();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let pc = cpu.instruction_addr();
    cpu.pc = cpu.stack.pop().map_err(|e| e.at(pc))?;
    Ok(())
}

/// PC = addr
pub fn jump(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let pc = cpu.instruction_addr();
    cpu.stack.push(cpu.pc).map_err(|e| e.at(pc))?;
    cpu.pc = op.addr();
    Ok(())
}

fn skip_if(cpu: &mut Cpu, condition: bool) -> Result<(), Fault> {
    if condition {
        cpu.advance_pc();
    }
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let condition = cpu.v[vx(op)] == op.kk();
    skip_if(cpu, condition)
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let condition = cpu.v[vx(op)] != op.kk();
    skip_if(cpu, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let condition = cpu.v[vx(op)] == cpu.v[vy(op)];
    skip_if(cpu, condition)
}

/// Vx = kk
pub fn load(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] = op.kk();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] = cpu.v[vx(op)].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] = cpu.v[vy(op)];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] |= cpu.v[vy(op)];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] &= cpu.v[vy(op)];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] ^= cpu.v[vy(op)];
    Ok(())
}

fn set_with_flag(cpu: &mut Cpu, x: usize, value: u8, flag: bool) -> Result<(), Fault> {
    cpu.v[0xF] = u8::from(flag);
    cpu.v[x] = value;
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let (res, over) = cpu.v[vx(op)].overflowing_add(cpu.v[vy(op)]);
    set_with_flag(cpu, vx(op), res, over)
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let (res, under) = cpu.v[vx(op)].overflowing_sub(cpu.v[vy(op)]);
    set_with_flag(cpu, vx(op), res, !under)
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let value = cpu.v[vx(op)];
    set_with_flag(cpu, vx(op), value >> 1, value & 0x1 != 0)
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let (res, under) = cpu.v[vy(op)].overflowing_sub(cpu.v[vx(op)]);
    set_with_flag(cpu, vx(op), res, !under)
}

/// Vx <<= 1; VF = msb
pub fn shl(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let value = cpu.v[vx(op)];
    set_with_flag(cpu, vx(op), value << 1, value & 0x80 != 0)
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let condition = cpu.v[vx(op)] != cpu.v[vy(op)];
    skip_if(cpu, condition)
}

/// I = addr
pub fn loadi(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.pc = (u16::from(cpu.v[0x0]) + op.addr()) & ADDRESS_MASK;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] = cpu.random_byte() & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the display with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let mut sprite = [0; 0xF];
    let rows = usize::from(op.n());
    for (row, byte) in sprite[..rows].iter_mut().enumerate() {
        *byte = cpu.memory.read(cpu.i.wrapping_add(row as u16));
    }

    let collision = cpu
        .display
        .draw(cpu.v[vx(op)], cpu.v[vy(op)], &sprite[..rows]);
    cpu.v[0xF] = u8::from(collision);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let condition = cpu.keypad.is_pressed(cpu.v[vx(op)]);
    skip_if(cpu, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let condition = !cpu.keypad.is_pressed(cpu.v[vx(op)]);
    skip_if(cpu, condition)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.v[vx(op)] = cpu.timers.delay();
    Ok(())
}

/// await keypress for Vx
pub fn keyd(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    debug!("awaiting keypress for v{:X}", op.x());
    cpu.mode = Mode::AwaitingKey(op.x());
    Ok(())
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.timers.set_delay(cpu.v[vx(op)]);
    Ok(())
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.timers.set_sound(cpu.v[vx(op)]);
    Ok(())
}

/// I += Vx
/// I is masked back down to 12 bits
pub fn addi(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.i = (cpu.i + u16::from(cpu.v[vx(op)])) & ADDRESS_MASK;
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    cpu.i = u16::from(cpu.v[vx(op)]) * GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    let value = cpu.v[vx(op)];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        cpu.memory.write(cpu.i.wrapping_add(offset as u16), *digit);
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
/// I itself is left untouched
pub fn stor(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    for register in 0..=op.x() {
        let addr = cpu.i.wrapping_add(u16::from(register));
        cpu.memory.write(addr, cpu.v[usize::from(register)]);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
/// I itself is left untouched
pub fn read(op: &dyn Opcode, cpu: &mut Cpu) -> Result<(), Fault> {
    for register in 0..=op.x() {
        let addr = cpu.i.wrapping_add(u16::from(register));
        cpu.v[usize::from(register)] = cpu.memory.read(addr);
    }
    Ok(())
}
