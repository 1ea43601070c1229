/*!
execute.rs - Instruction semantic helpers (ALU, flags, stack, RMW).

Purpose
=======
Centralizes the side-effect logic of instructions so the dispatcher stays
a thin routing layer: every mnemonic's flag behavior lives here exactly
once, shared by official and unofficial (composite) forms. DCP reuses
`cmp_with`, ISB reuses `sbc`, SLO reuses `asl` + `ora`, and so on.

Design Notes
============
- Shift/rotate helpers are value level: they take the input byte, set
  CARRY/Z/N, and return the result. The caller decides whether the result
  lands in A or back in memory (`rmw`).
- `sbc` is `adc` of the one's complement; with the borrow convention
  (C = no borrow) the carry-in makes the arithmetic line up exactly.
- The stack lives at 0x0100 | SP, descending, post-decrement on push.
  SP wraps within the page; there is no overflow detection, matching
  hardware.
*/

use crate::cpu::addressing::Operand;
use crate::error::Result;
use crate::memory::Memory;
use crate::registers::{BREAK, CARRY, NEGATIVE, OVERFLOW, Registers, UNUSED, ZERO};

/// Stack page base address.
pub(crate) const STACK_BASE: u16 = 0x0100;

// ---------------------------------------------------------------------------
// Loads and transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda(regs: &mut Registers, v: u8) {
    regs.a = v;
    regs.update_zn(v);
}

#[inline]
pub(crate) fn ldx(regs: &mut Registers, v: u8) {
    regs.x = v;
    regs.update_zn(v);
}

#[inline]
pub(crate) fn ldy(regs: &mut Registers, v: u8) {
    regs.y = v;
    regs.update_zn(v);
}

// ---------------------------------------------------------------------------
// Logic
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and(regs: &mut Registers, v: u8) {
    regs.a &= v;
    regs.update_zn(regs.a);
}

#[inline]
pub(crate) fn ora(regs: &mut Registers, v: u8) {
    regs.a |= v;
    regs.update_zn(regs.a);
}

#[inline]
pub(crate) fn eor(regs: &mut Registers, v: u8) {
    regs.a ^= v;
    regs.update_zn(regs.a);
}

/// BIT: Z from A & v; N and V copied straight from bits 7 and 6 of v.
#[inline]
pub(crate) fn bit(regs: &mut Registers, v: u8) {
    regs.assign_flag(ZERO, (regs.a & v) == 0);
    regs.assign_flag(NEGATIVE, (v & 0x80) != 0);
    regs.assign_flag(OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// ADC: A + v + C. Carry from the 9-bit sum, overflow from the signed
/// interpretation, Z/N from the 8-bit result. Decimal mode is ignored
/// (the NES 2A03 has no BCD circuitry).
pub(crate) fn adc(regs: &mut Registers, v: u8) {
    let carry_in = u16::from(regs.is_flag_set(CARRY));
    let sum = regs.a as u16 + v as u16 + carry_in;
    let result = sum as u8;
    regs.update_carry_from_sum(sum);
    regs.update_overflow_from_add(regs.a, v, result);
    regs.a = result;
    regs.update_zn(result);
}

/// SBC: A - v - (1 - C), implemented as ADC of the one's complement.
#[inline]
pub(crate) fn sbc(regs: &mut Registers, v: u8) {
    adc(regs, v ^ 0xFF);
}

/// Shared compare core (CMP/CPX/CPY, and the CMP half of DCP):
/// C = reg >= v, Z/N from the wrapped difference. Register unchanged.
#[inline]
pub(crate) fn cmp_with(regs: &mut Registers, reg: u8, v: u8) {
    regs.assign_flag(CARRY, reg >= v);
    regs.update_zn(reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Shifts and rotates (value level)
// ---------------------------------------------------------------------------

/// ASL: shift left, bit 7 into CARRY.
#[inline]
pub(crate) fn asl(regs: &mut Registers, v: u8) -> u8 {
    regs.assign_flag(CARRY, (v & 0x80) != 0);
    let r = v << 1;
    regs.update_zn(r);
    r
}

/// LSR: shift right, bit 0 into CARRY. N always clears.
#[inline]
pub(crate) fn lsr(regs: &mut Registers, v: u8) -> u8 {
    regs.assign_flag(CARRY, (v & 0x01) != 0);
    let r = v >> 1;
    regs.update_zn(r);
    r
}

/// ROL: rotate left through CARRY.
#[inline]
pub(crate) fn rol(regs: &mut Registers, v: u8) -> u8 {
    let carry_in = u8::from(regs.is_flag_set(CARRY));
    regs.assign_flag(CARRY, (v & 0x80) != 0);
    let r = (v << 1) | carry_in;
    regs.update_zn(r);
    r
}

/// ROR: rotate right through CARRY.
#[inline]
pub(crate) fn ror(regs: &mut Registers, v: u8) -> u8 {
    let carry_in = u8::from(regs.is_flag_set(CARRY)) << 7;
    regs.assign_flag(CARRY, (v & 0x01) != 0);
    let r = (v >> 1) | carry_in;
    regs.update_zn(r);
    r
}

// ---------------------------------------------------------------------------
// Increment / decrement (value level, shared with DCP/ISB)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inc_val(regs: &mut Registers, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    regs.update_zn(r);
    r
}

#[inline]
pub(crate) fn dec_val(regs: &mut Registers, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    regs.update_zn(r);
    r
}

// ---------------------------------------------------------------------------
// Read-modify-write choreography
// ---------------------------------------------------------------------------

/// Read the operand, apply `f`, write the result back, and return it so
/// composite opcodes can feed it into a second helper.
pub(crate) fn rmw<F>(regs: &mut Registers, mem: &mut Memory, operand: Operand, f: F) -> Result<u8>
where
    F: FnOnce(&mut Registers, u8) -> u8,
{
    let v = operand.value(regs, mem)?;
    let r = f(regs, v);
    match operand {
        Operand::Accumulator => regs.a = r,
        _ => mem.write(operand.address(), r)?,
    }
    Ok(r)
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

/// Push one byte at 0x0100 | SP, then decrement SP (wrapping in-page).
#[inline]
pub(crate) fn push(regs: &mut Registers, mem: &mut Memory, v: u8) -> Result<()> {
    mem.write(STACK_BASE | regs.sp as u16, v)?;
    regs.sp = regs.sp.wrapping_sub(1);
    Ok(())
}

/// Increment SP (wrapping in-page), then read the byte it points at.
#[inline]
pub(crate) fn pop(regs: &mut Registers, mem: &Memory) -> Result<u8> {
    regs.sp = regs.sp.wrapping_add(1);
    mem.read(STACK_BASE | regs.sp as u16)
}

/// Push a word high byte first, so it pops back in low/high order.
#[inline]
pub(crate) fn push_word(regs: &mut Registers, mem: &mut Memory, v: u16) -> Result<()> {
    push(regs, mem, (v >> 8) as u8)?;
    push(regs, mem, v as u8)
}

#[inline]
pub(crate) fn pop_word(regs: &mut Registers, mem: &Memory) -> Result<u16> {
    let lo = pop(regs, mem)? as u16;
    let hi = pop(regs, mem)? as u16;
    Ok((hi << 8) | lo)
}

/// Push P with UNUSED forced set; BREAK set for software pushes
/// (BRK/PHP), clear for hardware interrupt entry.
#[inline]
pub(crate) fn push_status(regs: &mut Registers, mem: &mut Memory, set_break: bool) -> Result<()> {
    let v = regs.compose_status_for_push(set_break);
    push(regs, mem, v)
}

/// Restore P from a popped byte: UNUSED reads as set, BREAK is not a
/// real flag and never lands in P.
#[inline]
pub(crate) fn restore_status(regs: &mut Registers, v: u8) {
    regs.status = (v | UNUSED) & !BREAK;
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// Conditional branch: when taken, move PC to `target` and return the
/// extra cycles (+1 taken, +1 more if the target is on another page than
/// the instruction's fall-through address).
#[inline]
pub(crate) fn branch(regs: &mut Registers, target: u16, taken: bool, crossed: bool) -> u32 {
    if !taken {
        return 0;
    }
    regs.pc = target;
    1 + u32::from(crossed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_sets_carry_and_result() {
        let mut regs = Registers::new();
        regs.a = 0xF0;
        adc(&mut regs, 0x20);
        assert_eq!(regs.a, 0x10);
        assert!(regs.is_flag_set(CARRY));
        assert!(!regs.is_flag_set(OVERFLOW));
        assert!(!regs.is_flag_set(ZERO));
    }

    #[test]
    fn adc_signed_overflow() {
        let mut regs = Registers::new();
        regs.a = 0x50;
        adc(&mut regs, 0x50);
        assert_eq!(regs.a, 0xA0);
        assert!(regs.is_flag_set(OVERFLOW));
        assert!(regs.is_flag_set(NEGATIVE));
        assert!(!regs.is_flag_set(CARRY));
    }

    #[test]
    fn adc_consumes_carry_in() {
        let mut regs = Registers::new();
        regs.a = 0x00;
        regs.set_flag_bit(CARRY);
        adc(&mut regs, 0x00);
        assert_eq!(regs.a, 0x01);
        assert!(!regs.is_flag_set(CARRY));
    }

    #[test]
    fn sbc_borrow_convention() {
        // C set = no borrow: 0x50 - 0x30 = 0x20, carry stays set.
        let mut regs = Registers::new();
        regs.a = 0x50;
        regs.set_flag_bit(CARRY);
        sbc(&mut regs, 0x30);
        assert_eq!(regs.a, 0x20);
        assert!(regs.is_flag_set(CARRY));
        // Subtracting past zero clears carry (borrow happened).
        regs.a = 0x10;
        regs.set_flag_bit(CARRY);
        sbc(&mut regs, 0x20);
        assert_eq!(regs.a, 0xF0);
        assert!(!regs.is_flag_set(CARRY));
    }

    #[test]
    fn compare_flag_matrix() {
        let mut regs = Registers::new();
        cmp_with(&mut regs, 0x10, 0x10);
        assert!(regs.is_flag_set(CARRY));
        assert!(regs.is_flag_set(ZERO));
        cmp_with(&mut regs, 0x10, 0x20);
        assert!(!regs.is_flag_set(CARRY));
        assert!(!regs.is_flag_set(ZERO));
        assert!(regs.is_flag_set(NEGATIVE));
        cmp_with(&mut regs, 0x20, 0x10);
        assert!(regs.is_flag_set(CARRY));
        assert!(!regs.is_flag_set(ZERO));
    }

    #[test]
    fn shifts_move_edge_bits_through_carry() {
        let mut regs = Registers::new();
        assert_eq!(asl(&mut regs, 0x81), 0x02);
        assert!(regs.is_flag_set(CARRY));
        assert_eq!(lsr(&mut regs, 0x01), 0x00);
        assert!(regs.is_flag_set(CARRY));
        assert!(regs.is_flag_set(ZERO));
        // ROL pulls the carry just set by LSR into bit 0.
        assert_eq!(rol(&mut regs, 0x40), 0x81);
        assert!(!regs.is_flag_set(CARRY));
        // ROR with clear carry: plain shift right.
        assert_eq!(ror(&mut regs, 0x02), 0x01);
        assert!(!regs.is_flag_set(CARRY));
        // ROR with carry set pulls it into bit 7.
        regs.set_flag_bit(CARRY);
        assert_eq!(ror(&mut regs, 0x00), 0x80);
    }

    #[test]
    fn bit_copies_high_bits_into_flags() {
        let mut regs = Registers::new();
        regs.a = 0x01;
        bit(&mut regs, 0xC0);
        assert!(regs.is_flag_set(ZERO));
        assert!(regs.is_flag_set(NEGATIVE));
        assert!(regs.is_flag_set(OVERFLOW));
        bit(&mut regs, 0x01);
        assert!(!regs.is_flag_set(ZERO));
        assert!(!regs.is_flag_set(NEGATIVE));
        assert!(!regs.is_flag_set(OVERFLOW));
    }

    #[test]
    fn stack_push_pop_round_trip() {
        let mut regs = Registers::new();
        let mut mem = Memory::new();
        push(&mut regs, &mut mem, 0xAB).unwrap();
        assert_eq!(regs.sp, 0xFC);
        assert_eq!(mem.read(0x01FD).unwrap(), 0xAB);
        assert_eq!(pop(&mut regs, &mem).unwrap(), 0xAB);
        assert_eq!(regs.sp, 0xFD);

        push_word(&mut regs, &mut mem, 0xC0DE).unwrap();
        assert_eq!(pop_word(&mut regs, &mem).unwrap(), 0xC0DE);
    }

    #[test]
    fn stack_pointer_wraps_within_page() {
        let mut regs = Registers::new();
        let mut mem = Memory::new();
        regs.sp = 0x00;
        push(&mut regs, &mut mem, 0x11).unwrap();
        assert_eq!(regs.sp, 0xFF);
        assert_eq!(mem.read(0x0100).unwrap(), 0x11);
        assert_eq!(pop(&mut regs, &mem).unwrap(), 0x11);
        assert_eq!(regs.sp, 0x00);
    }

    #[test]
    fn status_push_and_restore() {
        let mut regs = Registers::new();
        let mut mem = Memory::new();
        push_status(&mut regs, &mut mem, true).unwrap();
        let pushed = mem.read(0x01FD).unwrap();
        assert_eq!(pushed, 0x24 | BREAK); // 0x34
        restore_status(&mut regs, 0xFF);
        assert_eq!(regs.status & BREAK, 0);
        assert_ne!(regs.status & UNUSED, 0);
    }

    #[test]
    fn branch_cycle_accounting() {
        let mut regs = Registers::new();
        regs.pc = 0x0202;
        assert_eq!(branch(&mut regs, 0x0210, false, false), 0);
        assert_eq!(regs.pc, 0x0202);
        assert_eq!(branch(&mut regs, 0x0210, true, false), 1);
        assert_eq!(regs.pc, 0x0210);
        assert_eq!(branch(&mut regs, 0x0302, true, true), 2);
        assert_eq!(regs.pc, 0x0302);
    }

    #[test]
    fn rmw_writes_back_and_returns_result() {
        let mut regs = Registers::new();
        let mut mem = Memory::new();
        mem.write(0x0040, 0x41).unwrap();
        let r = rmw(&mut regs, &mut mem, Operand::Address(0x0040), asl).unwrap();
        assert_eq!(r, 0x82);
        assert_eq!(mem.read(0x0040).unwrap(), 0x82);

        regs.a = 0x80;
        let r = rmw(&mut regs, &mut mem, Operand::Accumulator, lsr).unwrap();
        assert_eq!(r, 0x40);
        assert_eq!(regs.a, 0x40);
    }
}
