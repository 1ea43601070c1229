/*!
addressing.rs - Operand fetch and effective-address resolution.

Overview
========
Provides canonical helpers for:
- Instruction stream byte/word fetch (advancing PC with 16-bit wrap)
- Effective address calculation for all 13 addressing modes
- Page-cross reporting so dispatch can apply +1 cycle penalties
- The two 6502 pointer quirks: zero-page pointer reads wrap within page
  zero, and JMP (indirect) never carries its high-byte fetch into the
  next page

Caller Assumptions
==================
- `resolve` is called with PC pointing at the first operand byte (the
  opcode has already been consumed); it leaves PC past the operand.
- Callers advance PC exclusively via these helpers and via the branch /
  jump handlers in dispatch.

Scope
=====
Pure address resolution. No cycle accounting beyond reporting the
page-cross bit, no flag effects, no memory writes.
*/

use crate::cpu::table::AddressingMode;
use crate::error::Result;
use crate::memory::Memory;
use crate::registers::Registers;

/// A resolved operand location.
///
/// `Immediate` operands resolve to `Address` (the PC byte they were
/// fetched from has a perfectly good address), so dispatch reads every
/// memory operand the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implied instructions: no operand at all.
    None,
    /// The A register (shift/rotate accumulator forms).
    Accumulator,
    /// A memory location.
    Address(u16),
}

impl Operand {
    /// Read the operand's current value. `None` reads as 0, which no
    /// handler consults (implied instructions take no operand); the
    /// table-consistency tests keep that pairing honest.
    pub fn value(self, regs: &Registers, mem: &Memory) -> Result<u8> {
        match self {
            Operand::None => Ok(0),
            Operand::Accumulator => Ok(regs.a),
            Operand::Address(addr) => mem.read(addr),
        }
    }

    /// The memory address of this operand, 0 for the non-memory
    /// variants. Only store/RMW handlers call this, and their table
    /// entries always use memory modes.
    pub fn address(self) -> u16 {
        match self {
            Operand::Address(addr) => addr,
            Operand::None | Operand::Accumulator => 0,
        }
    }
}

/// Fetch the next instruction-stream byte, advancing PC.
#[inline]
pub(crate) fn fetch_byte(regs: &mut Registers, mem: &Memory) -> Result<u8> {
    let v = mem.read(regs.pc)?;
    regs.advance_pc(1);
    Ok(v)
}

/// Fetch the next little-endian word (low, then high), advancing PC twice.
#[inline]
pub(crate) fn fetch_word(regs: &mut Registers, mem: &Memory) -> Result<u16> {
    let lo = fetch_byte(regs, mem)? as u16;
    let hi = fetch_byte(regs, mem)? as u16;
    Ok((hi << 8) | lo)
}

/// Read a 16-bit pointer from page zero. The high byte wraps within the
/// page: a pointer at 0xFF reads its high byte from 0x00.
#[inline]
pub(crate) fn read_word_zp(mem: &Memory, base: u8) -> Result<u16> {
    let lo = mem.read(base as u16)? as u16;
    let hi = mem.read(base.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}

/// Resolve `mode` against the instruction stream at PC.
///
/// Returns the operand location and whether indexed address formation
/// crossed a page boundary (the conditional-cycle input). For Relative
/// mode the operand is the branch target and `crossed` compares the
/// target against the PC after the offset byte.
pub(crate) fn resolve(
    regs: &mut Registers,
    mem: &Memory,
    mode: AddressingMode,
) -> Result<(Operand, bool)> {
    let resolved = match mode {
        AddressingMode::Implied => (Operand::None, false),
        AddressingMode::Accumulator => (Operand::Accumulator, false),
        AddressingMode::Immediate => {
            let addr = regs.pc;
            regs.advance_pc(1);
            (Operand::Address(addr), false)
        }
        AddressingMode::ZeroPage => {
            let zp = fetch_byte(regs, mem)?;
            (Operand::Address(zp as u16), false)
        }
        AddressingMode::ZeroPageX => {
            let zp = fetch_byte(regs, mem)?.wrapping_add(regs.x);
            (Operand::Address(zp as u16), false)
        }
        AddressingMode::ZeroPageY => {
            let zp = fetch_byte(regs, mem)?.wrapping_add(regs.y);
            (Operand::Address(zp as u16), false)
        }
        AddressingMode::Absolute => {
            let addr = fetch_word(regs, mem)?;
            (Operand::Address(addr), false)
        }
        AddressingMode::AbsoluteX => {
            let base = fetch_word(regs, mem)?;
            let addr = base.wrapping_add(regs.x as u16);
            (Operand::Address(addr), !Memory::same_page(base, addr))
        }
        AddressingMode::AbsoluteY => {
            let base = fetch_word(regs, mem)?;
            let addr = base.wrapping_add(regs.y as u16);
            (Operand::Address(addr), !Memory::same_page(base, addr))
        }
        AddressingMode::Relative => {
            let offset = fetch_byte(regs, mem)? as i8;
            let target = regs.pc.wrapping_add_signed(offset as i16);
            (Operand::Address(target), !Memory::same_page(regs.pc, target))
        }
        AddressingMode::IndexedIndirect => {
            let zp = fetch_byte(regs, mem)?.wrapping_add(regs.x);
            let addr = read_word_zp(mem, zp)?;
            (Operand::Address(addr), false)
        }
        AddressingMode::IndirectIndexed => {
            let zp = fetch_byte(regs, mem)?;
            let base = read_word_zp(mem, zp)?;
            let addr = base.wrapping_add(regs.y as u16);
            (Operand::Address(addr), !Memory::same_page(base, addr))
        }
        AddressingMode::Indirect => {
            let ptr = fetch_word(regs, mem)?;
            (Operand::Address(mem.read16_bug(ptr)?), false)
        }
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(program: &[u8]) -> (Registers, Memory) {
        let mut regs = Registers::new();
        let mut mem = Memory::new();
        regs.pc = 0x0200;
        mem.load(program, 0x0200);
        (regs, mem)
    }

    #[test]
    fn immediate_points_at_operand_byte() {
        let (mut regs, mem) = setup(&[0x42]);
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::Immediate).unwrap();
        assert_eq!(operand, Operand::Address(0x0200));
        assert!(!crossed);
        assert_eq!(operand.value(&regs, &mem).unwrap(), 0x42);
        assert_eq!(regs.pc, 0x0201);
    }

    #[test]
    fn zero_page_indexed_wraps_in_page_zero() {
        let (mut regs, mem) = setup(&[0xFF]);
        regs.x = 0x02;
        let (operand, _) = resolve(&mut regs, &mem, AddressingMode::ZeroPageX).unwrap();
        // 0xFF + 0x02 wraps to 0x01, never 0x0101.
        assert_eq!(operand, Operand::Address(0x0001));
    }

    #[test]
    fn absolute_indexed_reports_page_cross() {
        let (mut regs, mem) = setup(&[0xF0, 0x02, 0xF0, 0x02]);
        regs.y = 0x05;
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::AbsoluteY).unwrap();
        assert_eq!(operand, Operand::Address(0x02F5));
        assert!(!crossed);
        regs.y = 0x20;
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::AbsoluteY).unwrap();
        assert_eq!(operand, Operand::Address(0x0310));
        assert!(crossed);
    }

    #[test]
    fn indexed_indirect_reads_pointer_from_page_zero() {
        let (mut regs, mut mem) = setup(&[0x20]);
        regs.x = 0x04;
        mem.write(0x0024, 0x74).unwrap();
        mem.write(0x0025, 0x20).unwrap();
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::IndexedIndirect).unwrap();
        assert_eq!(operand, Operand::Address(0x2074));
        assert!(!crossed);
    }

    #[test]
    fn indirect_indexed_adds_y_after_pointer_read() {
        let (mut regs, mut mem) = setup(&[0x86]);
        regs.y = 0x10;
        mem.write(0x0086, 0x28).unwrap();
        mem.write(0x0087, 0x40).unwrap();
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::IndirectIndexed).unwrap();
        assert_eq!(operand, Operand::Address(0x4038));
        assert!(!crossed);
    }

    #[test]
    fn zero_page_pointer_high_byte_wraps() {
        let (mut regs, mut mem) = setup(&[0xFF]);
        mem.write(0x00FF, 0x46).unwrap();
        mem.write(0x0000, 0x01).unwrap();
        mem.write(0x0100, 0x99).unwrap();
        let (operand, _) = resolve(&mut regs, &mem, AddressingMode::IndirectIndexed).unwrap();
        assert_eq!(operand, Operand::Address(0x0146));
    }

    #[test]
    fn relative_target_is_signed_from_next_instruction() {
        // Forward branch: PC after operand is 0x0201, +0x10 = 0x0211.
        let (mut regs, mem) = setup(&[0x10]);
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::Relative).unwrap();
        assert_eq!(operand, Operand::Address(0x0211));
        assert!(!crossed);
        // Backward branch across a page: 0xFB is -5.
        let (mut regs, mem) = setup(&[0xFB]);
        regs.pc = 0x0300;
        let mut mem = mem;
        mem.write(0x0300, 0xFB).unwrap();
        let (operand, crossed) = resolve(&mut regs, &mem, AddressingMode::Relative).unwrap();
        assert_eq!(operand, Operand::Address(0x02FC));
        assert!(crossed);
    }

    #[test]
    fn indirect_jmp_reproduces_page_wrap_bug() {
        let (mut regs, mut mem) = setup(&[0xFF, 0x03]);
        mem.write(0x03FF, 0x40).unwrap();
        mem.write(0x0300, 0x51).unwrap(); // high byte from page start
        mem.write(0x0400, 0x99).unwrap(); // would be the high byte without the bug
        let (operand, _) = resolve(&mut regs, &mem, AddressingMode::Indirect).unwrap();
        assert_eq!(operand, Operand::Address(0x5140));
    }
}
