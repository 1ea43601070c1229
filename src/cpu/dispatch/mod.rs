/*!
dispatch/mod.rs - Per-instruction execution (mnemonic -> semantic helpers).

Overview
========
`execute_instruction` runs exactly one already-decoded instruction:
1. Resolve the operand for the instruction's addressing mode (this
   consumes the operand bytes and reports page crossing).
2. Start from the table's cycle count, with the conditional page-cross
   penalty already folded in.
3. Route the mnemonic to the semantic helpers in `execute`; branches add
   their taken/page penalties here.

Callers (the `Cpu` engine) own opcode fetch and table lookup, so an
unmapped opcode is rejected before any register or memory mutation.

Unofficial composites reuse the official helpers: DCP is DEC-then-CMP,
ISB is INC-then-SBC, SLO/RLA/SRE/RRA are a memory shift feeding the
corresponding accumulator logic, ALR is AND-then-LSR A. LAX loads A and
X together; SAX stores A & X without touching flags.
*/

use crate::cpu::addressing::{Operand, resolve};
use crate::cpu::execute::{
    adc, and, asl, bit, branch, cmp_with, dec_val, eor, inc_val, lda, ldx, ldy, lsr, ora, pop,
    pop_word, push, push_status, push_word, restore_status, rmw, rol, ror, sbc,
};
use crate::cpu::IRQ_VECTOR;
use crate::cpu::table::{Instruction, Mnemonic};
use crate::error::Result;
use crate::memory::Memory;
use crate::registers::{
    CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, Registers, ZERO,
};

/// Execute one decoded instruction. PC must point at the first operand
/// byte. Returns the cycles consumed, including conditional penalties.
pub(crate) fn execute_instruction(
    regs: &mut Registers,
    mem: &mut Memory,
    instr: &Instruction,
) -> Result<u32> {
    let (operand, crossed) = resolve(regs, mem, instr.mode)?;
    let mut cycles = instr.cycles(crossed);

    match instr.mnemonic {
        // Loads / stores
        Mnemonic::Lda => {
            let v = operand.value(regs, mem)?;
            lda(regs, v);
        }
        Mnemonic::Ldx => {
            let v = operand.value(regs, mem)?;
            ldx(regs, v);
        }
        Mnemonic::Ldy => {
            let v = operand.value(regs, mem)?;
            ldy(regs, v);
        }
        Mnemonic::Sta => mem.write(operand.address(), regs.a)?,
        Mnemonic::Stx => mem.write(operand.address(), regs.x)?,
        Mnemonic::Sty => mem.write(operand.address(), regs.y)?,

        // Transfers
        Mnemonic::Tax => {
            regs.x = regs.a;
            regs.update_zn(regs.x);
        }
        Mnemonic::Tay => {
            regs.y = regs.a;
            regs.update_zn(regs.y);
        }
        Mnemonic::Txa => {
            regs.a = regs.x;
            regs.update_zn(regs.a);
        }
        Mnemonic::Tya => {
            regs.a = regs.y;
            regs.update_zn(regs.a);
        }
        Mnemonic::Tsx => {
            regs.x = regs.sp;
            regs.update_zn(regs.x);
        }
        // TXS is the one transfer that leaves flags alone.
        Mnemonic::Txs => regs.sp = regs.x,

        // Logic
        Mnemonic::And => {
            let v = operand.value(regs, mem)?;
            and(regs, v);
        }
        Mnemonic::Ora => {
            let v = operand.value(regs, mem)?;
            ora(regs, v);
        }
        Mnemonic::Eor => {
            let v = operand.value(regs, mem)?;
            eor(regs, v);
        }
        Mnemonic::Bit => {
            let v = operand.value(regs, mem)?;
            bit(regs, v);
        }

        // Arithmetic
        Mnemonic::Adc => {
            let v = operand.value(regs, mem)?;
            adc(regs, v);
        }
        Mnemonic::Sbc => {
            let v = operand.value(regs, mem)?;
            sbc(regs, v);
        }
        Mnemonic::Cmp => {
            let (a, v) = (regs.a, operand.value(regs, mem)?);
            cmp_with(regs, a, v);
        }
        Mnemonic::Cpx => {
            let (x, v) = (regs.x, operand.value(regs, mem)?);
            cmp_with(regs, x, v);
        }
        Mnemonic::Cpy => {
            let (y, v) = (regs.y, operand.value(regs, mem)?);
            cmp_with(regs, y, v);
        }

        // Shifts / rotates (accumulator or memory via rmw)
        Mnemonic::Asl => {
            rmw(regs, mem, operand, asl)?;
        }
        Mnemonic::Lsr => {
            rmw(regs, mem, operand, lsr)?;
        }
        Mnemonic::Rol => {
            rmw(regs, mem, operand, rol)?;
        }
        Mnemonic::Ror => {
            rmw(regs, mem, operand, ror)?;
        }

        // Increment / decrement
        Mnemonic::Inc => {
            rmw(regs, mem, operand, inc_val)?;
        }
        Mnemonic::Dec => {
            rmw(regs, mem, operand, dec_val)?;
        }
        Mnemonic::Inx => {
            let v = regs.x;
            regs.x = inc_val(regs, v);
        }
        Mnemonic::Iny => {
            let v = regs.y;
            regs.y = inc_val(regs, v);
        }
        Mnemonic::Dex => {
            let v = regs.x;
            regs.x = dec_val(regs, v);
        }
        Mnemonic::Dey => {
            let v = regs.y;
            regs.y = dec_val(regs, v);
        }

        // Jumps / subroutines
        Mnemonic::Jmp => regs.pc = operand.address(),
        Mnemonic::Jsr => {
            // Return address is the last byte of this instruction; RTS
            // adds one back.
            let ret = regs.pc.wrapping_sub(1);
            push_word(regs, mem, ret)?;
            regs.pc = operand.address();
        }
        Mnemonic::Rts => {
            regs.pc = pop_word(regs, mem)?.wrapping_add(1);
        }
        Mnemonic::Rti => {
            let status = pop(regs, mem)?;
            restore_status(regs, status);
            regs.pc = pop_word(regs, mem)?;
        }

        // Branches: taken when the named flag matches the wanted state.
        Mnemonic::Bcc => cycles += branch_flag(regs, operand, crossed, CARRY, false),
        Mnemonic::Bcs => cycles += branch_flag(regs, operand, crossed, CARRY, true),
        Mnemonic::Beq => cycles += branch_flag(regs, operand, crossed, ZERO, true),
        Mnemonic::Bne => cycles += branch_flag(regs, operand, crossed, ZERO, false),
        Mnemonic::Bmi => cycles += branch_flag(regs, operand, crossed, NEGATIVE, true),
        Mnemonic::Bpl => cycles += branch_flag(regs, operand, crossed, NEGATIVE, false),
        Mnemonic::Bvs => cycles += branch_flag(regs, operand, crossed, OVERFLOW, true),
        Mnemonic::Bvc => cycles += branch_flag(regs, operand, crossed, OVERFLOW, false),

        // Stack
        Mnemonic::Pha => {
            let a = regs.a;
            push(regs, mem, a)?;
        }
        Mnemonic::Php => push_status(regs, mem, true)?,
        Mnemonic::Pla => {
            let v = pop(regs, mem)?;
            lda(regs, v);
        }
        Mnemonic::Plp => {
            let v = pop(regs, mem)?;
            restore_status(regs, v);
        }

        // Flag operations
        Mnemonic::Clc => regs.clear_flag_bit(CARRY),
        Mnemonic::Sec => regs.set_flag_bit(CARRY),
        Mnemonic::Cli => regs.clear_flag_bit(IRQ_DISABLE),
        Mnemonic::Sei => regs.set_flag_bit(IRQ_DISABLE),
        Mnemonic::Cld => regs.clear_flag_bit(DECIMAL),
        Mnemonic::Sed => regs.set_flag_bit(DECIMAL),
        Mnemonic::Clv => regs.clear_flag_bit(OVERFLOW),

        // BRK: push the address after the padding byte, push P with
        // BREAK set, mask IRQs, jump through the IRQ/BRK vector.
        Mnemonic::Brk => {
            regs.advance_pc(1);
            let ret = regs.pc;
            push_word(regs, mem, ret)?;
            push_status(regs, mem, true)?;
            regs.set_flag_bit(IRQ_DISABLE);
            regs.pc = mem.read16(IRQ_VECTOR)?;
        }

        Mnemonic::Nop => {}

        // Unofficial composites
        Mnemonic::Lax => {
            let v = operand.value(regs, mem)?;
            regs.a = v;
            regs.x = v;
            regs.update_zn(v);
        }
        Mnemonic::Sax => mem.write(operand.address(), regs.a & regs.x)?,
        Mnemonic::Dcp => {
            let r = rmw(regs, mem, operand, dec_val)?;
            let a = regs.a;
            cmp_with(regs, a, r);
        }
        Mnemonic::Isb => {
            let r = rmw(regs, mem, operand, inc_val)?;
            sbc(regs, r);
        }
        Mnemonic::Slo => {
            let r = rmw(regs, mem, operand, asl)?;
            ora(regs, r);
        }
        Mnemonic::Rla => {
            let r = rmw(regs, mem, operand, rol)?;
            and(regs, r);
        }
        Mnemonic::Sre => {
            let r = rmw(regs, mem, operand, lsr)?;
            eor(regs, r);
        }
        Mnemonic::Rra => {
            let r = rmw(regs, mem, operand, ror)?;
            adc(regs, r);
        }
        Mnemonic::Alr => {
            let v = operand.value(regs, mem)?;
            and(regs, v);
            let a = regs.a;
            regs.a = lsr(regs, a);
        }
    }

    Ok(cycles)
}

#[inline]
fn branch_flag(regs: &mut Registers, operand: Operand, crossed: bool, mask: u8, wanted: bool) -> u32 {
    let taken = regs.is_flag_set(mask) == wanted;
    branch(regs, operand.address(), taken, crossed)
}
