/*!
table.rs - Static instruction metadata table (opcode -> Instruction).

Overview
========
Maps every supported opcode byte to an immutable `Instruction` record:
mnemonic, addressing mode, encoded length in bytes, base cycle count, and
whether the instruction pays a +1 cycle penalty when its indexed
addressing crosses a page boundary.

Coverage is the full documented 6502 set plus the unofficial opcodes
commonly emitted by real cartridges: the extra NOP encodings, LAX, SAX,
DCP, ISB, SLO, RLA, SRE, RRA, ALR, and the 0xEB SBC alias. Unofficial
entries carry the `unofficial` flag and display with a `*` prefix
(nestest log convention); dispatch treats them like any other entry.

Opcodes with no entry are genuinely unmapped; executing one is an
`InvalidOpcode` error, not a silent NOP.

Cycle accounting
================
`Instruction::cycles(page_crossed)` returns base cycles plus the
conditional page-cross penalty. Branch penalties (+1 taken, +1 more when
the target is on another page) are applied by the branch handler, so
Relative entries never set `page_penalty`.
*/

use std::fmt;

/// The 13 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    /// `(zp,X)` - pointer fetched from (operand + X) in page zero.
    IndexedIndirect,
    /// `(zp),Y` - pointer fetched from operand in page zero, then + Y.
    IndirectIndexed,
    /// JMP (addr) only; pointer read reproduces the page-wrap bug.
    Indirect,
}

impl AddressingMode {
    /// Instruction length in bytes (opcode + operand bytes) implied by
    /// the mode. Kept alongside the explicit per-entry lengths so table
    /// consistency is testable.
    pub fn encoded_length(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }
}

/// Instruction mnemonics. Unofficial composites get their own variants;
/// unofficial forms of NOP and SBC reuse the official variant and are
/// distinguished by `Instruction::unofficial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    // Unofficial
    Lax, Sax, Dcp, Isb, Slo, Rla, Sre, Rra, Alr,
}

impl Mnemonic {
    #[rustfmt::skip]
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC", Mnemonic::And => "AND", Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC", Mnemonic::Bcs => "BCS", Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT", Mnemonic::Bmi => "BMI", Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL", Mnemonic::Brk => "BRK", Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS", Mnemonic::Clc => "CLC", Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI", Mnemonic::Clv => "CLV", Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX", Mnemonic::Cpy => "CPY", Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX", Mnemonic::Dey => "DEY", Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC", Mnemonic::Inx => "INX", Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP", Mnemonic::Jsr => "JSR", Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX", Mnemonic::Ldy => "LDY", Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP", Mnemonic::Ora => "ORA", Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP", Mnemonic::Pla => "PLA", Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL", Mnemonic::Ror => "ROR", Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS", Mnemonic::Sbc => "SBC", Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED", Mnemonic::Sei => "SEI", Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX", Mnemonic::Sty => "STY", Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY", Mnemonic::Tsx => "TSX", Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS", Mnemonic::Tya => "TYA", Mnemonic::Lax => "LAX",
            Mnemonic::Sax => "SAX", Mnemonic::Dcp => "DCP", Mnemonic::Isb => "ISB",
            Mnemonic::Slo => "SLO", Mnemonic::Rla => "RLA", Mnemonic::Sre => "SRE",
            Mnemonic::Rra => "RRA", Mnemonic::Alr => "ALR",
        }
    }
}

/// Immutable per-opcode metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub opcode: u8,
    pub mode: AddressingMode,
    /// Encoded length in bytes (1-3), including the opcode byte.
    pub length: u8,
    pub base_cycles: u32,
    /// +1 cycle when the indexed effective address crosses a page.
    pub page_penalty: bool,
    pub unofficial: bool,
}

impl Instruction {
    /// Total cycle count for one execution of this instruction, given
    /// whether addressing crossed a page boundary. Branch penalties are
    /// added separately by the branch handler.
    #[inline]
    pub fn cycles(&self, page_crossed: bool) -> u32 {
        self.base_cycles + u32::from(self.page_penalty && page_crossed)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unofficial {
            write!(f, "*{}", self.mnemonic.as_str())
        } else {
            f.write_str(self.mnemonic.as_str())
        }
    }
}

/// Look up the instruction for an opcode byte, if one is mapped.
#[inline]
pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    TABLE[opcode as usize].as_ref()
}

// Entry constructors for the const table below.
const fn op(
    mnemonic: Mnemonic,
    opcode: u8,
    mode: AddressingMode,
    length: u8,
    base_cycles: u32,
) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        opcode,
        mode,
        length,
        base_cycles,
        page_penalty: false,
        unofficial: false,
    })
}

// Official entry that pays the page-cross penalty (indexed reads).
const fn op_pc(
    mnemonic: Mnemonic,
    opcode: u8,
    mode: AddressingMode,
    length: u8,
    base_cycles: u32,
) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        opcode,
        mode,
        length,
        base_cycles,
        page_penalty: true,
        unofficial: false,
    })
}

const fn ill(
    mnemonic: Mnemonic,
    opcode: u8,
    mode: AddressingMode,
    length: u8,
    base_cycles: u32,
) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        opcode,
        mode,
        length,
        base_cycles,
        page_penalty: false,
        unofficial: true,
    })
}

const fn ill_pc(
    mnemonic: Mnemonic,
    opcode: u8,
    mode: AddressingMode,
    length: u8,
    base_cycles: u32,
) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        opcode,
        mode,
        length,
        base_cycles,
        page_penalty: true,
        unofficial: true,
    })
}

static TABLE: [Option<Instruction>; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;
    let mut t: [Option<Instruction>; 256] = [None; 256];

    // ADC
    t[0x69] = op(Adc, 0x69, Immediate, 2, 2);
    t[0x65] = op(Adc, 0x65, ZeroPage, 2, 3);
    t[0x75] = op(Adc, 0x75, ZeroPageX, 2, 4);
    t[0x6D] = op(Adc, 0x6D, Absolute, 3, 4);
    t[0x7D] = op_pc(Adc, 0x7D, AbsoluteX, 3, 4);
    t[0x79] = op_pc(Adc, 0x79, AbsoluteY, 3, 4);
    t[0x61] = op(Adc, 0x61, IndexedIndirect, 2, 6);
    t[0x71] = op_pc(Adc, 0x71, IndirectIndexed, 2, 5);

    // AND
    t[0x29] = op(And, 0x29, Immediate, 2, 2);
    t[0x25] = op(And, 0x25, ZeroPage, 2, 3);
    t[0x35] = op(And, 0x35, ZeroPageX, 2, 4);
    t[0x2D] = op(And, 0x2D, Absolute, 3, 4);
    t[0x3D] = op_pc(And, 0x3D, AbsoluteX, 3, 4);
    t[0x39] = op_pc(And, 0x39, AbsoluteY, 3, 4);
    t[0x21] = op(And, 0x21, IndexedIndirect, 2, 6);
    t[0x31] = op_pc(And, 0x31, IndirectIndexed, 2, 5);

    // ASL
    t[0x0A] = op(Asl, 0x0A, Accumulator, 1, 2);
    t[0x06] = op(Asl, 0x06, ZeroPage, 2, 5);
    t[0x16] = op(Asl, 0x16, ZeroPageX, 2, 6);
    t[0x0E] = op(Asl, 0x0E, Absolute, 3, 6);
    t[0x1E] = op(Asl, 0x1E, AbsoluteX, 3, 7);

    // Branches
    t[0x90] = op(Bcc, 0x90, Relative, 2, 2);
    t[0xB0] = op(Bcs, 0xB0, Relative, 2, 2);
    t[0xF0] = op(Beq, 0xF0, Relative, 2, 2);
    t[0x30] = op(Bmi, 0x30, Relative, 2, 2);
    t[0xD0] = op(Bne, 0xD0, Relative, 2, 2);
    t[0x10] = op(Bpl, 0x10, Relative, 2, 2);
    t[0x50] = op(Bvc, 0x50, Relative, 2, 2);
    t[0x70] = op(Bvs, 0x70, Relative, 2, 2);

    // BIT
    t[0x24] = op(Bit, 0x24, ZeroPage, 2, 3);
    t[0x2C] = op(Bit, 0x2C, Absolute, 3, 4);

    // BRK
    t[0x00] = op(Brk, 0x00, Implied, 1, 7);

    // Flag operations
    t[0x18] = op(Clc, 0x18, Implied, 1, 2);
    t[0xD8] = op(Cld, 0xD8, Implied, 1, 2);
    t[0x58] = op(Cli, 0x58, Implied, 1, 2);
    t[0xB8] = op(Clv, 0xB8, Implied, 1, 2);
    t[0x38] = op(Sec, 0x38, Implied, 1, 2);
    t[0xF8] = op(Sed, 0xF8, Implied, 1, 2);
    t[0x78] = op(Sei, 0x78, Implied, 1, 2);

    // CMP / CPX / CPY
    t[0xC9] = op(Cmp, 0xC9, Immediate, 2, 2);
    t[0xC5] = op(Cmp, 0xC5, ZeroPage, 2, 3);
    t[0xD5] = op(Cmp, 0xD5, ZeroPageX, 2, 4);
    t[0xCD] = op(Cmp, 0xCD, Absolute, 3, 4);
    t[0xDD] = op_pc(Cmp, 0xDD, AbsoluteX, 3, 4);
    t[0xD9] = op_pc(Cmp, 0xD9, AbsoluteY, 3, 4);
    t[0xC1] = op(Cmp, 0xC1, IndexedIndirect, 2, 6);
    t[0xD1] = op_pc(Cmp, 0xD1, IndirectIndexed, 2, 5);
    t[0xE0] = op(Cpx, 0xE0, Immediate, 2, 2);
    t[0xE4] = op(Cpx, 0xE4, ZeroPage, 2, 3);
    t[0xEC] = op(Cpx, 0xEC, Absolute, 3, 4);
    t[0xC0] = op(Cpy, 0xC0, Immediate, 2, 2);
    t[0xC4] = op(Cpy, 0xC4, ZeroPage, 2, 3);
    t[0xCC] = op(Cpy, 0xCC, Absolute, 3, 4);

    // DEC / DEX / DEY
    t[0xC6] = op(Dec, 0xC6, ZeroPage, 2, 5);
    t[0xD6] = op(Dec, 0xD6, ZeroPageX, 2, 6);
    t[0xCE] = op(Dec, 0xCE, Absolute, 3, 6);
    t[0xDE] = op(Dec, 0xDE, AbsoluteX, 3, 7);
    t[0xCA] = op(Dex, 0xCA, Implied, 1, 2);
    t[0x88] = op(Dey, 0x88, Implied, 1, 2);

    // EOR
    t[0x49] = op(Eor, 0x49, Immediate, 2, 2);
    t[0x45] = op(Eor, 0x45, ZeroPage, 2, 3);
    t[0x55] = op(Eor, 0x55, ZeroPageX, 2, 4);
    t[0x4D] = op(Eor, 0x4D, Absolute, 3, 4);
    t[0x5D] = op_pc(Eor, 0x5D, AbsoluteX, 3, 4);
    t[0x59] = op_pc(Eor, 0x59, AbsoluteY, 3, 4);
    t[0x41] = op(Eor, 0x41, IndexedIndirect, 2, 6);
    t[0x51] = op_pc(Eor, 0x51, IndirectIndexed, 2, 5);

    // INC / INX / INY
    t[0xE6] = op(Inc, 0xE6, ZeroPage, 2, 5);
    t[0xF6] = op(Inc, 0xF6, ZeroPageX, 2, 6);
    t[0xEE] = op(Inc, 0xEE, Absolute, 3, 6);
    t[0xFE] = op(Inc, 0xFE, AbsoluteX, 3, 7);
    t[0xE8] = op(Inx, 0xE8, Implied, 1, 2);
    t[0xC8] = op(Iny, 0xC8, Implied, 1, 2);

    // JMP / JSR
    t[0x4C] = op(Jmp, 0x4C, Absolute, 3, 3);
    t[0x6C] = op(Jmp, 0x6C, Indirect, 3, 5);
    t[0x20] = op(Jsr, 0x20, Absolute, 3, 6);

    // LDA
    t[0xA9] = op(Lda, 0xA9, Immediate, 2, 2);
    t[0xA5] = op(Lda, 0xA5, ZeroPage, 2, 3);
    t[0xB5] = op(Lda, 0xB5, ZeroPageX, 2, 4);
    t[0xAD] = op(Lda, 0xAD, Absolute, 3, 4);
    t[0xBD] = op_pc(Lda, 0xBD, AbsoluteX, 3, 4);
    t[0xB9] = op_pc(Lda, 0xB9, AbsoluteY, 3, 4);
    t[0xA1] = op(Lda, 0xA1, IndexedIndirect, 2, 6);
    t[0xB1] = op_pc(Lda, 0xB1, IndirectIndexed, 2, 5);

    // LDX / LDY
    t[0xA2] = op(Ldx, 0xA2, Immediate, 2, 2);
    t[0xA6] = op(Ldx, 0xA6, ZeroPage, 2, 3);
    t[0xB6] = op(Ldx, 0xB6, ZeroPageY, 2, 4);
    t[0xAE] = op(Ldx, 0xAE, Absolute, 3, 4);
    t[0xBE] = op_pc(Ldx, 0xBE, AbsoluteY, 3, 4);
    t[0xA0] = op(Ldy, 0xA0, Immediate, 2, 2);
    t[0xA4] = op(Ldy, 0xA4, ZeroPage, 2, 3);
    t[0xB4] = op(Ldy, 0xB4, ZeroPageX, 2, 4);
    t[0xAC] = op(Ldy, 0xAC, Absolute, 3, 4);
    t[0xBC] = op_pc(Ldy, 0xBC, AbsoluteX, 3, 4);

    // LSR
    t[0x4A] = op(Lsr, 0x4A, Accumulator, 1, 2);
    t[0x46] = op(Lsr, 0x46, ZeroPage, 2, 5);
    t[0x56] = op(Lsr, 0x56, ZeroPageX, 2, 6);
    t[0x4E] = op(Lsr, 0x4E, Absolute, 3, 6);
    t[0x5E] = op(Lsr, 0x5E, AbsoluteX, 3, 7);

    // NOP
    t[0xEA] = op(Nop, 0xEA, Implied, 1, 2);

    // ORA
    t[0x09] = op(Ora, 0x09, Immediate, 2, 2);
    t[0x05] = op(Ora, 0x05, ZeroPage, 2, 3);
    t[0x15] = op(Ora, 0x15, ZeroPageX, 2, 4);
    t[0x0D] = op(Ora, 0x0D, Absolute, 3, 4);
    t[0x1D] = op_pc(Ora, 0x1D, AbsoluteX, 3, 4);
    t[0x19] = op_pc(Ora, 0x19, AbsoluteY, 3, 4);
    t[0x01] = op(Ora, 0x01, IndexedIndirect, 2, 6);
    t[0x11] = op_pc(Ora, 0x11, IndirectIndexed, 2, 5);

    // Stack
    t[0x48] = op(Pha, 0x48, Implied, 1, 3);
    t[0x08] = op(Php, 0x08, Implied, 1, 3);
    t[0x68] = op(Pla, 0x68, Implied, 1, 4);
    t[0x28] = op(Plp, 0x28, Implied, 1, 4);

    // ROL / ROR
    t[0x2A] = op(Rol, 0x2A, Accumulator, 1, 2);
    t[0x26] = op(Rol, 0x26, ZeroPage, 2, 5);
    t[0x36] = op(Rol, 0x36, ZeroPageX, 2, 6);
    t[0x2E] = op(Rol, 0x2E, Absolute, 3, 6);
    t[0x3E] = op(Rol, 0x3E, AbsoluteX, 3, 7);
    t[0x6A] = op(Ror, 0x6A, Accumulator, 1, 2);
    t[0x66] = op(Ror, 0x66, ZeroPage, 2, 5);
    t[0x76] = op(Ror, 0x76, ZeroPageX, 2, 6);
    t[0x6E] = op(Ror, 0x6E, Absolute, 3, 6);
    t[0x7E] = op(Ror, 0x7E, AbsoluteX, 3, 7);

    // RTI / RTS
    t[0x40] = op(Rti, 0x40, Implied, 1, 6);
    t[0x60] = op(Rts, 0x60, Implied, 1, 6);

    // SBC
    t[0xE9] = op(Sbc, 0xE9, Immediate, 2, 2);
    t[0xE5] = op(Sbc, 0xE5, ZeroPage, 2, 3);
    t[0xF5] = op(Sbc, 0xF5, ZeroPageX, 2, 4);
    t[0xED] = op(Sbc, 0xED, Absolute, 3, 4);
    t[0xFD] = op_pc(Sbc, 0xFD, AbsoluteX, 3, 4);
    t[0xF9] = op_pc(Sbc, 0xF9, AbsoluteY, 3, 4);
    t[0xE1] = op(Sbc, 0xE1, IndexedIndirect, 2, 6);
    t[0xF1] = op_pc(Sbc, 0xF1, IndirectIndexed, 2, 5);

    // STA / STX / STY (stores never pay the page penalty)
    t[0x85] = op(Sta, 0x85, ZeroPage, 2, 3);
    t[0x95] = op(Sta, 0x95, ZeroPageX, 2, 4);
    t[0x8D] = op(Sta, 0x8D, Absolute, 3, 4);
    t[0x9D] = op(Sta, 0x9D, AbsoluteX, 3, 5);
    t[0x99] = op(Sta, 0x99, AbsoluteY, 3, 5);
    t[0x81] = op(Sta, 0x81, IndexedIndirect, 2, 6);
    t[0x91] = op(Sta, 0x91, IndirectIndexed, 2, 6);
    t[0x86] = op(Stx, 0x86, ZeroPage, 2, 3);
    t[0x96] = op(Stx, 0x96, ZeroPageY, 2, 4);
    t[0x8E] = op(Stx, 0x8E, Absolute, 3, 4);
    t[0x84] = op(Sty, 0x84, ZeroPage, 2, 3);
    t[0x94] = op(Sty, 0x94, ZeroPageX, 2, 4);
    t[0x8C] = op(Sty, 0x8C, Absolute, 3, 4);

    // Transfers
    t[0xAA] = op(Tax, 0xAA, Implied, 1, 2);
    t[0xA8] = op(Tay, 0xA8, Implied, 1, 2);
    t[0xBA] = op(Tsx, 0xBA, Implied, 1, 2);
    t[0x8A] = op(Txa, 0x8A, Implied, 1, 2);
    t[0x9A] = op(Txs, 0x9A, Implied, 1, 2);
    t[0x98] = op(Tya, 0x98, Implied, 1, 2);

    // ------------------------------------------------------------------
    // Unofficial opcodes
    // ------------------------------------------------------------------

    // NOP variants (implied, immediate, zero page, absolute)
    t[0x1A] = ill(Nop, 0x1A, Implied, 1, 2);
    t[0x3A] = ill(Nop, 0x3A, Implied, 1, 2);
    t[0x5A] = ill(Nop, 0x5A, Implied, 1, 2);
    t[0x7A] = ill(Nop, 0x7A, Implied, 1, 2);
    t[0xDA] = ill(Nop, 0xDA, Implied, 1, 2);
    t[0xFA] = ill(Nop, 0xFA, Implied, 1, 2);
    t[0x80] = ill(Nop, 0x80, Immediate, 2, 2);
    t[0x82] = ill(Nop, 0x82, Immediate, 2, 2);
    t[0x89] = ill(Nop, 0x89, Immediate, 2, 2);
    t[0xC2] = ill(Nop, 0xC2, Immediate, 2, 2);
    t[0xE2] = ill(Nop, 0xE2, Immediate, 2, 2);
    t[0x04] = ill(Nop, 0x04, ZeroPage, 2, 3);
    t[0x44] = ill(Nop, 0x44, ZeroPage, 2, 3);
    t[0x64] = ill(Nop, 0x64, ZeroPage, 2, 3);
    t[0x14] = ill(Nop, 0x14, ZeroPageX, 2, 4);
    t[0x34] = ill(Nop, 0x34, ZeroPageX, 2, 4);
    t[0x54] = ill(Nop, 0x54, ZeroPageX, 2, 4);
    t[0x74] = ill(Nop, 0x74, ZeroPageX, 2, 4);
    t[0xD4] = ill(Nop, 0xD4, ZeroPageX, 2, 4);
    t[0xF4] = ill(Nop, 0xF4, ZeroPageX, 2, 4);
    t[0x0C] = ill(Nop, 0x0C, Absolute, 3, 4);
    t[0x1C] = ill_pc(Nop, 0x1C, AbsoluteX, 3, 4);
    t[0x3C] = ill_pc(Nop, 0x3C, AbsoluteX, 3, 4);
    t[0x5C] = ill_pc(Nop, 0x5C, AbsoluteX, 3, 4);
    t[0x7C] = ill_pc(Nop, 0x7C, AbsoluteX, 3, 4);
    t[0xDC] = ill_pc(Nop, 0xDC, AbsoluteX, 3, 4);
    t[0xFC] = ill_pc(Nop, 0xFC, AbsoluteX, 3, 4);

    // LAX (LDA + LDX)
    t[0xA7] = ill(Lax, 0xA7, ZeroPage, 2, 3);
    t[0xB7] = ill(Lax, 0xB7, ZeroPageY, 2, 4);
    t[0xAF] = ill(Lax, 0xAF, Absolute, 3, 4);
    t[0xBF] = ill_pc(Lax, 0xBF, AbsoluteY, 3, 4);
    t[0xA3] = ill(Lax, 0xA3, IndexedIndirect, 2, 6);
    t[0xB3] = ill_pc(Lax, 0xB3, IndirectIndexed, 2, 5);

    // SAX (store A & X)
    t[0x87] = ill(Sax, 0x87, ZeroPage, 2, 3);
    t[0x97] = ill(Sax, 0x97, ZeroPageY, 2, 4);
    t[0x83] = ill(Sax, 0x83, IndexedIndirect, 2, 6);
    t[0x8F] = ill(Sax, 0x8F, Absolute, 3, 4);

    // SBC alias
    t[0xEB] = ill(Sbc, 0xEB, Immediate, 2, 2);

    // DCP (DEC + CMP)
    t[0xC7] = ill(Dcp, 0xC7, ZeroPage, 2, 5);
    t[0xD7] = ill(Dcp, 0xD7, ZeroPageX, 2, 6);
    t[0xCF] = ill(Dcp, 0xCF, Absolute, 3, 6);
    t[0xDF] = ill(Dcp, 0xDF, AbsoluteX, 3, 7);
    t[0xDB] = ill(Dcp, 0xDB, AbsoluteY, 3, 7);
    t[0xC3] = ill(Dcp, 0xC3, IndexedIndirect, 2, 8);
    t[0xD3] = ill(Dcp, 0xD3, IndirectIndexed, 2, 8);

    // ISB (INC + SBC)
    t[0xE7] = ill(Isb, 0xE7, ZeroPage, 2, 5);
    t[0xF7] = ill(Isb, 0xF7, ZeroPageX, 2, 6);
    t[0xEF] = ill(Isb, 0xEF, Absolute, 3, 6);
    t[0xFF] = ill(Isb, 0xFF, AbsoluteX, 3, 7);
    t[0xFB] = ill(Isb, 0xFB, AbsoluteY, 3, 7);
    t[0xE3] = ill(Isb, 0xE3, IndexedIndirect, 2, 8);
    t[0xF3] = ill(Isb, 0xF3, IndirectIndexed, 2, 8);

    // SLO (ASL + ORA)
    t[0x07] = ill(Slo, 0x07, ZeroPage, 2, 5);
    t[0x17] = ill(Slo, 0x17, ZeroPageX, 2, 6);
    t[0x0F] = ill(Slo, 0x0F, Absolute, 3, 6);
    t[0x1F] = ill(Slo, 0x1F, AbsoluteX, 3, 7);
    t[0x1B] = ill(Slo, 0x1B, AbsoluteY, 3, 7);
    t[0x03] = ill(Slo, 0x03, IndexedIndirect, 2, 8);
    t[0x13] = ill(Slo, 0x13, IndirectIndexed, 2, 8);

    // RLA (ROL + AND)
    t[0x27] = ill(Rla, 0x27, ZeroPage, 2, 5);
    t[0x37] = ill(Rla, 0x37, ZeroPageX, 2, 6);
    t[0x2F] = ill(Rla, 0x2F, Absolute, 3, 6);
    t[0x3F] = ill(Rla, 0x3F, AbsoluteX, 3, 7);
    t[0x3B] = ill(Rla, 0x3B, AbsoluteY, 3, 7);
    t[0x23] = ill(Rla, 0x23, IndexedIndirect, 2, 8);
    t[0x33] = ill(Rla, 0x33, IndirectIndexed, 2, 8);

    // SRE (LSR + EOR)
    t[0x47] = ill(Sre, 0x47, ZeroPage, 2, 5);
    t[0x57] = ill(Sre, 0x57, ZeroPageX, 2, 6);
    t[0x4F] = ill(Sre, 0x4F, Absolute, 3, 6);
    t[0x5F] = ill(Sre, 0x5F, AbsoluteX, 3, 7);
    t[0x5B] = ill(Sre, 0x5B, AbsoluteY, 3, 7);
    t[0x43] = ill(Sre, 0x43, IndexedIndirect, 2, 8);
    t[0x53] = ill(Sre, 0x53, IndirectIndexed, 2, 8);

    // RRA (ROR + ADC)
    t[0x67] = ill(Rra, 0x67, ZeroPage, 2, 5);
    t[0x77] = ill(Rra, 0x77, ZeroPageX, 2, 6);
    t[0x6F] = ill(Rra, 0x6F, Absolute, 3, 6);
    t[0x7F] = ill(Rra, 0x7F, AbsoluteX, 3, 7);
    t[0x7B] = ill(Rra, 0x7B, AbsoluteY, 3, 7);
    t[0x63] = ill(Rra, 0x63, IndexedIndirect, 2, 8);
    t[0x73] = ill(Rra, 0x73, IndirectIndexed, 2, 8);

    // ALR (AND + LSR A)
    t[0x4B] = ill(Alr, 0x4B, Immediate, 2, 2);

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        let adc = lookup(0x6D).unwrap();
        assert_eq!(adc.mnemonic, Mnemonic::Adc);
        assert_eq!(adc.mode, AddressingMode::Absolute);
        assert_eq!(adc.length, 3);
        assert_eq!(adc.base_cycles, 4);
        // 0x02 is a JAM opcode with no stable behavior; left unmapped.
        assert!(lookup(0x02).is_none());
    }

    #[test]
    fn entry_consistency() {
        let mut total = 0;
        let mut unofficial = 0;
        for (idx, entry) in TABLE.iter().enumerate() {
            let Some(instr) = entry else { continue };
            total += 1;
            if instr.unofficial {
                unofficial += 1;
            }
            assert_eq!(instr.opcode as usize, idx, "opcode mismatch at {idx:#04X}");
            assert_eq!(
                instr.length,
                instr.mode.encoded_length(),
                "length mismatch for {instr} {:#04X}",
                instr.opcode
            );
            if instr.page_penalty {
                assert!(
                    matches!(
                        instr.mode,
                        AddressingMode::AbsoluteX
                            | AddressingMode::AbsoluteY
                            | AddressingMode::IndirectIndexed
                    ),
                    "page penalty on non-indexed mode at {:#04X}",
                    instr.opcode
                );
            }
        }
        assert_eq!(total, 232);
        assert_eq!(unofficial, 81);
        assert_eq!(total - unofficial, 151); // full documented set
    }

    #[test]
    fn page_penalty_cycle_accounting() {
        let lda_abs_x = lookup(0xBD).unwrap();
        assert_eq!(lda_abs_x.cycles(false), 4);
        assert_eq!(lda_abs_x.cycles(true), 5);
        // Stores pay a fixed cost instead of a conditional penalty.
        let sta_abs_x = lookup(0x9D).unwrap();
        assert_eq!(sta_abs_x.cycles(true), 5);
    }

    #[test]
    fn unofficial_display_prefix() {
        assert_eq!(lookup(0xA3).unwrap().to_string(), "*LAX");
        assert_eq!(lookup(0xEB).unwrap().to_string(), "*SBC");
        assert_eq!(lookup(0xE9).unwrap().to_string(), "SBC");
    }
}
