/*!
registers.rs - Architectural 6502 register file (A, X, Y, SP, PC, P).

Overview
========
`Registers` is the single owner of all architecturally visible CPU state.
It intentionally excludes memory access, instruction decode, and timing;
those live in the `cpu` modules.

Registers use native fixed-width unsigned types (`u8`/`u16`), so values
can never grow past their architectural width: 8/16-bit wraparound is
expressed with `wrapping_*` arithmetic at the mutation sites instead of
manual masking.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reads as 1)
  B = BREAK (set on BRK/PHP pushes; hardware IRQ/NMI push with B clear)
  D = DECIMAL (bit exists but NES arithmetic ignores it)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

use std::fmt;

/// Processor status flag bit masks (canonical definitions).
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000; // Not used by NES hardware, still part of 6502.
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000; // Always set when read.
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Pure architectural register / flag container for the 6502 CPU.
///
/// Fields are public for inspection by harnesses and collaborators;
/// prefer the helper methods for flag manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl Default for Registers {
    fn default() -> Self {
        let mut regs = Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: 0,
        };
        regs.reset();
        regs
    }
}

impl Registers {
    /// Construct with power-up defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to power-up state: A=X=Y=0, P=0x24 (IRQ disabled, unused bit
    /// set), SP=0xFD, PC at the reset vector address.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.status = IRQ_DISABLE | UNUSED;
        self.sp = 0xFD;
        self.pc = 0xFFFC;
    }

    // ---------------------------------------------------------------------
    // Program Counter helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta`, wrapping at 16 bits (0xFFFF -> 0x0000).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    // ---------------------------------------------------------------------
    // Flag operations
    // ---------------------------------------------------------------------

    /// Return true if any bit of `mask` is set in P.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    /// Set flag bits (OR). Idempotent.
    #[inline]
    pub fn set_flag_bit(&mut self, mask: u8) {
        self.status |= mask;
    }

    /// Clear flag bits (AND NOT). Idempotent.
    #[inline]
    pub fn clear_flag_bit(&mut self, mask: u8) {
        self.status &= !mask;
    }

    /// Assign flag bits from a boolean.
    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.set_flag_bit(mask);
        } else {
            self.clear_flag_bit(mask);
        }
    }

    /// Composite: update ZERO and NEGATIVE from an 8-bit result.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, (result & 0x80) != 0);
    }

    /// Update CARRY from a pre-mask arithmetic result (e.g. the 9-bit sum
    /// of an ADC): carry means the result does not fit in 8 bits.
    #[inline]
    pub fn update_carry_from_sum(&mut self, sum: u16) {
        self.assign_flag(CARRY, sum > 0xFF);
    }

    /// Update OVERFLOW for an addition `a + m -> result`: signed overflow
    /// occurred when the operand sign bits agree but differ from the
    /// result's sign bit.
    #[inline]
    pub fn update_overflow_from_add(&mut self, a: u8, m: u8, result: u8) {
        self.assign_flag(OVERFLOW, ((!(a ^ m)) & (a ^ result) & 0x80) != 0);
    }

    /// Compose the status byte for a stack push (BRK/PHP vs. IRQ/NMI).
    ///
    /// - UNUSED always forced to 1.
    /// - BREAK included only when `set_break` is true.
    pub fn compose_status_for_push(&self, set_break: bool) -> u8 {
        let mut v = self.status | UNUSED;
        if set_break {
            v |= BREAK;
        } else {
            v &= !BREAK;
        }
        v
    }
}

impl fmt::Display for Registers {
    /// Diagnostic dump in the conventional nestest register order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PC:{:04X}",
            self.a, self.x, self.y, self.status, self.sp, self.pc
        )
    }
}
