/*!
interrupts.rs - Pending-interrupt request lines (IRQ / NMI / RESET).

Pure flag storage: collaborating hardware models (e.g. a PPU asserting NMI
at vblank) set lines between instructions, and the CPU engine polls and
services them before each instruction fetch. This module holds no CPU
reference and performs no servicing itself; each line is consumed
(cleared) by the engine once serviced.
*/

/// The three 6502 interrupt request kinds, in ascending service priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Irq,
    Nmi,
    Reset,
}

/// Independent pending flags for each interrupt line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterruptController {
    irq: bool,
    nmi: bool,
    reset: bool,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert an interrupt line.
    pub fn request(&mut self, kind: Interrupt) {
        self.set(kind, true);
    }

    /// Deassert an interrupt line (also used by the engine after service).
    pub fn clear(&mut self, kind: Interrupt) {
        self.set(kind, false);
    }

    /// True if the line is currently asserted.
    pub fn is_pending(&self, kind: Interrupt) -> bool {
        match kind {
            Interrupt::Irq => self.irq,
            Interrupt::Nmi => self.nmi,
            Interrupt::Reset => self.reset,
        }
    }

    fn set(&mut self, kind: Interrupt, value: bool) {
        match kind {
            Interrupt::Irq => self.irq = value,
            Interrupt::Nmi => self.nmi = value,
            Interrupt::Reset => self.reset = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_start_clear() {
        let ints = InterruptController::new();
        assert!(!ints.is_pending(Interrupt::Irq));
        assert!(!ints.is_pending(Interrupt::Nmi));
        assert!(!ints.is_pending(Interrupt::Reset));
    }

    #[test]
    fn lines_are_independent() {
        let mut ints = InterruptController::new();
        ints.request(Interrupt::Nmi);
        assert!(ints.is_pending(Interrupt::Nmi));
        assert!(!ints.is_pending(Interrupt::Irq));
        assert!(!ints.is_pending(Interrupt::Reset));
        ints.request(Interrupt::Irq);
        ints.clear(Interrupt::Nmi);
        assert!(!ints.is_pending(Interrupt::Nmi));
        assert!(ints.is_pending(Interrupt::Irq));
    }
}
