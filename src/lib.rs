#![doc = r#"
Famicore library crate.

Cycle-aware MOS 6502 CPU core as used in the NES (Ricoh 2A03 subset: no
decimal mode). The crate models the processor and its immediate
collaborators; video and audio hardware are out of scope.

Modules:
- cpu: the CPU engine (instruction table, addressing, semantics, dispatch)
- memory: bounds-checked flat 64 KiB address space with iNES loading
- registers: architectural register file and status-flag helpers
- interrupts: IRQ / NMI / RESET request lines
- error: shared error type for all fallible core operations
"#]

pub mod cpu;
pub mod error;
pub mod interrupts;
pub mod memory;
pub mod registers;

// Re-export commonly used types at the crate root for convenience.
pub use cpu::Cpu;
pub use error::{EmuError, Result};
pub use interrupts::{Interrupt, InterruptController};
pub use memory::Memory;
pub use registers::Registers;
