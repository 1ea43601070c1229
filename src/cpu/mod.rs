/*!
cpu::mod - The CPU engine: fetch, decode, execute, interrupt service.

Module layout
=============
```text
    table.rs      - Static opcode -> Instruction metadata table.
    addressing.rs - Operand fetch and effective-address resolution.
    execute.rs    - Instruction semantic helpers (ALU, flags, stack, RMW).
    dispatch/     - Per-instruction routing from mnemonic to helpers.
```

`Cpu` owns the register file, the flat memory, and the interrupt lines,
and exposes the two execution entry points:

- `step()` runs one full instruction from PC: service any pending
  interrupt first, then fetch, decode, execute. The opcode is peeked
  before PC advances, so an unmapped opcode fails without mutating
  anything.
- `execute(opcode)` runs one instruction given its opcode byte directly,
  with PC already pointing at the operand bytes. Harnesses use this to
  drive hand-placed instruction streams.

Interrupt model
===============
Lines are polled between instructions, priority RESET > NMI > IRQ, with
IRQ masked by the I flag. NMI and IRQ push PC and status (BREAK clear),
set I, and jump through their vector, costing the canonical 7 cycles.
RESET only reloads PC from the reset vector; it pushes nothing.
Servicing consumes the line.
*/

pub mod addressing;
pub mod dispatch;
pub mod execute;
pub mod table;

use log::{debug, trace, warn};

use crate::cpu::dispatch::execute_instruction;
use crate::cpu::execute::{push_status, push_word};
use crate::cpu::table::{Instruction, lookup};
use crate::error::{EmuError, Result};
use crate::interrupts::{Interrupt, InterruptController};
use crate::memory::Memory;
use crate::registers::{IRQ_DISABLE, Registers};
use std::fmt;

/// Hardware vector addresses at the top of the address space.
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles consumed by an interrupt entry sequence.
const INTERRUPT_CYCLES: u32 = 7;

/// The complete CPU: registers, memory, interrupt lines, and a running
/// cycle counter.
pub struct Cpu {
    regs: Registers,
    mem: Memory,
    interrupts: InterruptController,
    cycles: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-up state: registers reset, memory open-bus (0xFF), no
    /// pending interrupts, cycle counter at zero.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            interrupts: InterruptController::new(),
            cycles: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Component access
    // ---------------------------------------------------------------------

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.mem
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }

    /// Total cycles consumed since power-up / `reset`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Return to power-up state: registers and memory reset, interrupt
    /// lines deasserted, cycle counter cleared.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.mem.reset();
        self.interrupts = InterruptController::new();
        self.cycles = 0;
        debug!("cpu reset: {}", self.regs);
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Run one instruction from PC, servicing pending interrupts first.
    /// Returns the cycles consumed (interrupt entry included).
    pub fn step(&mut self) -> Result<u32> {
        let mut cycles = self.service_interrupts()?;

        // Peek before advancing so an unmapped opcode leaves all state
        // untouched.
        let opcode = self.mem.read(self.regs.pc)?;
        let instr = self.decode(opcode)?;
        self.regs.advance_pc(1);

        cycles += self.run_instruction(instr)?;
        Ok(cycles)
    }

    /// Execute one instruction given its opcode byte, with PC pointing
    /// at the first operand byte. No interrupt polling.
    pub fn execute(&mut self, opcode: u8) -> Result<u32> {
        let instr = self.decode(opcode)?;
        self.run_instruction(instr)
    }

    /// Run up to `max_instructions` via `step`, returning the cycles
    /// consumed. Stops early only on error.
    pub fn run(&mut self, max_instructions: u64) -> Result<u64> {
        let mut total = 0u64;
        for _ in 0..max_instructions {
            total += self.step()? as u64;
        }
        Ok(total)
    }

    fn decode(&self, opcode: u8) -> Result<&'static Instruction> {
        match lookup(opcode) {
            Some(instr) => Ok(instr),
            None => {
                warn!(
                    "invalid opcode 0x{opcode:02X} at PC 0x{:04X}",
                    self.regs.pc
                );
                Err(EmuError::InvalidOpcode(opcode))
            }
        }
    }

    fn run_instruction(&mut self, instr: &Instruction) -> Result<u32> {
        trace!("{:04X}  {:<4} {}", self.regs.pc, instr.to_string(), self.regs);
        let cycles = execute_instruction(&mut self.regs, &mut self.mem, instr)?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Service at most one pending interrupt, highest priority first.
    /// Returns the cycles consumed (0 when nothing was serviced).
    fn service_interrupts(&mut self) -> Result<u32> {
        if self.interrupts.is_pending(Interrupt::Reset) {
            self.regs.pc = self.mem.read16(RESET_VECTOR)?;
            self.interrupts.clear(Interrupt::Reset);
            debug!("reset vector -> {:04X}", self.regs.pc);
        } else if self.interrupts.is_pending(Interrupt::Nmi) {
            self.enter_interrupt(NMI_VECTOR)?;
            self.interrupts.clear(Interrupt::Nmi);
            debug!("nmi -> {:04X}", self.regs.pc);
        } else if self.interrupts.is_pending(Interrupt::Irq)
            && !self.regs.is_flag_set(IRQ_DISABLE)
        {
            self.enter_interrupt(IRQ_VECTOR)?;
            self.interrupts.clear(Interrupt::Irq);
            debug!("irq -> {:04X}", self.regs.pc);
        } else {
            return Ok(0);
        }
        self.cycles += INTERRUPT_CYCLES as u64;
        Ok(INTERRUPT_CYCLES)
    }

    /// Hardware interrupt entry: push PC and status (BREAK clear), mask
    /// IRQs, load the vector.
    fn enter_interrupt(&mut self, vector: u16) -> Result<()> {
        let pc = self.regs.pc;
        push_word(&mut self.regs, &mut self.mem, pc)?;
        push_status(&mut self.regs, &mut self.mem, false)?;
        self.regs.set_flag_bit(IRQ_DISABLE);
        self.regs.pc = self.mem.read16(vector)?;
        Ok(())
    }
}

impl fmt::Display for Cpu {
    /// Register dump plus the running cycle count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} CYC:{}", self.regs, self.cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{BREAK, CARRY, UNUSED, ZERO};

    fn cpu_with_program(origin: u16, program: &[u8]) -> Cpu {
        let mut cpu = Cpu::new();
        cpu.registers_mut().pc = origin;
        cpu.memory_mut().load(program, origin);
        cpu
    }

    #[test]
    fn power_up_invariants() {
        let cpu = Cpu::new();
        assert_eq!(cpu.registers().status, 0x24);
        assert_eq!(cpu.registers().sp, 0xFD);
        assert_eq!(cpu.registers().pc, 0xFFFC);
        assert_eq!(cpu.memory().read(0x1234).unwrap(), 0xFF);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn step_fetches_decodes_executes() {
        let mut cpu = cpu_with_program(0x0200, &[0xA9, 0x42, 0x69, 0x01]);
        assert_eq!(cpu.step().unwrap(), 2); // LDA #$42
        assert_eq!(cpu.registers().a, 0x42);
        assert_eq!(cpu.registers().pc, 0x0202);
        assert_eq!(cpu.step().unwrap(), 2); // ADC #$01
        assert_eq!(cpu.registers().a, 0x43);
        assert_eq!(cpu.cycles(), 4);
    }

    #[test]
    fn invalid_opcode_leaves_state_unmodified() {
        let mut cpu = cpu_with_program(0x0200, &[0x02]);
        let regs_before = *cpu.registers();
        assert_eq!(cpu.step(), Err(EmuError::InvalidOpcode(0x02)));
        assert_eq!(*cpu.registers(), regs_before);
        assert_eq!(cpu.cycles(), 0);
        // The literal-opcode path rejects the same way.
        assert_eq!(cpu.execute(0x02), Err(EmuError::InvalidOpcode(0x02)));
        assert_eq!(*cpu.registers(), regs_before);
    }

    #[test]
    fn execute_runs_with_pc_at_operand() {
        let mut cpu = Cpu::new();
        cpu.registers_mut().pc = 0x0200;
        cpu.memory_mut().write(0x0200, 0x55).unwrap();
        cpu.execute(0xA9).unwrap(); // LDA immediate, operand at PC
        assert_eq!(cpu.registers().a, 0x55);
        assert_eq!(cpu.registers().pc, 0x0201);
    }

    #[test]
    fn brk_through_execute_matches_vector_semantics() {
        let mut cpu = Cpu::new();
        cpu.memory_mut().write(0xFFFE, 0xEE).unwrap();
        cpu.memory_mut().write(0xFFFF, 0xDD).unwrap();
        // PC still at the reset default 0xFFFC.
        cpu.execute(0x00).unwrap();
        assert_eq!(cpu.registers().pc, 0xDDEE);
        assert_eq!(cpu.memory().read(0x01FB).unwrap(), 0x24 | BREAK);
        assert_eq!(cpu.memory().read16(0x01FC).unwrap(), 0xFFFD);
    }

    #[test]
    fn nmi_serviced_before_fetch() {
        let mut cpu = cpu_with_program(0x0200, &[0xEA]);
        cpu.memory_mut().write(NMI_VECTOR, 0x00).unwrap();
        cpu.memory_mut().write(NMI_VECTOR + 1, 0x80).unwrap();
        cpu.memory_mut().write(0x8000, 0xEA).unwrap(); // handler: NOP
        cpu.interrupts_mut().request(Interrupt::Nmi);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 7 + 2); // entry + NOP at the handler
        assert_eq!(cpu.registers().pc, 0x8001);
        assert!(!cpu.interrupts().is_pending(Interrupt::Nmi));
        // Status pushed with BREAK clear, UNUSED set.
        let pushed = cpu.memory().read(0x01FB).unwrap();
        assert_eq!(pushed & BREAK, 0);
        assert_ne!(pushed & UNUSED, 0);
        // Return address is the pre-interrupt PC.
        assert_eq!(cpu.memory().read16(0x01FC).unwrap(), 0x0200);
    }

    #[test]
    fn irq_masked_by_i_flag() {
        let mut cpu = cpu_with_program(0x0200, &[0xEA, 0xEA]);
        cpu.memory_mut().write(IRQ_VECTOR, 0x00).unwrap();
        cpu.memory_mut().write(IRQ_VECTOR + 1, 0x90).unwrap();
        cpu.interrupts_mut().request(Interrupt::Irq);

        // Power-up state has I set: the IRQ stays pending.
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.registers().pc, 0x0201);
        assert!(cpu.interrupts().is_pending(Interrupt::Irq));

        cpu.registers_mut().clear_flag_bit(IRQ_DISABLE);
        cpu.memory_mut().write(0x9000, 0xEA).unwrap();
        assert_eq!(cpu.step().unwrap(), 9);
        assert_eq!(cpu.registers().pc, 0x9001);
        assert!(cpu.registers().is_flag_set(IRQ_DISABLE));
    }

    #[test]
    fn reset_interrupt_only_loads_vector() {
        let mut cpu = cpu_with_program(0x0200, &[0xEA]);
        cpu.memory_mut().write(RESET_VECTOR, 0x34).unwrap();
        cpu.memory_mut().write(RESET_VECTOR + 1, 0x12).unwrap();
        cpu.memory_mut().write(0x1234, 0xEA).unwrap();
        cpu.interrupts_mut().request(Interrupt::Reset);
        let sp_before = cpu.registers().sp;

        cpu.step().unwrap();
        assert_eq!(cpu.registers().pc, 0x1235);
        assert_eq!(cpu.registers().sp, sp_before); // nothing pushed
        assert!(!cpu.interrupts().is_pending(Interrupt::Reset));
    }

    #[test]
    fn reset_has_priority_over_nmi() {
        let mut cpu = Cpu::new();
        cpu.memory_mut().write(RESET_VECTOR, 0x00).unwrap();
        cpu.memory_mut().write(RESET_VECTOR + 1, 0x40).unwrap();
        cpu.memory_mut().write(0x4000, 0xEA).unwrap();
        cpu.interrupts_mut().request(Interrupt::Nmi);
        cpu.interrupts_mut().request(Interrupt::Reset);

        cpu.step().unwrap();
        // RESET won; the NMI line is still asserted for the next step.
        assert_eq!(cpu.registers().pc, 0x4001);
        assert!(cpu.interrupts().is_pending(Interrupt::Nmi));
    }

    #[test]
    fn run_executes_program_to_completion() {
        // LDA #$10; ADC #$05; STA $0040; LDX #$03; DEX; BNE -3
        let program = [
            0xA9, 0x10, 0x69, 0x05, 0x85, 0x40, 0xA2, 0x03, 0xCA, 0xD0, 0xFD,
        ];
        let mut cpu = cpu_with_program(0x0200, &program);
        // 4 straight-line instructions + DEX/BNE loop (3 iterations).
        let cycles = cpu.run(4 + 6).unwrap();
        assert_eq!(cpu.memory().read(0x0040).unwrap(), 0x15);
        assert_eq!(cpu.registers().x, 0x00);
        assert!(cpu.registers().is_flag_set(ZERO));
        assert_eq!(cycles, cpu.cycles());
    }

    #[test]
    fn rti_returns_from_interrupt_handler() {
        let mut cpu = cpu_with_program(0x0200, &[0xEA, 0xEA]);
        cpu.memory_mut().write(NMI_VECTOR, 0x00).unwrap();
        cpu.memory_mut().write(NMI_VECTOR + 1, 0x80).unwrap();
        cpu.memory_mut().write(0x8000, 0x40).unwrap(); // handler: RTI
        cpu.registers_mut().set_flag_bit(CARRY);
        cpu.interrupts_mut().request(Interrupt::Nmi);

        cpu.step().unwrap(); // NMI entry + RTI
        assert_eq!(cpu.registers().pc, 0x0200);
        assert!(cpu.registers().is_flag_set(CARRY));
        assert_eq!(cpu.registers().sp, 0xFD);
    }
}
