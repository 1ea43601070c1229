//! nestest-style harness: load an iNES image at 0xC000 and free-run the
//! CPU, then dump the registers and the standard result cells.

use std::env;
use std::process;

use famicore::cpu::Cpu;
use famicore::registers::{IRQ_DISABLE, UNUSED};

/// nestest convention: execution starts at 0xC000 with P=0x24 / SP=0xFD.
const START_PC: u16 = 0xC000;
/// Unimplemented APU/IO registers read back as open bus for the tests
/// that probe them.
const OPEN_BUS_REGS: [u16; 5] = [0x4004, 0x4005, 0x4006, 0x4007, 0x4015];
/// Safety cap; nestest's official-opcode pass finishes well under this.
const MAX_INSTRUCTIONS: u64 = 10_000;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: famicore <rom.nes>");
        process::exit(2);
    };

    let rom = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            process::exit(1);
        }
    };

    let mut cpu = Cpu::new();
    if let Err(e) = cpu.memory_mut().load_ines(&rom, START_PC) {
        eprintln!("failed to load {path}: {e}");
        process::exit(1);
    }

    for addr in OPEN_BUS_REGS {
        // load_ines starts from an open-bus (0xFF) memory, but be explicit
        // about the cells nestest reads back.
        if let Err(e) = cpu.memory_mut().write(addr, 0xFF) {
            eprintln!("memory setup failed: {e}");
            process::exit(1);
        }
    }

    {
        let regs = cpu.registers_mut();
        regs.pc = START_PC;
        regs.sp = 0xFD;
        regs.status = IRQ_DISABLE | UNUSED;
    }

    match cpu.run(MAX_INSTRUCTIONS) {
        Ok(cycles) => println!("ran {MAX_INSTRUCTIONS} instructions in {cycles} cycles"),
        Err(e) => println!("stopped: {e}"),
    }

    println!("{cpu}");
    let result_lo = cpu.memory().read(0x0002).unwrap_or(0xFF);
    let result_hi = cpu.memory().read(0x0003).unwrap_or(0xFF);
    println!("result: {result_lo:02X}{result_hi:02X}");
}
