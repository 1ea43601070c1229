/*!
memory.rs - Flat addressable memory for the CPU core.

Overview
========
`Memory` is a bounds-checked byte array covering the 6502's 64 KiB address
space (or a smaller buffer when reused for things like VRAM). It provides:
- Single-byte read/write with explicit out-of-range errors.
- Little-endian 16-bit reads, in two flavors: the straightforward
  `read16`, and `read16_bug` which reproduces the original 6502
  indirect-addressing hardware bug (the high-byte fetch never carries
  into the next page).
- Bulk ROM loading (iNES convention: validate magic, skip the 16-byte
  header, copy the program image at a fixed origin).
- `same_page` for page-crossing detection (cycle penalty accounting).

Reset fills every cell with 0xFF, matching open-bus behavior: a read of
any in-range address always yields a defined byte, never uninitialized
data.

Scope
=====
Pure storage. No mirroring, no mapper logic, no memory-mapped device
dispatch; collaborators that need I/O registers (APU placeholders, test
result cells) share this space at fixed addresses.
*/

use crate::error::{EmuError, Result};

/// Full 6502 address space in bytes.
pub const MEM_SIZE: usize = 0x10000;

/// Bounds-checked flat byte memory.
#[derive(Clone)]
pub struct Memory {
    cells: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Create a full 64 KiB memory, reset-filled with 0xFF.
    pub fn new() -> Self {
        Self::with_size(MEM_SIZE)
    }

    /// Create a memory with a custom backing size (e.g. an 8 KiB VRAM
    /// buffer). Reads and writes beyond `size` fail with
    /// `AddressOutOfRange`.
    pub fn with_size(size: usize) -> Self {
        let mut mem = Self {
            cells: vec![0; size],
        };
        mem.reset();
        mem
    }

    /// Fill every cell with 0xFF (open-bus default).
    pub fn reset(&mut self) {
        self.cells.fill(0xFF);
    }

    /// Number of addressable bytes.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn check(&self, addr: u16) -> Result<usize> {
        let idx = addr as usize;
        if idx < self.cells.len() {
            Ok(idx)
        } else {
            Err(EmuError::AddressOutOfRange {
                addr,
                size: self.cells.len(),
            })
        }
    }

    /// Read one byte.
    #[inline]
    pub fn read(&self, addr: u16) -> Result<u8> {
        Ok(self.cells[self.check(addr)?])
    }

    /// Write one byte.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        let idx = self.check(addr)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Little-endian 16-bit read: low byte at `addr`, high byte at
    /// `addr + 1` (wrapping at the top of the address space).
    pub fn read16(&self, addr: u16) -> Result<u16> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Little-endian 16-bit read reproducing the 6502 indirect page-wrap
    /// hardware bug: the high byte is fetched from
    /// `(addr & 0xFF00) | ((addr + 1) & 0x00FF)`, so a pointer at the last
    /// byte of a page reads its high byte from the *start* of that same
    /// page instead of the next one.
    pub fn read16_bug(&self, addr: u16) -> Result<u16> {
        let lo = self.read(addr)? as u16;
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = self.read(hi_addr)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Bulk-copy `bytes` into memory starting at `origin`, truncating at
    /// the end of the address space.
    pub fn load(&mut self, bytes: &[u8], origin: u16) {
        let start = origin as usize;
        let room = self.cells.len().saturating_sub(start);
        let n = bytes.len().min(room);
        self.cells[start..start + n].copy_from_slice(&bytes[..n]);
    }

    /// Load an iNES ROM image: validate the 3-byte ASCII "NES" magic,
    /// skip the 16-byte header, and copy the remainder at `origin`
    /// (0xC000 by convention for nestest-style images).
    pub fn load_ines(&mut self, bytes: &[u8], origin: u16) -> Result<()> {
        if bytes.len() < 16 {
            return Err(EmuError::InvalidRom("file shorter than iNES header"));
        }
        if &bytes[0..3] != b"NES" {
            return Err(EmuError::InvalidRom("missing NES magic"));
        }
        self.load(&bytes[16..], origin);
        Ok(())
    }

    /// True iff both addresses fall on the same 256-byte page (identical
    /// high byte).
    #[inline]
    pub fn same_page(a1: u16, a2: u16) -> bool {
        (a1 ^ a2) >> 8 == 0
    }
}
