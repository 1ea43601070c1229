/*!
error.rs - Shared error type for the emulator core.

All fallible core operations (memory access, ROM loading, opcode dispatch)
return `Result<_, EmuError>`. None of these conditions are recoverable by
the core itself: an invalid opcode means a corrupt ROM or an incomplete
instruction table, an out-of-range address means an internal computation
bug on a sub-64KB buffer, and a bad magic means the file is not an iNES
image. Callers decide whether to abort or report.
*/

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EmuError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmuError {
    /// Opcode byte with no entry in the instruction table. Fatal: indicates
    /// a corrupt ROM or a table defect, never skipped silently.
    #[error("invalid opcode 0x{0:02X}")]
    InvalidOpcode(u8),

    /// Address beyond the backing buffer. Only reachable for memories
    /// smaller than the full 64 KiB address space.
    #[error("address 0x{addr:04X} out of range for {size}-byte memory")]
    AddressOutOfRange { addr: u16, size: usize },

    /// ROM image failed validation at load time (bad magic, truncated).
    #[error("invalid ROM image: {0}")]
    InvalidRom(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_include_hex() {
        let e = EmuError::InvalidOpcode(0x02);
        assert_eq!(e.to_string(), "invalid opcode 0x02");
        let e = EmuError::AddressOutOfRange {
            addr: 0x4000,
            size: 0x2000,
        };
        assert!(e.to_string().contains("0x4000"));
        assert!(e.to_string().contains("8192"));
    }
}
