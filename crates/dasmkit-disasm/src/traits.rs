//! Disassembler traits.

use crate::DecodeError;
use dasmkit_core::{Architecture, Instruction};

/// Result of decoding an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// The decoded instruction.
    pub instruction: Instruction,
    /// Number of bytes consumed.
    pub size: usize,
}

/// Trait for architecture-specific instruction decoders.
pub trait Disassembler {
    /// Decode a single instruction starting at the given address.
    ///
    /// # Arguments
    /// * `bytes` - The raw bytes to decode
    /// * `address` - The address (instruction pointer) of the first byte
    ///
    /// # Returns
    /// The decoded instruction and the number of bytes consumed.
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> Result<DecodedInstruction, DecodeError>;

    /// Returns the minimum instruction size for this architecture.
    fn min_instruction_size(&self) -> usize;

    /// Returns the maximum instruction size for this architecture.
    fn max_instruction_size(&self) -> usize;

    /// Returns whether instructions are fixed-width.
    fn is_fixed_width(&self) -> bool;

    /// Returns the target architecture.
    fn architecture(&self) -> Architecture;

    /// Disassemble a run of bytes into instructions.
    ///
    /// Decoding never stops early: after an error the scan resumes
    /// `min_instruction_size` bytes later.
    fn disassemble_block(&self, bytes: &[u8], start_address: u64) -> Vec<Result<Instruction, DecodeError>> {
        let mut instructions = Vec::new();
        let mut offset = 0;
        let step = self.min_instruction_size().max(1);

        while offset < bytes.len() {
            let remaining = &bytes[offset..];
            let address = start_address.wrapping_add(offset as u64);

            match self.decode_instruction(remaining, address) {
                Ok(decoded) => {
                    offset += decoded.size.max(1);
                    instructions.push(Ok(decoded.instruction));
                }
                Err(e) => {
                    log::debug!("skipping {step} byte(s) at {address:#x}: {e}");
                    offset += step;
                    instructions.push(Err(e));
                }
            }
        }

        instructions
    }
}
