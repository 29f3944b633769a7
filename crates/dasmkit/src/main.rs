//! dasmkit - x86 and PowerPC disassembler
//!
//! Usage:
//!   dasmkit x86 --hex "b8 01 00 00 00"        Disassemble bytes given on the command line
//!   dasmkit x86 --mode 32 --syntax att <file> Disassemble a raw code file
//!   dasmkit ppc --address 80003000 <file>     Disassemble big-endian PowerPC words

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dasmkit_core::{Bitness, Instruction, Syntax};
use dasmkit_disasm::{DecodeError, DecoderOptions, Disassembler, PpcDisassembler};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dasmkit")]
#[command(version, about = "An x86 and PowerPC disassembler", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Disassemble x86 / x86-64 code
    X86 {
        /// Default operand and address size
        #[arg(short, long, default_value = "64")]
        mode: Bitness,

        /// Output syntax (intel or att)
        #[arg(short, long, default_value = "intel")]
        syntax: Syntax,

        /// Code segment base; prints absolute branch targets
        #[arg(short, long, value_parser = parse_hex)]
        base: Option<u64>,

        /// Address of the first byte
        #[arg(long, value_parser = parse_hex, default_value = "0")]
        ip: u64,

        #[command(flatten)]
        input: Input,
    },
    /// Disassemble PowerPC (Gekko/Broadway) code
    Ppc {
        /// Address of the first word
        #[arg(short, long, value_parser = parse_hex, default_value = "0")]
        address: u64,

        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args)]
struct Input {
    /// Raw code file
    #[arg(required_unless_present = "hex", conflicts_with = "hex")]
    file: Option<PathBuf>,

    /// Code as hex digits, spaces allowed
    #[arg(long)]
    hex: Option<String>,

    /// Maximum number of instructions
    #[arg(short, long, default_value = "100")]
    count: usize,

    /// Print one JSON object per instruction
    #[arg(long)]
    json: bool,
}

impl Input {
    fn bytes(&self) -> Result<Vec<u8>> {
        match (&self.hex, &self.file) {
            (Some(hex), _) => parse_hex_bytes(hex),
            (None, Some(path)) => {
                fs::read(path).with_context(|| format!("Failed to read code file: {}", path.display()))
            }
            (None, None) => bail!("Either a file or --hex is required"),
        }
    }
}

fn parse_hex(s: &str) -> Result<u64, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| e.to_string())
}

fn parse_hex_bytes(text: &str) -> Result<Vec<u8>> {
    let digits: String = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|tok| tok.strip_prefix("0x").unwrap_or(tok))
        .collect();
    if digits.len() % 2 != 0 {
        bail!("Odd number of hex digits in {:?}", text);
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = digits.get(i..i + 2).context("Hex input must be ASCII")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("Invalid hex byte {:?}", pair))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::X86 { mode, syntax, base, ip, input } => {
            let bytes = input.bytes()?;
            let mut options = DecoderOptions::new(mode).syntax(syntax);
            if let Some(base) = base {
                options = options.base_address(base);
            }
            log::debug!("x86 {mode}-bit {syntax}, {} byte(s) at {ip:#x}", bytes.len());
            disassemble_with(&options.build(), &bytes, ip, &input)
        }
        Commands::Ppc { address, input } => {
            let bytes = input.bytes()?;
            if bytes.len() % 4 != 0 {
                log::warn!("ignoring {} trailing byte(s)", bytes.len() % 4);
            }
            let words = &bytes[..bytes.len() - bytes.len() % 4];
            if words.is_empty() {
                bail!("PowerPC input needs at least one 4-byte word");
            }
            disassemble_with(&PpcDisassembler::new(), words, address, &input)
        }
    }
}

fn disassemble_with<D: Disassembler>(disasm: &D, bytes: &[u8], address: u64, input: &Input) -> Result<()> {
    let mut offset = 0;
    let mut count = 0;

    while offset < bytes.len() && count < input.count {
        let remaining = &bytes[offset..];
        let addr = address.wrapping_add(offset as u64);

        match disasm.decode_instruction(remaining, addr) {
            Ok(decoded) => {
                print_instruction(&decoded.instruction, input.json)?;
                offset += decoded.size.max(1);
            }
            Err(e) => {
                print_error(addr, remaining[0], &e, input.json)?;
                offset += disasm.min_instruction_size().max(1);
            }
        }
        count += 1;
    }

    Ok(())
}

fn print_instruction(insn: &Instruction, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(insn).context("Failed to serialize instruction")?);
        return Ok(());
    }
    let bytes = insn.bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ");
    println!("{:#010x}:  {:<30}  {}", insn.address, bytes, insn);
    Ok(())
}

fn print_error(address: u64, byte: u8, error: &DecodeError, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({ "address": address, "error": error.to_string() });
        println!("{}", serde_json::to_string(&value).context("Failed to serialize error")?);
    } else {
        println!("{:#010x}:  {:02x}{:29}  <decode error: {}>", address, byte, "", error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(parse_hex_bytes("b8 01 00 00 00").unwrap(), vec![0xb8, 1, 0, 0, 0]);
        assert_eq!(parse_hex_bytes("38600001").unwrap(), vec![0x38, 0x60, 0x00, 0x01]);
        assert_eq!(parse_hex_bytes("0x0f,0x1f,0x00").unwrap(), vec![0x0f, 0x1f, 0x00]);
        assert!(parse_hex_bytes("abc").is_err());
        assert!(parse_hex_bytes("zz").is_err());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x1000"), Ok(0x1000));
        assert_eq!(parse_hex("80003000"), Ok(0x8000_3000));
        assert!(parse_hex("xyz").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
