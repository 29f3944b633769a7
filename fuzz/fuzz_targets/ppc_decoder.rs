#![no_main]

use dasmkit_disasm::ppc::decode_ppc;
use dasmkit_disasm::traits::Disassembler;
use dasmkit_disasm::PpcDisassembler;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for (i, chunk) in data.chunks_exact(4).take(256).enumerate() {
        let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let _ = decode_ppc(word, 0x8000_0000u32.wrapping_add(4 * i as u32)).to_string();
    }

    let _ = PpcDisassembler::new().disassemble_block(data, 0x8000_3000);
});
