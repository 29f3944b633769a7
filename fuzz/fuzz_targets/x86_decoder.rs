#![no_main]

use dasmkit_core::{Bitness, Syntax};
use dasmkit_disasm::x86::decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the mode and syntax, the rest is code.
    let Some((&selector, code)) = data.split_first() else {
        return;
    };
    let bitness = match selector & 3 {
        0 => Bitness::Bits16,
        1 => Bitness::Bits32,
        _ => Bitness::Bits64,
    };
    let syntax = if selector & 4 != 0 { Syntax::Att } else { Syntax::Intel };
    let base = (selector & 8 != 0).then_some(0x40_0000);

    // Walk the buffer; errors skip one byte
    let mut offset = 0;
    let mut count = 0;
    while offset < code.len() && count < 100 {
        match decode(bitness, base, 0x1000 + offset as u64, &code[offset..], syntax) {
            Ok((len, _)) => {
                assert!((1..=15).contains(&len));
                offset += len;
            }
            Err(_) => offset += 1,
        }
        count += 1;
    }
});
