//! Benchmarks for disassembly performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dasmkit_core::{Bitness, Syntax};
use dasmkit_disasm::ppc::decode_ppc;
use dasmkit_disasm::{DecoderOptions, Disassembler, PpcDisassembler};

/// Sample x86-64 code: a small function with various instruction types.
const X86_64_CODE: &[u8] = &[
    // Function prologue
    0x55, // push rbp
    0x48, 0x89, 0xe5, // mov rbp, rsp
    0x48, 0x83, 0xec, 0x20, // sub rsp, 0x20
    // Some arithmetic
    0x48, 0x89, 0x7d, 0xf8, // mov [rbp-8], rdi
    0x48, 0x8b, 0x45, 0xf8, // mov rax, [rbp-8]
    0x48, 0x83, 0xc0, 0x01, // add rax, 1
    0x48, 0x89, 0x45, 0xf0, // mov [rbp-16], rax
    // Vector and SSE
    0xc5, 0xf8, 0x10, 0xc1, // vmovups xmm0, xmm1
    0x66, 0x0f, 0x38, 0x00, 0xc1, // pshufb xmm0, xmm1
    // Conditional
    0x48, 0x83, 0x7d, 0xf0, 0x0a, // cmp qword [rbp-16], 10
    0x7e, 0x07, // jle .L1
    0xb8, 0x01, 0x00, 0x00, 0x00, // mov eax, 1
    0xeb, 0x05, // jmp .L2
    // .L1:
    0xb8, 0x00, 0x00, 0x00, 0x00, // mov eax, 0
    // .L2: epilogue
    0x48, 0x83, 0xc4, 0x20, // add rsp, 0x20
    0x5d, // pop rbp
    0xc3, // ret
];

/// Sample PowerPC code: a leaf function with a loop.
const PPC_CODE: &[u8] = &[
    0x7c, 0x08, 0x02, 0xa6, // mflr r0
    0x90, 0x01, 0xff, 0xfc, // stw r0, -4(r1)
    0x38, 0x60, 0x00, 0x01, // li r3, 1
    0x54, 0x63, 0x10, 0x3a, // slwi r3, r3, 2
    0x7c, 0x64, 0x2a, 0x14, // add r3, r4, r5
    0x42, 0x00, 0xff, 0xf8, // bdnz+ -8
    0xe0, 0x23, 0x20, 0x08, // psq_l p1, 8(r3), 0, qr2
    0x10, 0x22, 0x18, 0x2a, // ps_add p1, p2, p3
    0x4e, 0x80, 0x00, 0x20, // blr
];

/// Larger code block for throughput testing (repeated pattern).
fn generate_large_block(pattern: &[u8], size: usize) -> Vec<u8> {
    let mut result = Vec::with_capacity(size);
    while result.len() < size {
        let remaining = size - result.len();
        let to_copy = remaining.min(pattern.len());
        result.extend_from_slice(&pattern[..to_copy]);
    }
    result
}

fn bench_x86_64_disassembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("x86_64_disassembly");

    for syntax in [Syntax::Intel, Syntax::Att] {
        let disasm = DecoderOptions::new(Bitness::Bits64).syntax(syntax).build();
        let label = format!("{syntax:?}").to_lowercase();

        group.bench_function(BenchmarkId::new("single_instruction", &label), |b| {
            b.iter(|| {
                let _ = disasm.decode_instruction(black_box(&X86_64_CODE[..3]), 0x1000);
            })
        });

        group.bench_function(BenchmarkId::new("small_function", &label), |b| {
            b.iter(|| {
                let _ = disasm.disassemble_block(black_box(X86_64_CODE), 0x1000);
            })
        });
    }

    let disasm = DecoderOptions::new(Bitness::Bits64).build();
    for size in [1024, 4096, 16384, 65536] {
        let code = generate_large_block(X86_64_CODE, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            b.iter(|| {
                let _ = disasm.disassemble_block(black_box(code), 0x1000);
            })
        });
    }

    group.finish();
}

fn bench_ppc_disassembly(c: &mut Criterion) {
    let disasm = PpcDisassembler::new();

    let mut group = c.benchmark_group("ppc_disassembly");

    group.bench_function("single_word", |b| {
        b.iter(|| decode_ppc(black_box(0x5463_103a), 0x8000_3000))
    });

    group.bench_function("small_function", |b| {
        b.iter(|| {
            let _ = disasm.disassemble_block(black_box(PPC_CODE), 0x8000_3000);
        })
    });

    for size in [1024, 4096, 16384, 65536] {
        let code = generate_large_block(PPC_CODE, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            b.iter(|| {
                let _ = disasm.disassemble_block(black_box(code), 0x8000_3000);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_x86_64_disassembly, bench_ppc_disassembly);
criterion_main!(benches);
