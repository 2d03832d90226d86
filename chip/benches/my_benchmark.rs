use std::convert::TryFrom;

use chip::{chip8::ChipSet, opcode::Instruction, resources::Rom};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::mock::StepRng;

const ROM_NAME: &str = "BENCH";

/// Draws the font characters one after the other, counting up a register
/// and jumping back to the start forever.
const PROGRAM: [u8; 18] = [
    0x00, 0xE0, // CLS
    0xF1, 0x29, // LD F, V1
    0xD2, 0x35, // DRW V2, V3, 5
    0x71, 0x01, // ADD V1, 0x01
    0x81, 0x42, // AND V1, V4
    0x72, 0x05, // ADD V2, 0x05
    0xC3, 0x0F, // RND V3, 0x0F
    0x64, 0x0F, // LD V4, 0x0F
    0x12, 0x02, // JP 0x202
];

static BASE_ROM: once_cell::sync::Lazy<Rom> =
    once_cell::sync::Lazy::new(|| Rom::new(ROM_NAME, &PROGRAM));

/// will setup the default configured chip
fn get_default_chip() -> ChipSet {
    ChipSet::new(BASE_ROM.clone())
        .expect("The bench program fits into memory.")
        .with_rng(StepRng::new(0, 1))
}

pub fn decode_bench(c: &mut Criterion) {
    c.bench_function("decode_bench", |b| {
        b.iter(|| {
            for opcode in 0..=u16::MAX {
                let _ = black_box(Instruction::try_from(black_box(opcode)));
            }
        });
    });
}

pub fn step_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("step_bench", |b| {
        b.iter(|| {
            black_box(chip.next().expect("The bench program only has valid opcodes."));
        });
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, decode_bench, step_bench, print_bench);
criterion_main!(benches);
