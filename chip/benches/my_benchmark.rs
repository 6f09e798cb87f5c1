use chip::chip8::{ChipSet, Quirks};
use criterion::{criterion_group, criterion_main, Criterion};

/// A small program that counts, draws a glyph and jumps back, so it never ends.
///
/// ```text
/// 0x200 LD V0, 0x00
/// 0x202 LD V1, 0x00
/// 0x204 ADD V0, 0x01
/// 0x206 LD V2, V0
/// 0x208 ADD V2, V1
/// 0x20A LD I, 0x050
/// 0x20C DRW V0, V1, 5
/// 0x20E SNE V2, 0xFF
/// 0x210 CLS
/// 0x212 JP 0x202
/// ```
const LOOP_ROM: [u8; 20] = [
    0x60, 0x00, 0x61, 0x00, 0x70, 0x01, 0x82, 0x00, 0x82, 0x14, 0xA0, 0x50, 0xD0, 0x15, 0x42,
    0xFF, 0x00, 0xE0, 0x12, 0x02,
];

fn get_default_chip() -> ChipSet {
    let mut chip = ChipSet::with_config(Quirks::default());
    chip.load_font(&chip::definitions::display::fontset::FONTSET)
        .expect("The font fits into memory.");
    chip.load_rom(&LOOP_ROM).expect("The rom fits into memory.");
    chip
}

pub fn step_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("step_bench", |b| {
        b.iter(|| {
            chip.step().expect("The loop rom only uses valid opcodes.");
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

criterion_group!(benches, step_bench, print_bench);
criterion_main!(benches);
