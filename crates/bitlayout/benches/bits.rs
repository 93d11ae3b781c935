use bitlayout::{
    bits::{BitValue, to_binary_string},
    color,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_binary_string(c: &mut Criterion) {
    for &width in &[8usize, 16, 32, 64] {
        c.bench_function(&format!("binary_string_{}_bits", width), |b| {
            b.iter(|| {
                let _ = to_binary_string(0xDEAD_BEEF_CAFE_F00D, width, 4).unwrap();
            })
        });
    }
}

fn bench_bit_ops(c: &mut Criterion) {
    let value = BitValue::from(0xDEAD_BEEFu32);

    c.bench_function("toggle_all_bits", |b| {
        b.iter(|| {
            let mut v = value;
            for i in 0..32 {
                v = v.toggle_bit(i).unwrap();
            }
            v
        })
    });

    c.bench_function("pack_unpack", |b| {
        b.iter(|| color::unpack(color::pack(12, 34, 56, 78).unwrap()))
    });
}

criterion_group!(benches, bench_binary_string, bench_bit_ops);
criterion_main!(benches);
