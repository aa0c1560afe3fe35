use beve::{decode_slice, DecodeOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Builds a representative document: an object of 64 entries, each an
/// array holding a string and a float32 typed array of 16 elements.
fn sample_document() -> Vec<u8> {
    let mut out = Vec::new();
    out.push(0x03); // object, string keys

    let entry_count: u32 = 64;
    push_compressed_size(&mut out, entry_count as u64);

    for i in 0..entry_count {
        let key = format!("entry_{i}");
        out.push(0x02); // string
        push_compressed_size(&mut out, key.len() as u64);
        out.extend_from_slice(key.as_bytes());

        out.push(0x05); // untyped array of 2 elements
        push_compressed_size(&mut out, 2);

        let label = format!("item-{i}");
        out.push(0x02);
        push_compressed_size(&mut out, label.len() as u64);
        out.extend_from_slice(label.as_bytes());

        out.push(0x44); // typed array, float32 (sub=0, widx=2 -> width 4)
        push_compressed_size(&mut out, 16);
        for j in 0..16u32 {
            out.extend_from_slice(&(i as f32 + j as f32).to_le_bytes());
        }
    }

    out
}

fn push_compressed_size(out: &mut Vec<u8>, n: u64) {
    // Always use the 4-byte width for simplicity; fixture generation
    // doesn't need the smallest encoding, only a valid one.
    let full = (n << 2) | 0b10;
    out.extend_from_slice(&(full as u32).to_le_bytes());
}

fn decode_document(c: &mut Criterion) {
    let data = sample_document();
    c.bench_function("decode_document", |b| {
        b.iter(|| {
            let value = decode_slice(black_box(&data)).unwrap();
            black_box(value);
        })
    });
}

fn decode_document_with_shallow_limit(c: &mut Criterion) {
    let data = sample_document();
    let opts = DecodeOptions { max_depth: 4 };
    c.bench_function("decode_document_with_shallow_limit", |b| {
        b.iter(|| {
            let value = beve::decode_slice_with_options(black_box(&data), &opts).unwrap();
            black_box(value);
        })
    });
}

criterion_group!(benches, decode_document, decode_document_with_shallow_limit);
criterion_main!(benches);
