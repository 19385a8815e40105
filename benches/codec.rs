use std::hint::black_box;

use divan::Bencher;
use pmanvil::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A chunk with the lower eight sub-chunks filled with noise.
fn noisy_chunk() -> Chunk {
    let mut rng = StdRng::seed_from_u64(42);
    let mut chunk = Chunk::empty(ChunkPos::new(12, -5));

    for x in 0..16 {
        for z in 0..16 {
            for y in 0..128 {
                chunk.set_block(x, y, z, rng.gen_range(0..16), rng.gen_range(0..16));
            }
            chunk.set_biome_id(x, z, rng.gen());
        }
    }

    chunk
}

#[divan::bench(args = [Compression::Zlib, Compression::Gzip])]
fn serialize(bencher: Bencher, compression: Compression) {
    let codec = PmAnvilChunkCodec::with_options(
        PmAnvilSubChunks,
        CodecOptions {
            compression,
            ..Default::default()
        },
    );
    let chunk = noisy_chunk();

    bencher.bench_local(|| black_box(codec.serialize(black_box(&chunk))));
}

#[divan::bench]
fn deserialize_pm_anvil(bencher: Bencher) {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);
    let bytes = codec.serialize(&noisy_chunk()).unwrap();

    bencher.bench_local(|| black_box(codec.deserialize(black_box(&bytes))));
}

#[divan::bench]
fn deserialize_anvil(bencher: Bencher) {
    let codec = AnvilChunkCodec::new(AnvilSubChunks);
    let bytes = codec.serialize(&noisy_chunk()).unwrap();

    bencher.bench_local(|| black_box(codec.deserialize(black_box(&bytes))));
}
