use std::hint::black_box;

use divan::Bencher;
use pmanvil::chunk::{reorder_byte_array, reorder_nibble_array, BLOCK_COUNT, NIBBLE_ARRAY_LEN};
use rand::Rng;

#[divan::bench]
fn reorder_bytes(bencher: Bencher) {
    let mut rng = rand::thread_rng();

    bencher
        .with_inputs(|| {
            let mut array = Box::new([0_u8; BLOCK_COUNT]);
            rng.fill(array.as_mut_slice());
            array
        })
        .bench_local_refs(|array| black_box(reorder_byte_array(array)));
}

#[divan::bench]
fn reorder_nibbles(bencher: Bencher) {
    let mut rng = rand::thread_rng();

    bencher
        .with_inputs(|| {
            let mut array = Box::new([0_u8; NIBBLE_ARRAY_LEN]);
            rng.fill(array.as_mut_slice());
            array
        })
        .bench_local_refs(|array| black_box(reorder_nibble_array(array)));
}
