//! Conversion between the XZY block order used by [`SubChunk`] and the YZX
//! order used by PC Anvil worlds.
//!
//! Both orders index a block with three 4-bit coordinates, so converting is a
//! matter of swapping the top and bottom nibble of the index. The swap is its
//! own inverse: the same functions convert in either direction.
//!
//! [`SubChunk`]: crate::SubChunk

use crate::{BLOCK_COUNT, NIBBLE_ARRAY_LEN};

/// Reorders a one-byte-per-block array between XZY and YZX order.
pub fn reorder_byte_array(array: &[u8; BLOCK_COUNT]) -> Box<[u8; BLOCK_COUNT]> {
    let mut result = Box::new(*array);

    if array.iter().any(|&b| b != array[0]) {
        for (idx, &b) in array.iter().enumerate() {
            result[swap_xy(idx)] = b;
        }
    }

    result
}

/// Reorders a nibble-per-block array between XZY and YZX order.
pub fn reorder_nibble_array(array: &[u8; NIBBLE_ARRAY_LEN]) -> Box<[u8; NIBBLE_ARRAY_LEN]> {
    let first = array[0];
    if first >> 4 == first & 0xf && array.iter().all(|&b| b == first) {
        // Uniform arrays are unaffected by the transposition.
        return Box::new(*array);
    }

    let mut result = Box::new([0; NIBBLE_ARRAY_LEN]);

    for idx in 0..BLOCK_COUNT {
        let value = (array[idx >> 1] >> ((idx & 1) << 2)) & 0xf;
        let dest = swap_xy(idx);
        result[dest >> 1] |= value << ((dest & 1) << 2);
    }

    result
}

const fn swap_xy(idx: usize) -> usize {
    ((idx & 0xf) << 8) | (idx & 0xf0) | (idx >> 8)
}
