use std::fmt;

/// Number of blocks in a 16×16×16 sub-chunk.
pub const BLOCK_COUNT: usize = 16 * 16 * 16;

/// Length in bytes of a packed 4-bit-per-block array.
pub const NIBBLE_ARRAY_LEN: usize = BLOCK_COUNT / 2;

/// Sky light every block starts with.
const FULL_SKY_LIGHT: u8 = 0xff;

/// One 16×16×16 slice of a chunk.
///
/// Every array is indexed in XZY order: the block at `(x, y, z)` lives at
/// `(x << 8) | (z << 4) | y`. The nibble arrays hold two blocks per byte with
/// even `y` in the low nibble.
#[derive(Clone, PartialEq, Eq)]
pub struct SubChunk {
    ids: Box<[u8; BLOCK_COUNT]>,
    data: Box<[u8; NIBBLE_ARRAY_LEN]>,
    sky_light: Box<[u8; NIBBLE_ARRAY_LEN]>,
    block_light: Box<[u8; NIBBLE_ARRAY_LEN]>,
}

impl SubChunk {
    /// An all-air sub-chunk with full sky light and no block light.
    pub fn new() -> Self {
        Self {
            ids: Box::new([0; BLOCK_COUNT]),
            data: Box::new([0; NIBBLE_ARRAY_LEN]),
            sky_light: Box::new([FULL_SKY_LIGHT; NIBBLE_ARRAY_LEN]),
            block_light: Box::new([0; NIBBLE_ARRAY_LEN]),
        }
    }

    /// Builds a sub-chunk from raw XZY arrays.
    pub fn from_arrays(
        ids: Box<[u8; BLOCK_COUNT]>,
        data: Box<[u8; NIBBLE_ARRAY_LEN]>,
        sky_light: Box<[u8; NIBBLE_ARRAY_LEN]>,
        block_light: Box<[u8; NIBBLE_ARRAY_LEN]>,
    ) -> Self {
        Self {
            ids,
            data,
            sky_light,
            block_light,
        }
    }

    /// Returns `true` if the sub-chunk holds only air and carries the default
    /// lighting, i.e. it is indistinguishable from [`SubChunk::new`].
    pub fn is_empty(&self) -> bool {
        self.is_air_only()
            && self.sky_light.iter().all(|&b| b == FULL_SKY_LIGHT)
            && self.block_light.iter().all(|&b| b == 0)
    }

    /// Returns `true` if every block id is air, ignoring light.
    pub fn is_air_only(&self) -> bool {
        self.ids.iter().all(|&id| id == 0)
    }

    pub fn count_non_air_blocks(&self) -> usize {
        self.ids.iter().filter(|&&id| id != 0).count()
    }

    #[track_caller]
    pub fn block_id(&self, x: u32, y: u32, z: u32) -> u8 {
        self.ids[block_idx(x, y, z)]
    }

    #[track_caller]
    pub fn set_block_id(&mut self, x: u32, y: u32, z: u32, id: u8) {
        self.ids[block_idx(x, y, z)] = id;
    }

    #[track_caller]
    pub fn block_data(&self, x: u32, y: u32, z: u32) -> u8 {
        get_nibble(&self.data, block_idx(x, y, z))
    }

    #[track_caller]
    pub fn set_block_data(&mut self, x: u32, y: u32, z: u32, data: u8) {
        set_nibble(&mut self.data, block_idx(x, y, z), data);
    }

    /// Sets the id and 4-bit data value of a block in one go.
    #[track_caller]
    pub fn set_block(&mut self, x: u32, y: u32, z: u32, id: u8, data: u8) {
        let idx = block_idx(x, y, z);
        self.ids[idx] = id;
        set_nibble(&mut self.data, idx, data);
    }

    #[track_caller]
    pub fn sky_light(&self, x: u32, y: u32, z: u32) -> u8 {
        get_nibble(&self.sky_light, block_idx(x, y, z))
    }

    #[track_caller]
    pub fn set_sky_light(&mut self, x: u32, y: u32, z: u32, level: u8) {
        set_nibble(&mut self.sky_light, block_idx(x, y, z), level);
    }

    #[track_caller]
    pub fn block_light(&self, x: u32, y: u32, z: u32) -> u8 {
        get_nibble(&self.block_light, block_idx(x, y, z))
    }

    #[track_caller]
    pub fn set_block_light(&mut self, x: u32, y: u32, z: u32, level: u8) {
        set_nibble(&mut self.block_light, block_idx(x, y, z), level);
    }

    pub fn block_id_array(&self) -> &[u8; BLOCK_COUNT] {
        &self.ids
    }

    pub fn block_data_array(&self) -> &[u8; NIBBLE_ARRAY_LEN] {
        &self.data
    }

    pub fn sky_light_array(&self) -> &[u8; NIBBLE_ARRAY_LEN] {
        &self.sky_light
    }

    pub fn block_light_array(&self) -> &[u8; NIBBLE_ARRAY_LEN] {
        &self.block_light
    }
}

impl Default for SubChunk {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChunk")
            .field("non_air_blocks", &self.count_non_air_blocks())
            .finish_non_exhaustive()
    }
}

#[track_caller]
fn block_idx(x: u32, y: u32, z: u32) -> usize {
    assert!(
        x < 16 && y < 16 && z < 16,
        "sub-chunk block offsets of ({x}, {y}, {z}) are out of bounds"
    );

    ((x << 8) | (z << 4) | y) as usize
}

fn get_nibble(array: &[u8; NIBBLE_ARRAY_LEN], idx: usize) -> u8 {
    (array[idx >> 1] >> ((idx & 1) << 2)) & 0xf
}

fn set_nibble(array: &mut [u8; NIBBLE_ARRAY_LEN], idx: usize, value: u8) {
    let shift = (idx & 1) << 2;
    let byte = &mut array[idx >> 1];
    *byte = (*byte & !(0xf << shift)) | ((value & 0xf) << shift);
}
