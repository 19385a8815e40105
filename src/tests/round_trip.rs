use pretty_assertions::assert_eq;

use crate::prelude::*;

fn sample_chunk() -> Chunk {
    let mut chunk = Chunk::empty(ChunkPos::new(-7, 22));

    for y in 0..48 {
        chunk.set_block(y % 16, y, 15 - y % 16, 1 + (y % 3) as u8, (y % 16) as u8);
    }
    chunk.set_block(8, 200, 8, 89, 0);
    chunk.sub_chunk_mut(12).set_block_light(8, 8, 8, 15);

    for x in 0..16 {
        for z in 0..16 {
            chunk.set_biome_id(x, z, (x * 16 + z) as u8);
        }
    }

    chunk.entities_mut().push(compound! {
        "id" => "Sheep",
        "Pos" => List::Double(vec![-100.5, 65.0, 360.5]),
        "Color" => 4_i8,
    });
    chunk.entities_mut().push(compound! { "id" => "Item", "Age" => 20_i16 });
    chunk.block_entities_mut().push(compound! {
        "id" => "Sign",
        "x" => -100,
        "y" => 65,
        "z" => 360,
        "Text1" => "hello",
    });

    chunk.set_populated(true);
    chunk
}

#[test]
fn round_trip_keeps_chunk_contents() {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);
    let chunk = sample_chunk();

    let loaded = codec.deserialize(&codec.serialize(&chunk).unwrap()).unwrap();

    assert_eq!(loaded.x(), -7);
    assert_eq!(loaded.z(), 22);
    assert!(loaded.is_populated());
    assert!(loaded.is_generated());
    assert_eq!(loaded.entities(), chunk.entities());
    assert_eq!(loaded.block_entities(), chunk.block_entities());
    assert_eq!(loaded.biome_ids(), chunk.biome_ids());
    assert_eq!(
        loaded.sub_chunks().keys().copied().collect::<Vec<u8>>(),
        [0, 1, 2, 12]
    );
    assert_eq!(loaded.sub_chunks(), chunk.sub_chunks());
}

#[test]
fn generated_is_forced_on_load() {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);
    let mut chunk = sample_chunk();
    chunk.set_generated(false);

    let loaded = codec.deserialize(&codec.serialize(&chunk).unwrap()).unwrap();

    assert!(loaded.is_generated());

    chunk.set_generated(true);
    assert_eq!(loaded, chunk);
}

#[test]
fn empty_sub_chunk_is_not_written() {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);

    let mut chunk = Chunk::empty(ChunkPos::new(0, 0));
    chunk.set_block(3, 3, 3, 7, 0);
    chunk.sub_chunk_mut(5);
    assert!(chunk.sub_chunk(5).is_some_and(SubChunk::is_empty));

    let Some(Value::Compound(level)) = codec.chunk_to_nbt(&chunk).remove("Level") else {
        panic!("missing Level");
    };
    let Some(Value::List(List::Compound(sections))) = level.get("Sections") else {
        panic!("missing Sections");
    };
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].get("Y"), Some(&Value::Byte(0)));

    let loaded = codec.deserialize(&codec.serialize(&chunk).unwrap()).unwrap();
    assert!(loaded.sub_chunk(5).is_none());
    assert!(loaded.sub_chunk(0).is_some());
}

#[test]
fn unpopulated_chunk_stays_unpopulated() {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);
    let chunk = Chunk::empty(ChunkPos::new(1, 1));

    let Some(Value::Compound(level)) = codec.chunk_to_nbt(&chunk).remove("Level") else {
        panic!("missing Level");
    };
    assert_eq!(level.get("TerrainPopulated"), Some(&Value::Byte(0)));

    let loaded = codec.deserialize(&codec.serialize(&chunk).unwrap()).unwrap();
    assert!(!loaded.is_populated());
}

#[test]
fn gzip_records_load_without_configuration() {
    let writer = PmAnvilChunkCodec::with_options(
        PmAnvilSubChunks,
        CodecOptions {
            compression: Compression::Gzip,
            compression_level: 9,
        },
    );
    let reader = PmAnvilChunkCodec::new(PmAnvilSubChunks);
    let chunk = sample_chunk();

    let bytes = writer.serialize(&chunk).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    let loaded = reader.deserialize(&bytes).unwrap();
    assert_eq!(loaded.sub_chunks(), chunk.sub_chunks());
}

#[test]
fn every_compression_level_round_trips() {
    let chunk = sample_chunk();

    for compression_level in [0, 1, 7, 9, 42] {
        let codec = PmAnvilChunkCodec::with_options(
            PmAnvilSubChunks,
            CodecOptions {
                compression_level,
                ..Default::default()
            },
        );

        let loaded = codec.deserialize(&codec.serialize(&chunk).unwrap()).unwrap();
        assert_eq!(loaded.sub_chunks(), chunk.sub_chunks());
    }
}

#[test]
fn deserialize_at_checks_position() {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);
    let bytes = codec.serialize(&sample_chunk()).unwrap();

    assert!(codec.deserialize_at(&bytes, ChunkPos::new(-7, 22)).is_ok());

    let err = codec
        .deserialize_at(&bytes, ChunkPos::new(-7, 23))
        .unwrap_err();
    assert!(matches!(
        err,
        CorruptedChunk::PositionMismatch {
            expected: ChunkPos { x: -7, z: 23 },
            found: ChunkPos { x: -7, z: 22 },
        }
    ));
    assert_eq!(err.kind(), CorruptionKind::StructurallyInvalid);
}

#[test]
fn codec_is_shareable_across_threads() {
    let codec = PmAnvilChunkCodec::new(PmAnvilSubChunks);

    std::thread::scope(|s| {
        for x in 0..4 {
            let codec = &codec;
            s.spawn(move || {
                let mut chunk = Chunk::empty(ChunkPos::new(x, -x));
                chunk.set_block(0, x as u32, 0, 1, 0);

                let loaded = codec.deserialize(&codec.serialize(&chunk).unwrap()).unwrap();
                assert_eq!(loaded.pos(), chunk.pos());
                assert_eq!(loaded.block_id(0, x as u32, 0), 1);
            });
        }
    });
}
