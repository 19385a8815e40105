#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    clippy::dbg_macro
)]

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pmanvil::prelude::*;
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// File holding one compressed chunk record.
    input: PathBuf,
    /// Sub-chunk layout of the record.
    #[clap(short, long, value_enum, default_value_t = Format::PmAnvil)]
    format: Format,
    /// Write the chunk back out to this file after loading it.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Compression level for `--output`, from 0 to 9.
    #[clap(long, default_value_t = codec::DEFAULT_COMPRESSION_LEVEL)]
    level: u32,
    /// Compress `--output` with gzip instead of zlib.
    #[clap(long)]
    gzip: bool,
    /// Log more. Repeat for even more.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    /// XZY arrays, as written by PocketMine.
    PmAnvil,
    /// YZX arrays, as written by the PC edition.
    Anvil,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let max_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    let options = CodecOptions {
        compression: if cli.gzip {
            Compression::Gzip
        } else {
            Compression::Zlib
        },
        compression_level: cli.level,
    };

    match cli.format {
        Format::PmAnvil => run(&cli, PmAnvilChunkCodec::with_options(PmAnvilSubChunks, options)),
        Format::Anvil => run(&cli, AnvilChunkCodec::with_options(AnvilSubChunks, options)),
    }
}

fn run<S: SubChunkCodec>(cli: &Cli, codec: LegacyChunkCodec<S>) -> anyhow::Result<()> {
    let bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read `{}`", cli.input.display()))?;

    let chunk = match codec.deserialize(&bytes) {
        Ok(chunk) => chunk,
        Err(e) => {
            let kind = match e.kind() {
                CorruptionKind::Unreadable => "unreadable",
                CorruptionKind::StructurallyInvalid => "structurally invalid",
            };

            return Err(e).with_context(|| format!("chunk record is {kind}"));
        }
    };

    print_chunk(&chunk);

    if let Some(output) = &cli.output {
        let bytes = codec.serialize(&chunk).context("failed to serialize chunk")?;

        fs::write(output, &bytes)
            .with_context(|| format!("failed to write `{}`", output.display()))?;

        info!(path = %output.display(), len = bytes.len(), "wrote chunk");
    }

    Ok(())
}

fn print_chunk(chunk: &Chunk) {
    println!("chunk {}", chunk.pos());
    println!("  populated: {}", chunk.is_populated());

    println!("  sub-chunks:");
    for (y, sub_chunk) in chunk.sub_chunks() {
        println!(
            "    {y:>2}: {} non-air blocks",
            sub_chunk.count_non_air_blocks()
        );
    }

    let mut biomes = BTreeMap::<u8, usize>::new();
    for &id in chunk.biome_ids() {
        *biomes.entry(id).or_default() += 1;
    }

    println!("  biomes:");
    for (id, columns) in biomes {
        println!("    {id:>3}: {columns} columns");
    }

    print_blobs("entities", chunk.entities());
    print_blobs("block entities", chunk.block_entities());
}

fn print_blobs(label: &str, blobs: &[Compound]) {
    println!("  {label}: {}", blobs.len());

    for blob in blobs {
        match blob.get("id") {
            Some(Value::String(id)) => println!("    {id}"),
            Some(Value::Int(id)) => println!("    #{id}"),
            _ => println!("    <no id>"),
        }
    }
}
