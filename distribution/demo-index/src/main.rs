//! Demo index generator.
//!
//! Writes an `index.json` in the shape the widget fetches, so a demo site
//! (or a local test server) has something to search against.
//!
//! Build with: cargo build
//! Run with: cargo run -p demo-index -- --count 50 --output index.json

use anyhow::{Context, Result};
use clap::Parser;
use ferret::Document;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of documents to generate
    #[arg(short, long, default_value_t = 50)]
    count: usize,

    /// Path to write the JSON index
    #[arg(short, long, default_value = "index.json")]
    output: PathBuf,

    /// RNG seed, for reproducible indexes
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

const TOPICS: &[&str] = &[
    "Rust", "WebAssembly", "Sourdough", "Gardening", "Telescopes", "Kayaking",
    "Espresso", "Letterpress", "Bouldering", "Synthesizers", "Bonsai", "Chess",
];

const KINDS: &[&str] = &[
    "Intro to", "Advanced", "A Field Guide to", "Notes on", "Troubleshooting",
    "The Economics of", "Weekend Projects:",
];

const SENTENCES: &[&str] = &[
    "A practical walkthrough with worked examples and common pitfalls.",
    "We compare the three most popular approaches and when each wins.",
    "Everything we learned after a year of doing this badly.",
    "Start here if you have never touched the subject before.",
    "A deep dive into the details nobody writes down.",
    "Checklists, reference tables, and a printable cheat sheet.",
];

fn generate(count: usize, rng: &mut StdRng) -> Vec<Document> {
    (0..count)
        .map(|i| {
            let topic = TOPICS.choose(rng).unwrap();
            let kind = KINDS.choose(rng).unwrap();
            let title = format!("{kind} {topic}");
            let body: String = (0..rng.gen_range(2..5))
                .map(|_| *SENTENCES.choose(rng).unwrap())
                .collect::<Vec<_>>()
                .join(" ");
            let slug = topic.to_lowercase();
            Document::new(title, body, format!("/posts/{slug}-{i}"))
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let docs = generate(args.count, &mut rng);

    let json = serde_json::to_string_pretty(&docs).context("serializing index")?;
    fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("wrote {} documents to {}", docs.len(), args.output.display());
    Ok(())
}
