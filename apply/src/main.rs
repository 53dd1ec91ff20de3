use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::PathBuf;

use clap::Parser;
use linmod::{Model, Scorer};

#[derive(Parser, Debug)]
#[command(about = "A program to score documents with a trained model.")]
struct Args {
    /// The gzipped model file to use when scoring text
    model: PathBuf,

    /// Documents to score, one per line
    documents: PathBuf,
}

fn largest(scores: &[f64]) -> usize {
    let mut max_index = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[max_index] {
            max_index = i;
        }
    }
    max_index
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = BufReader::new(File::open(args.model)?);
    let model = Model::read(&mut f)?;
    eprintln!("{model}");
    let scorer = Scorer::new(model)?;

    let f = BufReader::new(File::open(args.documents)?);
    for line in f.lines() {
        let document = line?;
        let scores = scorer.class_log_likelihoods(&document);
        let formatted = scores
            .iter()
            .map(|score| format!("{score:.4}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}\t{}\t{}", largest(&scores), formatted, document);
    }

    Ok(())
}
