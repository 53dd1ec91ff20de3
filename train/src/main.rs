use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use linmod::{Corpus, Trainer};

#[derive(Parser, Debug)]
#[command(about = "A program to train linear n-gram models.")]
struct Args {
    /// Labeled training data, one `<label>\t<document>` per line
    corpus: PathBuf,

    /// The file to write the gzipped model to
    model: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading corpus...");
    let f = BufReader::new(File::open(args.corpus)?);
    let corpus = Corpus::from_reader(f)?;
    eprintln!("# of examples: {}", corpus.len());

    eprintln!("Start training...");
    let model = Trainer::new()?.train(corpus)?;
    eprintln!("Finish training.");

    let mut f = File::create(args.model)?;
    model.write(&mut f)?;

    Ok(())
}
