use cww::constant_weight_word;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Samples a constant-weight binary word", long_about = None)]
struct Args {
    /// Number of zero bits in the word
    #[clap(short, long, value_parser)]
    zeros: usize,
    /// Number of one bits in the word
    #[clap(short = 'w', long, value_parser)]
    weight: usize,
    /// Seed of the position generator; entropy-seeded if absent
    #[clap(short, long, value_parser)]
    seed: Option<u64>,
    /// Write the bincode-serialized word to this file
    #[clap(short, long, value_parser)]
    output: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let positions: Vec<usize> = (0..args.weight)
        .map(|i| rng.gen_range(0..=args.zeros + i))
        .collect();

    let word = constant_weight_word(args.zeros, &positions)
        .expect("generated positions are always in range");

    let bits: String = word.iter().map(|bit| if bit { '1' } else { '0' }).collect();
    println!("insertions: {:?}", positions);
    println!("word: {}", bits);
    println!("ones at: {:?}", word.ones().collect::<Vec<_>>());

    if let Some(path) = args.output {
        let serialized = bincode::serialize(&word).expect("word serialization cannot fail");
        std::fs::write(&path, &serialized).expect("cannot write the output file");
        println!("word written to {} ({} bytes)", path, serialized.len());
    }
}
