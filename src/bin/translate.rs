use std::env;
use std::process;

use anyhow::{Context, Result};
use conlang::{init_logging, translate, Dictionary};
use tracing::info;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        let program = args.first().map_or(env!("CARGO_BIN_NAME"), String::as_str);
        eprintln!("Usage: {} <dictionary_file> <text>", program);
        process::exit(1);
    }

    let dict_path = &args[1];
    let input_text = &args[2];

    let dict = Dictionary::load(dict_path)
        .with_context(|| format!("Failed to load dictionary {}", dict_path))?;
    info!("Loaded {} dictionary entries", dict.len());

    println!("{}", translate(input_text, &dict));
    Ok(())
}
