use std::env;
use std::io;
use std::process;

use anyhow::{Context, Result};
use conlang::{init_logging, repl, Catalog, Config};
use tracing::error;

fn run() -> Result<()> {
    let config = Config::from_args(env::args().skip(1))?;
    let catalog = Catalog::scan(&config.dictionary_dir)
        .with_context(|| format!("scanning {}", config.dictionary_dir.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&catalog, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{:#}. Exiting.", e);
        process::exit(1);
    }
}
