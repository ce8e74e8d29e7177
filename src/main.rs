use clap::Parser;

use wellness::cli::{self, output, Cli};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}
