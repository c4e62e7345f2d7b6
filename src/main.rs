//! `sentimento` command-line shell.

mod cli;

use sentimento::logging;

fn main() {
    if let Err(err) = logging::init() {
        logging::init_stderr_only();
        tracing::warn!("File logging disabled: {err}");
    }
    if let Err(err) = cli::run(std::env::args().skip(1).collect()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
