#![forbid(unsafe_code)]

//! specdex-demo binary entry point.

mod app;
mod catalog;
mod cli;
mod render;

use std::env;
use std::fs::File;
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // Raw-mode stdout is off limits for logs; write to a file instead,
    // and only when the operator asked for logging at all.
    let Ok(filter) = env::var("SPECDEX_LOG") else {
        return;
    };
    let Ok(file) = File::create("specdex.log") else {
        eprintln!("specdex-demo: cannot create specdex.log; logging disabled");
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_tracing();

    let species = match catalog::load(opts.catalog.as_deref()) {
        Ok(species) => species,
        Err(e) => {
            eprintln!("specdex-demo: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = app::run(&species, &opts) {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}
