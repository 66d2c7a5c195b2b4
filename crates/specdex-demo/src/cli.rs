#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo browser.
//!
//! Parses args manually (no external dependencies) to keep the binary
//! lean. Supports environment variable overrides via `SPECDEX_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
specdex-demo: browsable species catalog in the terminal

USAGE:
    specdex-demo [OPTIONS]

OPTIONS:
    --address=QUERY      Initial address query string (e.g. '?q=pig&sort=atk')
    --catalog=FILE       Load species from a JSON file (default: built-in sample)
    --item-height=N      Rows per list item (default: 2)
    --no-mouse           Disable mouse event capture
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    type / backspace     Edit the search text
    Up / Down            Activate and move the highlighted entry
    PageUp / PageDown    Scroll by one screen
    Home / End           Jump to the top / bottom
    Tab / Shift-Tab      Cycle the sort key
    Ctrl+T               Cycle the type filter
    Enter                Open the highlighted entry's detail view
    Esc / Ctrl+C         Quit

ENVIRONMENT VARIABLES:
    SPECDEX_ADDRESS      Override --address
    SPECDEX_CATALOG      Override --catalog
    SPECDEX_ITEM_HEIGHT  Override --item-height
    SPECDEX_LOG          tracing filter; logs go to ./specdex.log";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Initial address query string.
    pub address: String,
    /// Catalog file; `None` uses the built-in sample.
    pub catalog: Option<PathBuf>,
    /// Rows per list item.
    pub item_height: u32,
    /// Whether to capture mouse events.
    pub mouse: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            address: String::new(),
            catalog: None,
            item_height: 2,
            mouse: true,
        }
    }
}

impl Opts {
    /// Parse `std::env::args`, exiting on `--help`/`--version`/errors.
    #[must_use]
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(address) = env::var("SPECDEX_ADDRESS") {
            opts.address = address;
        }
        if let Ok(catalog) = env::var("SPECDEX_CATALOG") {
            opts.catalog = Some(PathBuf::from(catalog));
        }
        if let Ok(height) = env::var("SPECDEX_ITEM_HEIGHT")
            && let Ok(height) = height.parse()
        {
            opts.item_height = height;
        }

        for arg in env::args().skip(1) {
            if let Some(value) = arg.strip_prefix("--address=") {
                opts.address = value.to_string();
            } else if let Some(value) = arg.strip_prefix("--catalog=") {
                opts.catalog = Some(PathBuf::from(value));
            } else if let Some(value) = arg.strip_prefix("--item-height=") {
                match value.parse::<u32>() {
                    Ok(height) if height >= 1 => opts.item_height = height,
                    _ => {
                        eprintln!("specdex-demo: invalid --item-height value: {value}");
                        process::exit(2);
                    }
                }
            } else if arg == "--no-mouse" {
                opts.mouse = false;
            } else if arg == "--help" || arg == "-h" {
                println!("{HELP_TEXT}");
                process::exit(0);
            } else if arg == "--version" || arg == "-V" {
                println!("specdex-demo {VERSION}");
                process::exit(0);
            } else {
                eprintln!("specdex-demo: unknown argument: {arg}\n\n{HELP_TEXT}");
                process::exit(2);
            }
        }

        opts
    }
}
