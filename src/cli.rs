// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "glow",
    about = "A product catalog and AI routine advisor for CLI and CI",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional prompt sent as a single advisor turn (shorthand for `glow chat <PROMPT>`)
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// List products, filtered by category and/or search term.
    ///
    /// Both filters combine with AND semantics; the search term matches
    /// name, brand, category, and description case-insensitively.
    /// Selected products are marked with `*`.
    Products {
        /// Show only products in this category (exact match)
        #[arg(long, short = 'C')]
        category: Option<String>,
        /// Case-insensitive substring to search for
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Output as JSON instead of a formatted table
        #[arg(long)]
        json: bool,
    },
    /// Show one product in full detail
    Show {
        /// Product id (see `glow products`)
        id: u32,
    },
    /// List the catalog categories
    Categories,
    /// Manage the selected-products set (persisted between runs)
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Generate a personalized routine from the selected products
    Routine {
        /// Render the reply as an HTML fragment instead of raw text
        #[arg(long)]
        html: bool,
    },
    /// Chat with the advisor.  With PROMPT: one turn.  Without: interactive
    /// (or one turn read from stdin when piped).
    Chat {
        #[arg(value_name = "PROMPT")]
        prompt: Option<String>,
        /// Render replies as HTML fragments instead of raw text
        #[arg(long)]
        html: bool,
    },
    /// Get or set the persisted text direction ("ltr" | "rtl")
    Direction {
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SelectAction {
    /// Add a product to the selection
    Add { id: u32 },
    /// Remove a product from the selection
    Remove { id: u32 },
    /// Add the product if absent, remove it if present
    Toggle { id: u32 },
    /// Empty the selection
    Clear,
    /// List the selected products
    Show {
        /// Output as JSON instead of a formatted list
        #[arg(long)]
        json: bool,
    },
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "glow", &mut std::io::stdout());
}

// We need this trait for stdin TTY detection
pub trait IsTerminal {
    fn is_terminal(&self) -> bool;
}

impl IsTerminal for std::io::Stdin {
    fn is_terminal(&self) -> bool {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(self.as_raw_fd()) != 0 }
    }
}
