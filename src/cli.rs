use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dompick", version)]
#[command(about = "Search a catalog of temporary mail domains and copy one to the clipboard", long_about = None)]
pub struct Cli {
    /// Read domains from this file instead of the configured or built-in list
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every domain in the catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the domains containing QUERY (case-insensitive)
    Search {
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
