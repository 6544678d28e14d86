use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar to convert
    pub input: PathBuf,

    /// File to write the converted grammar to
    pub output: PathBuf,

    /// Print declared and reachable nonterminals before converting
    #[arg(short, long)]
    pub reachability: bool,
}
