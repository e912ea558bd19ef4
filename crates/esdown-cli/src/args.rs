use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the esdown binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "esdown",
    version,
    about = "Lower ES2015 for...of loops to ES5 JavaScript"
)]
pub struct CliArgs {
    /// Path to esdown.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Write lowered files to this directory.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Assume no loop ever sees an iterator object or a generator.
    #[arg(long = "no-iterators", alias = "noIterators")]
    pub no_iterators: bool,

    /// Print lowered files to stdout instead of writing them.
    #[arg(long)]
    pub stdout: bool,

    /// Never color diagnostics.
    #[arg(long = "no-color", alias = "noColor")]
    pub no_color: bool,

    /// Input files. When empty, inputs come from the configuration file.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}
