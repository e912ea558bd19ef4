#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use esdown_cli::args::CliArgs;
use esdown_cli::{driver, reporter::Reporter, tracing_config};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;

fn main() -> Result<()> {
    // Zero cost unless ESDOWN_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::compile(&args, &cwd)?;

    let mut stdout = std::io::stdout().lock();
    for text in result.printed_outputs() {
        stdout
            .write_all(text.as_bytes())
            .context("failed to write to stdout")?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n").context("failed to write to stdout")?;
        }
    }
    stdout.flush().context("failed to flush stdout")?;

    let diagnostics: Vec<_> = result.diagnostics().cloned().collect();
    if diagnostics.is_empty() {
        std::process::exit(EXIT_SUCCESS);
    }

    let color = !args.no_color && std::io::stderr().is_terminal();
    let mut reporter = Reporter::new(color);
    for file in &result.files {
        reporter.add_source(&file.file_name, &file.source);
    }
    eprintln!("{}", reporter.render(&diagnostics));

    let failed_files = result
        .files
        .iter()
        .filter(|file| file.diagnostics.iter().any(|diag| diag.is_error()))
        .count();
    let errors = diagnostics.iter().filter(|diag| diag.is_error()).count();
    eprintln!();
    eprintln!("{}", reporter.format_summary(errors, failed_files));

    std::process::exit(if result.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    });
}
