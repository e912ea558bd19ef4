//! Per-invocation driver: resolve configuration, transpile every input in
//! parallel, then write outputs.
//!
//! Files share nothing, so each one gets its own parser, binder, pool and
//! edit buffer inside the rayon worker.

use anyhow::{Context, Result, bail};
use esdown_common::Diagnostic;
use esdown_emitter::{EmitContext, TranspileOutput, transpile};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use crate::args::CliArgs;
use crate::config::{
    EsdownConfig, ResolvedOptions, find_config, load_config, resolve_compiler_options,
    resolve_input_files,
};

/// Outcome for one input file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Name used in diagnostics.
    pub file_name: String,
    pub source: String,
    pub output_text: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Where the output was written, when it was.
    pub written: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct CompilationResult {
    pub files: Vec<FileOutcome>,
}

impl CompilationResult {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(Diagnostic::is_error)
    }

    #[must_use]
    pub fn emitted_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter_map(|file| file.written.clone())
            .collect()
    }

    /// Lowered text of files that were not written to disk, in input order.
    pub fn printed_outputs(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(|file| file.written.is_none())
            .filter_map(|file| file.output_text.as_deref())
    }
}

pub fn compile(args: &CliArgs, cwd: &Path) -> Result<CompilationResult> {
    let config_path = find_config(cwd, args.project.as_deref())?;
    let (config, base_dir) = match &config_path {
        Some(path) => (
            load_config(path)?,
            path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf),
        ),
        None => (EsdownConfig::default(), cwd.to_path_buf()),
    };

    let mut options = resolve_compiler_options(config.compiler_options.as_ref(), &base_dir);
    apply_cli_overrides(&mut options, args, cwd);

    let inputs = if args.files.is_empty() {
        resolve_input_files(&config, &base_dir)?
    } else {
        args.files.iter().map(|file| cwd.join(file)).collect()
    };
    if inputs.is_empty() {
        bail!("no input files");
    }

    let _span = info_span!("compile", files = inputs.len()).entered();
    debug!(?config_path, ?options, "resolved options");

    let ctx = EmitContext::new(options.scope_defaults);
    let mut files = inputs
        .par_iter()
        .map(|input| transpile_file(input, cwd, &ctx))
        .collect::<Result<Vec<_>>>()?;

    let out_dir = options.out_dir.as_deref().filter(|_| !args.stdout);
    if let Some(out_dir) = out_dir {
        assign_output_paths(&mut files, out_dir)?;
        write_outputs(&files)?;
    }
    Ok(CompilationResult { files })
}

pub fn apply_cli_overrides(options: &mut ResolvedOptions, args: &CliArgs, cwd: &Path) {
    if args.no_iterators {
        options.scope_defaults.has_iterators = Some(false);
        options.scope_defaults.has_generators = Some(false);
    }
    if let Some(out_dir) = &args.out_dir {
        options.out_dir = Some(cwd.join(out_dir));
    }
}

fn transpile_file(input: &Path, cwd: &Path, ctx: &EmitContext) -> Result<FileOutcome> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let file_name = input
        .strip_prefix(cwd)
        .unwrap_or(input)
        .display()
        .to_string();
    let TranspileOutput {
        output_text,
        diagnostics,
    } = transpile(&file_name, &source, ctx);
    Ok(FileOutcome {
        input: input.to_path_buf(),
        file_name,
        source,
        output_text,
        diagnostics,
        written: None,
    })
}

/// Outputs land at `<out_dir>/<file name>`; two inputs with the same file
/// name cannot share a directory.
fn assign_output_paths(files: &mut [FileOutcome], out_dir: &Path) -> Result<()> {
    let mut claimed: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    for file in files.iter() {
        let Some(name) = file.input.file_name() else {
            bail!("input has no file name: {}", file.input.display());
        };
        let target = out_dir.join(name);
        if let Some(previous) = claimed.insert(target.clone(), &file.input) {
            bail!(
                "{} and {} both write {}",
                previous.display(),
                file.input.display(),
                target.display()
            );
        }
    }
    for file in files.iter_mut() {
        if file.output_text.is_some()
            && let Some(name) = file.input.file_name()
        {
            file.written = Some(out_dir.join(name));
        }
    }
    Ok(())
}

fn write_outputs(files: &[FileOutcome]) -> Result<()> {
    files.par_iter().try_for_each(|file| -> Result<()> {
        let (Some(path), Some(text)) = (&file.written, &file.output_text) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    })
}

#[cfg(test)]
#[path = "../tests/driver.rs"]
mod tests;
