//! `esdown.json` loading, option resolution and input discovery.

use anyhow::{Context, Result, bail};
use esdown_binder::ScopeOptions;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const CONFIG_FILE_NAME: &str = "esdown.json";

/// Extensions picked up when walking an `include` directory.
const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Accept both `true` and `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EsdownConfig {
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub has_iterators: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub has_generators: Option<bool>,
    #[serde(default)]
    pub out_dir: Option<String>,
}

/// Options after combining the configuration file with CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Program-scope defaults handed to the binder.
    pub scope_defaults: ScopeOptions,
    pub out_dir: Option<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<EsdownConfig> {
    let config = serde_json::from_str(source).context("failed to parse esdown.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<EsdownConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Locate the configuration file.
///
/// An explicit `--project` must exist (a directory means its
/// `esdown.json`); otherwise `esdown.json` in `cwd` is used when present.
pub fn find_config(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };
    let project = cwd.join(project);
    let path = if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project
    };
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    Ok(Some(path))
}

pub fn resolve_compiler_options(
    options: Option<&CompilerOptions>,
    base_dir: &Path,
) -> ResolvedOptions {
    let Some(options) = options else {
        return ResolvedOptions::default();
    };
    ResolvedOptions {
        scope_defaults: ScopeOptions {
            has_iterators: options.has_iterators,
            has_generators: options.has_generators,
        },
        out_dir: options.out_dir.as_deref().map(|dir| base_dir.join(dir)),
    }
}

/// Input files named by `files` and `include`, resolved against `base_dir`.
///
/// `include` entries that are directories are walked recursively for
/// JavaScript sources; duplicates keep their first position.
pub fn resolve_input_files(config: &EsdownConfig, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for file in config.files.iter().flatten() {
        let path = base_dir.join(file);
        if !path.is_file() {
            bail!("file listed in config not found: {}", path.display());
        }
        push_unique(&mut inputs, path);
    }

    for entry in config.include.iter().flatten() {
        let path = base_dir.join(entry);
        if path.is_file() {
            push_unique(&mut inputs, path);
            continue;
        }
        if !path.is_dir() {
            warn!(path = %path.display(), "include entry matches nothing");
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(&path).follow_links(true) {
            let entry =
                entry.with_context(|| format!("failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        debug!(dir = %path.display(), files = found.len(), "walked include directory");
        for file in found {
            push_unique(&mut inputs, file);
        }
    }
    Ok(inputs)
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn push_unique(inputs: &mut Vec<PathBuf>, path: PathBuf) {
    if !inputs.contains(&path) {
        inputs.push(path);
    }
}

#[cfg(test)]
#[path = "../tests/config.rs"]
mod tests;
