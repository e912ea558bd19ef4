use colored::Colorize;
use esdown_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;

/// Renders diagnostics as `file(line,col): error ES9001: message`.
pub struct Reporter {
    color: bool,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            line_maps: FxHashMap::default(),
        }
    }

    /// Register the text of `file` so offsets can be turned into positions.
    pub fn add_source(&mut self, file: &str, source: &str) {
        self.line_maps
            .insert(file.to_string(), LineMap::build(source));
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);
        let mut output = format!("{location}: {category}");
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// `Found 2 errors in 1 file.`
    pub fn format_summary(&self, errors: usize, files: usize) -> String {
        let errors_label = if errors == 1 { "error" } else { "errors" };
        let files_label = if files == 1 { "file" } else { "files" };
        let summary = format!("Found {errors} {errors_label} in {files} {files_label}.");
        if self.color {
            summary.bold().to_string()
        } else {
            summary
        }
    }

    fn format_location(&self, file: &str, offset: u32) -> String {
        let file_display = if file.is_empty() { "<unknown>" } else { file };
        let location = match self.line_maps.get(file) {
            Some(map) => {
                let position = map.offset_to_position(offset);
                format!(
                    "{file_display}({},{})",
                    position.line + 1,
                    position.character + 1
                )
            }
            None => file_display.to_string(),
        };
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }
        let label = format!("ES{code}");
        if self.color {
            label.dimmed().to_string()
        } else {
            label
        }
    }
}

#[cfg(test)]
#[path = "../tests/reporter.rs"]
mod tests;
