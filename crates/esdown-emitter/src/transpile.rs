//! One-call entry point: parse, bind, lower.

use crate::emit_context::EmitContext;
use crate::lowering_pass::LoweringPass;
use esdown_binder::Binder;
use esdown_common::Diagnostic;
use esdown_parser::ParserState;
use tracing::{debug, debug_span};

/// Result of transpiling one file. `output_text` is `None` when any error
/// was reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranspileOutput {
    pub output_text: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TranspileOutput {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Lower every `for...of` in `source` to ES5.
#[must_use]
pub fn transpile(file_name: &str, source: &str, ctx: &EmitContext) -> TranspileOutput {
    let _span = debug_span!("transpile", file = file_name).entered();

    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    if !parser.get_diagnostics().is_empty() {
        let diagnostics: Vec<Diagnostic> = parser
            .get_diagnostics()
            .iter()
            .map(|diag| {
                Diagnostic::error(
                    file_name.to_string(),
                    diag.start,
                    diag.length,
                    diag.message.clone(),
                    diag.code,
                )
            })
            .collect();
        debug!(errors = diagnostics.len(), "parse failed");
        return TranspileOutput {
            output_text: None,
            diagnostics,
        };
    }

    let arena = parser.into_arena();
    let scopes = Binder::bind(&arena, root, source, ctx.scope_defaults);
    match LoweringPass::new(&arena, &scopes, source).run(root) {
        Ok(text) => TranspileOutput {
            output_text: Some(text),
            diagnostics: Vec::new(),
        },
        Err(err) => {
            debug!(%err, "lowering failed");
            TranspileOutput {
                output_text: None,
                diagnostics: vec![err.to_diagnostic(file_name)],
            }
        }
    }
}
