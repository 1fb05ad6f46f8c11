use std::sync::Arc;

use swc_core::common::{SourceMapper, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `type` is bound to something other than a string literal.
    BoundType,
    /// The properties argument has no static shape (not an object literal, or spread over `type`).
    UnknownProps,
    SpreadArguments,
    /// The configuration-definition call got something other than an object literal.
    NonLiteralConfig,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub site: String,
    pub message: String,
}

/// Advisory warnings. Nothing recorded here stops the pass.
pub struct Diagnostics {
    source_map: Option<Arc<dyn SourceMapper>>,
    records: Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Diagnostics {
    pub fn new(source_map: Option<Arc<dyn SourceMapper>>) -> Self {
        Self {
            source_map,
            records: vec![],
        }
    }

    pub fn warn(&mut self, kind: DiagnosticKind, span: Span, message: &str) {
        let site = self.site(span);
        let message = format!("[FormKit de-opt] {message}");
        tracing::warn!(site = %site, kind = ?kind, "{}", message);
        self.records.push(Diagnostic {
            kind,
            site,
            message,
        });
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.records.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }

    fn site(&self, span: Span) -> String {
        if span.is_dummy() {
            return "unknown:0".to_string();
        }
        match self.source_map {
            Some(ref cm) => {
                let lo = cm.lookup_char_pos(span.lo());
                format!("{}:{}", normalize_filename(&lo.file.name.to_string()), lo.line)
            }
            None => "unknown:0".to_string(),
        }
    }
}

fn normalize_filename(filename: &str) -> String {
    let s = filename.replace('\\', "/");
    if let Some(rest) = s.strip_prefix("file://") {
        return rest.to_string();
    }
    s
}
