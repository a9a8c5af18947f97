//! Formatting pass over the rendered TypeScript using swc.
//!
//! The text is parsed as a TypeScript module and printed back through the
//! swc code generator. Text that does not parse is kept as-is and the
//! failure is reported as a [`FormatDiagnostic`].

use std::fmt;
use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::codegen::{text_writer::JsWriter, Config as CodegenConfig, Emitter};
use swc_core::ecma::parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

const FILE_NAME: &str = "resolvers.ts";

/// Why the generated text could not be formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDiagnostic {
    /// 1-based line and 0-based column of the first syntax error
    pub line_column: Option<(usize, usize)>,
    pub message: String,
}

impl fmt::Display for FormatDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_column {
            Some((line, column)) => write!(f, "{FILE_NAME}:{line}:{column}: {}", self.message),
            None => write!(f, "{FILE_NAME}: {}", self.message),
        }
    }
}

/// Text after formatting, with diagnostics when formatting was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub code: String,
    pub diagnostics: Vec<FormatDiagnostic>,
}

impl GeneratedOutput {
    #[must_use]
    pub const fn unformatted(code: String) -> Self {
        Self {
            code,
            diagnostics: Vec::new(),
        }
    }
}

/// Parse and reprint `source`. On any syntax error the source is returned
/// unchanged with exactly one diagnostic.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn format_typescript(source: &str) -> GeneratedOutput {
    match reprint(source) {
        Ok(code) => GeneratedOutput::unformatted(code),
        Err(diagnostic) => {
            tracing::warn!(%diagnostic, "Generated TypeScript failed to parse, leaving it unformatted");
            GeneratedOutput {
                code: source.to_string(),
                diagnostics: vec![diagnostic],
            }
        }
    }
}

fn reprint(source: &str) -> Result<String, FormatDiagnostic> {
    let cm: Lrc<SourceMap> = Lrc::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom(FILE_NAME.to_string())),
        source.to_string(),
    );
    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        Syntax::Typescript(TsSyntax::default()),
        EsVersion::latest(),
        StringInput::from(&*fm),
        Some(&comments),
    );
    let mut parser = Parser::new_from(lexer);

    let diagnostic = |error: &swc_core::ecma::parser::error::Error| {
        let loc = cm.lookup_char_pos(error.span().lo);
        FormatDiagnostic {
            line_column: Some((loc.line, loc.col_display)),
            message: error.kind().msg().to_string(),
        }
    };

    let module = parser.parse_module().map_err(|error| diagnostic(&error))?;
    if let Some(error) = parser.take_errors().first() {
        return Err(diagnostic(error));
    }

    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: CodegenConfig::default().with_minify(false),
            cm: cm.clone(),
            comments: Some(&comments),
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };
        emitter.emit_module(&module).map_err(|error| FormatDiagnostic {
            line_column: None,
            message: format!("failed to print module: {error}"),
        })?;
    }

    String::from_utf8(buf).map_err(|error| FormatDiagnostic {
        line_column: None,
        message: format!("printer produced invalid UTF-8: {error}"),
    })
}
