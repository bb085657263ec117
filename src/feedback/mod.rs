//! Structured Feedback Module
//!
//! Runs the whole pipeline over one source buffer and records the outcome in
//! a machine-readable report:
//! - the token table with line/column positions
//! - how far the pipeline (and the grammar) got
//! - the first diagnostic, if any

use serde::Serialize;

use crate::frontend::lexer::tokenize;
use crate::frontend::semantic::SemanticChecker;
use crate::frontend::syntax::{Stage, SyntaxChecker};
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Phase};

// ==================== Line Index ====================

/// Maps char offsets to 1-based line/column pairs
struct LineIndex {
    /// Char offset of the first character of every line
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (offset, c) in source.chars().enumerate() {
            if c == '\n' {
                starts.push(offset + 1);
            }
        }
        Self { starts }
    }

    fn locate(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        (line, offset - self.starts[line - 1] + 1)
    }
}

// ==================== Report ====================

/// Last pipeline phase that was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    Lexical,
    Syntax,
    Semantic,
    Done,
}

/// One row of the token table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRow {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

/// The first error raised by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub phase: Phase,
    /// Error message, verbatim
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub success: bool,
    pub source_file: String,
    pub progress: Progress,
    /// Furthest grammar stage, when the syntax check ran
    pub syntax_stage: Option<Stage>,
    pub tokens: Vec<TokenRow>,
    pub diagnostic: Option<Diagnostic>,
}

impl Diagnostic {
    fn from_error(error: &Error, index: Option<&LineIndex>) -> Self {
        let position = match (error.span(), index) {
            (Some(span), Some(index)) => Some(index.locate(span.start)),
            _ => None,
        };
        Self {
            phase: error.phase(),
            message: error.to_string(),
            line: position.map(|(line, _)| line),
            column: position.map(|(_, column)| column),
        }
    }
}

impl PipelineReport {
    /// Report for a source file that could not be read
    pub fn io_failure(source_file: String, error: &Error) -> Self {
        Self {
            success: false,
            source_file,
            progress: Progress::Lexical,
            syntax_stage: None,
            tokens: vec![],
            diagnostic: Some(Diagnostic::from_error(error, None)),
        }
    }

    fn fail(mut self, error: &Error, index: &LineIndex) -> Self {
        self.success = false;
        self.diagnostic = Some(Diagnostic::from_error(error, Some(index)));
        self
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    #[allow(dead_code)]
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Build the token table for `tokens` lexed from `source`
pub fn token_table(source: &str, tokens: &[Token]) -> Vec<TokenRow> {
    let index = LineIndex::new(source);
    tokens
        .iter()
        .map(|token| {
            let (line, column) = index.locate(token.span.start);
            TokenRow {
                kind: token.kind,
                lexeme: token.lexeme.clone(),
                line,
                column,
            }
        })
        .collect()
}

/// Run lexer, syntax checker and semantic checker, stopping at the first error
pub fn run_pipeline(source: &str, source_file: &str) -> PipelineReport {
    let index = LineIndex::new(source);
    let mut report = PipelineReport {
        success: true,
        source_file: source_file.to_string(),
        progress: Progress::Lexical,
        syntax_stage: None,
        tokens: vec![],
        diagnostic: None,
    };

    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => return report.fail(&e, &index),
    };
    report.tokens = token_table(source, &tokens);

    report.progress = Progress::Syntax;
    let mut syntax = SyntaxChecker::new(&tokens);
    let result = syntax.check();
    report.syntax_stage = Some(syntax.stage());
    if let Err(e) = result {
        return report.fail(&e, &index);
    }

    report.progress = Progress::Semantic;
    if let Err(e) = SemanticChecker::new().check(&tokens) {
        return report.fail(&e, &index);
    }

    report.progress = Progress::Done;
    report
}
