//! Error handling for ifcheck

use crate::frontend::syntax::Stage;
use crate::utils::Span;
use serde::Serialize;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline phase an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Io,
    Lexical,
    Syntax,
    Semantic,
}

/// Checker error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Lexer Errors ====================

    #[error("Lexical error: invalid character found: '{found}'")]
    Lexical { found: char, span: Span },

    // ==================== Syntax Errors ====================

    #[error("Syntax error: failed to {stage}")]
    Syntax { stage: Stage, span: Span },

    // ==================== Semantic Errors ====================

    #[error("Semantic error: variable '{name}' used inside 'if' was not declared")]
    UndeclaredVariable { name: String, span: Span },

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical { span, .. } => Some(*span),
            Self::Syntax { span, .. } => Some(*span),
            Self::UndeclaredVariable { span, .. } => Some(*span),
            Self::Io(_) => None,
        }
    }

    /// The pipeline phase that raised this error
    pub fn phase(&self) -> Phase {
        match self {
            Self::Lexical { .. } => Phase::Lexical,
            Self::Syntax { .. } => Phase::Syntax,
            Self::UndeclaredVariable { .. } => Phase::Semantic,
            Self::Io(_) => Phase::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        let lexical = Error::Lexical { found: '#', span: Span::new(2, 3) };
        assert_eq!(lexical.to_string(), "Lexical error: invalid character found: '#'");

        let syntax = Error::Syntax { stage: Stage::FindOpenBrace, span: Span::dummy() };
        assert_eq!(syntax.to_string(), "Syntax error: failed to find opening brace");

        let semantic = Error::UndeclaredVariable { name: "x".to_string(), span: Span::dummy() };
        assert_eq!(
            semantic.to_string(),
            "Semantic error: variable 'x' used inside 'if' was not declared"
        );
    }

    #[test]
    fn test_phase_and_span() {
        let err = Error::Lexical { found: '@', span: Span::new(5, 6) };
        assert_eq!(err.phase(), Phase::Lexical);
        assert_eq!(err.span(), Some(Span::new(5, 6)));

        let io = Error::Io("missing".to_string());
        assert_eq!(io.phase(), Phase::Io);
        assert_eq!(io.span(), None);
    }
}
