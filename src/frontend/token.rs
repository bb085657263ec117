//! Token definitions for ifcheck

use std::fmt;

use serde::Serialize;

use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact matched text, empty for whitespace and end of input
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::EndOfInput, lexeme: String::new(), span }
    }

    /// Check for a reserved word with the given spelling
    pub fn is_reserved(&self, word: &str) -> bool {
        self.kind == TokenKind::ReservedWord && self.lexeme == word
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// One or more whitespace characters
    Whitespace,
    /// var
    VarKeyword,
    /// ;
    Semicolon,
    /// if, return, true
    ReservedWord,
    /// Variable name
    Identifier,
    /// Arithmetic operator (not produced by the current lexer)
    #[allow(dead_code)]
    Operator,
    /// != > < = >= <= ==
    RelationalOperator,
    /// Logical operator (not produced by the current lexer)
    #[allow(dead_code)]
    LogicalOperator,
    /// (
    OpenParen,
    /// )
    CloseParen,
    /// Integer literal
    Number,
    /// {
    OpenBrace,
    /// }
    CloseBrace,
    /// End of input
    EndOfInput,
}

/// Fixed keyword table
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("if", TokenKind::ReservedWord),
    ("return", TokenKind::ReservedWord),
    ("true", TokenKind::ReservedWord),
    ("var", TokenKind::VarKeyword),
];

impl TokenKind {
    /// Classify a letter-initial word: keyword kind or `Identifier`
    pub fn classify_word(s: &str) -> TokenKind {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == s)
            .map(|(_, kind)| *kind)
            .unwrap_or(TokenKind::Identifier)
    }

    /// Identifiers and numbers may appear on either side of a comparison
    pub fn is_operand(&self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Number)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::VarKeyword => "var keyword",
            TokenKind::Semicolon => "semicolon",
            TokenKind::ReservedWord => "reserved word",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::RelationalOperator => "relational operator",
            TokenKind::LogicalOperator => "logical operator",
            TokenKind::OpenParen => "open parenthesis",
            TokenKind::CloseParen => "close parenthesis",
            TokenKind::Number => "number",
            TokenKind::OpenBrace => "open brace",
            TokenKind::CloseBrace => "close brace",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(TokenKind::classify_word("if"), TokenKind::ReservedWord);
        assert_eq!(TokenKind::classify_word("return"), TokenKind::ReservedWord);
        assert_eq!(TokenKind::classify_word("true"), TokenKind::ReservedWord);
        assert_eq!(TokenKind::classify_word("var"), TokenKind::VarKeyword);
    }

    #[test]
    fn test_classify_is_exact_match() {
        assert_eq!(TokenKind::classify_word("If"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify_word("iff"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify_word("false"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify_word("variable"), TokenKind::Identifier);
    }

    #[test]
    fn test_is_reserved() {
        let token = Token::new(TokenKind::ReservedWord, "if", Span::new(0, 2));
        assert!(token.is_reserved("if"));
        assert!(!token.is_reserved("return"));

        let ident = Token::new(TokenKind::Identifier, "if2", Span::new(0, 3));
        assert!(!ident.is_reserved("if"));
    }
}
