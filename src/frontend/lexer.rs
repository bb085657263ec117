//! Lexer for ifcheck
//!
//! Converts source code into a stream of tokens ending in `EndOfInput`.

use log::{debug, trace};

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// The lexer state
pub struct Lexer {
    /// Source code as chars
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Create a token whose lexeme is the text from start to current position
    fn make_token(&self, kind: TokenKind) -> Token {
        let text: String = self.source[self.start..self.pos].iter().collect();
        Token::new(kind, text, self.make_span())
    }

    /// Advance while `pred` holds for the current character
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if pred(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, found: char) -> Error {
        Error::Lexical {
            found,
            span: Span::new(self.start, self.start + 1),
        }
    }

    /// Read a run of whitespace; the content itself is discarded
    fn read_whitespace(&mut self) -> Token {
        self.advance_while(char::is_whitespace);
        Token::new(TokenKind::Whitespace, "", self.make_span())
    }

    /// Read an identifier or keyword
    fn read_word(&mut self) -> Token {
        self.advance_while(char::is_alphanumeric);
        let mut token = self.make_token(TokenKind::Identifier);
        token.kind = TokenKind::classify_word(&token.lexeme);
        token
    }

    /// Read an integer literal
    fn read_number(&mut self) -> Token {
        self.advance_while(char::is_numeric);
        self.make_token(TokenKind::Number)
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token> {
        self.start = self.pos;

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::eof(self.make_span())),
        };

        if c.is_whitespace() {
            return Ok(self.read_whitespace());
        }

        if c.is_alphabetic() {
            return Ok(self.read_word());
        }

        if c.is_numeric() {
            return Ok(self.read_number());
        }

        self.advance();

        let kind = match c {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ';' => TokenKind::Semicolon,
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::RelationalOperator
                } else {
                    return Err(self.error(c));
                }
            }
            '>' | '<' | '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                }
                TokenKind::RelationalOperator
            }
            _ => return Err(self.error(c)),
        };

        Ok(self.make_token(kind))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            trace!("token {:?} {:?} at {}..{}", token.kind, token.lexeme, token.span.start, token.span.end);
            let is_eof = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        debug!("lexer produced {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Tokenize `text` in one call
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_if_statement() {
        let tokens = tokenize("if (x > 1) { y; }").unwrap();

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::ReservedWord,
                TokenKind::Whitespace,
                TokenKind::OpenParen,
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::RelationalOperator,
                TokenKind::Whitespace,
                TokenKind::Number,
                TokenKind::CloseParen,
                TokenKind::Whitespace,
                TokenKind::OpenBrace,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Whitespace,
                TokenKind::CloseBrace,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(tokens[0].lexeme, "if");
        assert_eq!(tokens[3].lexeme, "x");
        assert_eq!(tokens[5].lexeme, ">");
        assert_eq!(tokens[7].lexeme, "1");
    }

    #[test]
    fn test_keywords() {
        let tokens = tokenize("var if return true value").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::VarKeyword);
        assert_eq!(tokens[2].kind, TokenKind::ReservedWord);
        assert_eq!(tokens[4].kind, TokenKind::ReservedWord);
        assert_eq!(tokens[6].kind, TokenKind::ReservedWord);
        assert_eq!(tokens[8].kind, TokenKind::Identifier);
        assert_eq!(tokens[8].lexeme, "value");
    }

    #[test]
    fn test_alphanumeric_identifier() {
        let tokens = tokenize("x1y2 42abc").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "x1y2");
        // A digit run stops at the first letter
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].lexeme, "42");
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].lexeme, "abc");
    }

    #[test]
    fn test_relational_operators() {
        let tokens = tokenize("!= > < = >= <= ==").unwrap();
        let lexemes: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::RelationalOperator)
            .map(|t| t.lexeme.as_str())
            .collect();

        assert_eq!(lexemes, vec!["!=", ">", "<", "=", ">=", "<=", "=="]);
    }

    #[test]
    fn test_operators_without_spaces() {
        let tokens = tokenize("a>=b").unwrap();

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::RelationalOperator,
                TokenKind::Identifier,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(tokens[1].lexeme, ">=");
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        let tokens = tokenize(" \t\n  ").unwrap();

        assert_eq!(kinds(&tokens), vec![TokenKind::Whitespace, TokenKind::EndOfInput]);
        assert_eq!(tokens[0].lexeme, "");
        assert_eq!(tokens[0].span, Span::new(0, 5));
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn test_single_eof_at_end() {
        let tokens = tokenize("var x; if (x = 3) { return true; }").unwrap();

        let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::EndOfInput).count();
        assert_eq!(eof_count, 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
    }

    #[test]
    fn test_deterministic() {
        let source = "a; if (a <= 10) { b; }";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }

    #[test]
    fn test_bang_without_eq() {
        let err = tokenize("!x").unwrap_err();
        assert_eq!(err, Error::Lexical { found: '!', span: Span::new(0, 1) });
    }

    #[test]
    fn test_bang_eq_alone() {
        let tokens = tokenize("!=").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::RelationalOperator);
        assert_eq!(tokens[0].lexeme, "!=");
    }

    #[test]
    fn test_bang_at_end_of_input() {
        assert!(matches!(tokenize("x !"), Err(Error::Lexical { found: '!', .. })));
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("if (x + 1)").unwrap_err();
        assert_eq!(err, Error::Lexical { found: '+', span: Span::new(6, 7) });
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("if x").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[2].span, Span::new(3, 4));
        assert_eq!(tokens[3].span, Span::new(4, 4));
    }
}
