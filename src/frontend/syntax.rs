//! Syntax checking for ifcheck
//!
//! Verifies that the token stream contains one statement of the shape
//!
//! ```text
//! IfStatement := "if" ( "(" )? Operand RelOp Operand ( ")" )? "{" Body "}"
//! Operand     := Identifier | Number
//! Body        := at most BODY_LIMIT tokens, read until "}"
//! ```
//!
//! Tokens before the first `if` are skipped. Whitespace is skipped before
//! every checkpoint after the `if`. On failure the error names the furthest
//! stage that was entered, i.e. the next unmet expectation.

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// Maximum number of non-whitespace tokens consumed between `{` and `}`
pub const BODY_LIMIT: usize = 10;

/// Grammar checkpoints, in the order they are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    FindIf,
    FindOpenParen,
    VerifyFirstOperand,
    FindRelationalOperator,
    VerifySecondOperand,
    FindCloseParen,
    FindOpenBrace,
    FindCloseBrace,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Stage::FindIf => "find 'if' statement",
            Stage::FindOpenParen => "find opening parenthesis",
            Stage::VerifyFirstOperand => "verify variable name or number",
            Stage::FindRelationalOperator => "find relational operator",
            Stage::VerifySecondOperand => "verify second variable name or number",
            Stage::FindCloseParen => "find closing parenthesis",
            Stage::FindOpenBrace => "find opening brace",
            Stage::FindCloseBrace => "find closing brace",
        };
        f.write_str(description)
    }
}

/// States of the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectIf,
    ExpectOpenParenOrOperand,
    ExpectOperand1,
    ExpectRelOp,
    ExpectOperand2,
    ExpectCloseParen,
    ExpectOpenBrace,
    ExpectBody,
    ExpectCloseBrace,
    Done,
}

/// The syntax checker
pub struct SyntaxChecker<'a> {
    tokens: &'a [Token],
    pos: usize,
    stage: Stage,
}

impl<'a> SyntaxChecker<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            stage: Stage::FindIf,
        }
    }

    /// Furthest stage entered so far
    pub fn stage(&self) -> Stage {
        self.stage
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().map_or(TokenKind::EndOfInput, |t| t.kind)
    }

    fn current_span(&self) -> Span {
        self.current()
            .or_else(|| self.tokens.last())
            .map_or_else(Span::dummy, |t| t.span)
    }

    fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::EndOfInput
    }

    /// Move one token forward; never moves past the end marker
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_kind() == TokenKind::Whitespace {
            self.advance();
        }
    }

    fn enter(&mut self, stage: Stage) {
        trace!("syntax stage: {}", stage);
        self.stage = stage;
    }

    fn fail(&self) -> Error {
        Error::Syntax {
            stage: self.stage,
            span: self.current_span(),
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.fail())
        }
    }

    fn expect_operand(&mut self) -> Result<()> {
        if self.current_kind().is_operand() {
            self.advance();
            Ok(())
        } else {
            Err(self.fail())
        }
    }

    // ==================== Matching ====================

    fn step(&mut self, state: State) -> Result<State> {
        let next = match state {
            State::ExpectIf => {
                self.enter(Stage::FindIf);
                while !self.is_at_end() && !self.current().is_some_and(|t| t.is_reserved("if")) {
                    self.advance();
                }
                if self.is_at_end() {
                    return Err(self.fail());
                }
                self.advance();
                State::ExpectOpenParenOrOperand
            }
            State::ExpectOpenParenOrOperand => {
                self.enter(Stage::FindOpenParen);
                self.skip_whitespace();
                self.consume(TokenKind::OpenParen);
                State::ExpectOperand1
            }
            State::ExpectOperand1 => {
                self.enter(Stage::VerifyFirstOperand);
                self.skip_whitespace();
                self.expect_operand()?;
                State::ExpectRelOp
            }
            State::ExpectRelOp => {
                self.enter(Stage::FindRelationalOperator);
                self.skip_whitespace();
                self.expect(TokenKind::RelationalOperator)?;
                State::ExpectOperand2
            }
            State::ExpectOperand2 => {
                self.enter(Stage::VerifySecondOperand);
                self.skip_whitespace();
                self.expect_operand()?;
                State::ExpectCloseParen
            }
            State::ExpectCloseParen => {
                self.enter(Stage::FindCloseParen);
                self.skip_whitespace();
                self.consume(TokenKind::CloseParen);
                State::ExpectOpenBrace
            }
            State::ExpectOpenBrace => {
                self.enter(Stage::FindOpenBrace);
                self.skip_whitespace();
                self.expect(TokenKind::OpenBrace)?;
                State::ExpectBody
            }
            State::ExpectBody => {
                let mut consumed = 0;
                self.skip_whitespace();
                while consumed < BODY_LIMIT
                    && !self.is_at_end()
                    && self.current_kind() != TokenKind::CloseBrace
                {
                    self.advance();
                    consumed += 1;
                    self.skip_whitespace();
                }
                trace!("body consumed {} tokens", consumed);
                State::ExpectCloseBrace
            }
            State::ExpectCloseBrace => {
                self.enter(Stage::FindCloseBrace);
                self.expect(TokenKind::CloseBrace)?;
                State::Done
            }
            State::Done => State::Done,
        };
        Ok(next)
    }

    /// Match the token stream against the `if` statement shape.
    ///
    /// Returns `Ok(true)` on a full match; there is no `Ok(false)`.
    pub fn check(&mut self) -> Result<bool> {
        let mut state = State::ExpectIf;
        while state != State::Done {
            state = self.step(state)?;
        }
        debug!("syntax check passed (furthest stage: {})", self.stage);
        Ok(true)
    }
}

/// Check `tokens` for a well-formed `if` statement
pub fn check_syntax(tokens: &[Token]) -> Result<bool> {
    SyntaxChecker::new(tokens).check()
}
