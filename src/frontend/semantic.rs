//! Semantic Analysis for ifcheck
//!
//! Declare-before-use: an identifier mentioned outside an `if` condition is
//! considered declared; an identifier inside the condition must already be
//! declared. The condition region starts at the `if` keyword and ends at the
//! next `)` token, whichever parenthesis that happens to be.

use std::collections::HashSet;

use log::{debug, trace};

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result};

/// Single-pass declare-before-use checker
pub struct SemanticChecker {
    declared: HashSet<String>,
    inside_if: bool,
}

impl SemanticChecker {
    pub fn new() -> Self {
        Self {
            declared: HashSet::new(),
            inside_if: false,
        }
    }

    /// Check if a name has been declared by the last pass
    #[allow(dead_code)]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Run one pass over `tokens`. State from a previous pass is discarded.
    pub fn check(&mut self, tokens: &[Token]) -> Result<()> {
        self.declared.clear();
        self.inside_if = false;

        for token in tokens {
            match token.kind {
                TokenKind::ReservedWord => {
                    if token.lexeme == "if" {
                        trace!("entering if condition at {}", token.span.start);
                        self.inside_if = true;
                    }
                }
                TokenKind::CloseParen => {
                    self.inside_if = false;
                }
                TokenKind::Identifier if self.inside_if => {
                    if !self.declared.contains(&token.lexeme) {
                        return Err(Error::UndeclaredVariable {
                            name: token.lexeme.clone(),
                            span: token.span,
                        });
                    }
                }
                TokenKind::Identifier => {
                    if self.declared.insert(token.lexeme.clone()) {
                        trace!("declared '{}'", token.lexeme);
                    }
                }
                _ => {}
            }
        }

        debug!("semantic check passed ({} declared names)", self.declared.len());
        Ok(())
    }
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Check declare-before-use for identifiers inside `if` conditions
pub fn check_semantics(tokens: &[Token]) -> Result<()> {
    SemanticChecker::new().check(tokens)
}
