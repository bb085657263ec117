//! Frontend module - Lexer, Syntax Checker, Semantic Analysis

pub mod token;
pub mod lexer;
pub mod syntax;
pub mod semantic;

pub use lexer::tokenize;
pub use syntax::check_syntax;
pub use semantic::check_semantics;
