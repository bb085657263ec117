//! ifcheck
//!
//! Lexer, syntax checker and declare-before-use checker for a single `if`
//! statement.

mod feedback;
mod frontend;
mod utils;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use feedback::{run_pipeline, token_table, PipelineReport};
use frontend::token::Token;
use frontend::{check_semantics, check_syntax, tokenize};
use utils::Error;

const SEPARATOR: &str = "=-=-=-=-=";

/// ifcheck
#[derive(Parser, Debug)]
#[command(name = "ifcheck")]
#[command(version = "0.1.0")]
#[command(about = "Tokenize a source file and check its if statement")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Do not print the token table
    #[arg(long)]
    no_tokens: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run lexical, syntax and semantic analysis
    Check {
        /// Input source file
        input: PathBuf,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,

        /// Do not print the token table
        #[arg(long)]
        no_tokens: bool,
    },
    /// Tokenize a source file and print the token table
    Tokens {
        /// Input source file
        input: PathBuf,

        /// Print the token table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let ok = match &cli.command {
        Some(Commands::Check { input, json, no_tokens }) => check_file(input, *json, !*no_tokens),
        Some(Commands::Tokens { input, json }) => print_tokens(input, *json),
        Some(Commands::Version) => {
            println!("ifcheck 0.1.0");
            true
        }
        None => {
            if let Some(ref input) = cli.input {
                check_file(input, cli.json, !cli.no_tokens)
            } else {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: ifcheck <FILE> or ifcheck check <FILE>");
                false
            }
        }
    };

    if !ok {
        process::exit(1);
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn banner(message: &str) {
    println!("{}", SEPARATOR);
    println!("{}", message);
    println!("{}", SEPARATOR);
    println!();
}

/// Print an error verbatim, followed by its location when it has one
fn report_error(input: &Path, source: &str, error: &Error) {
    eprintln!("{}", error);
    if let Some(span) = error.span() {
        let (line, col) = span.line_col(source);
        eprintln!("  --> {}:{}:{}", input.display(), line, col);
    }
}

fn print_token_table(tokens: &[Token]) {
    println!("Token table");
    println!("{}", SEPARATOR);
    for token in tokens {
        println!("Kind: {}. Token: {}", token.kind, token.lexeme);
    }
}

/// Check a source file; returns false if any stage failed
fn check_file(input: &Path, json: bool, show_tokens: bool) -> bool {
    log::info!("checking {}", input.display());

    let source = match read_source(input) {
        Ok(s) => s,
        Err(e) => {
            if json {
                let error = Error::Io(format!("{:#}", e));
                println!("{}", PipelineReport::io_failure(input.display().to_string(), &error).to_json());
            } else {
                eprintln!("Error: {:#}", e);
            }
            return false;
        }
    };

    if json {
        let report = run_pipeline(&source, &input.display().to_string());
        println!("{}", report.to_json());
        return report.success;
    }

    // 1. Lexer -> Tokens
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_error(input, &source, &e);
            return false;
        }
    };
    if show_tokens {
        print_token_table(&tokens);
    }
    banner("Lexical analysis completed successfully!");

    // 2. Syntax check
    let valid = match check_syntax(&tokens) {
        Ok(valid) => valid,
        Err(e) => {
            report_error(input, &source, &e);
            return false;
        }
    };
    banner("Syntax analysis completed successfully!");
    banner(&format!("Is the 'if' condition syntactically valid? {}", valid));

    // 3. Semantic check
    if let Err(e) = check_semantics(&tokens) {
        report_error(input, &source, &e);
        return false;
    }
    banner("=-= Semantic analysis completed successfully! =-=");

    true
}

/// Tokenize a source file and print the token table
fn print_tokens(input: &Path, json: bool) -> bool {
    let source = match read_source(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return false;
        }
    };

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_error(input, &source, &e);
            return false;
        }
    };

    if json {
        match serde_json::to_string_pretty(&token_table(&source, &tokens)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        }
    } else {
        print_token_table(&tokens);
        println!("{}", SEPARATOR);
    }
    true
}
