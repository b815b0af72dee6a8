//! Minimal arithmetic expressions used by camera options.

mod ast;
mod error;
mod lexer;
mod parser;

pub mod eval;
