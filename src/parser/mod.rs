//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a tree of [`crate::ast::ast::Node`]s. It uses a Pratt parser for
//! expressions with operator precedence and handles:
//!
//! - Statement parsing (let bindings, functions, match, import, enums)
//! - Expression parsing (operators, calls, member access, literals)
//! - Error reporting with a sticky error flag
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
