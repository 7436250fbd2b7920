//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the program driver.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! Handlers are looked up in a [`ParseRules`] table that is built once and
//! only read while parsing:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use log::{debug, info};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        stream::{TokenSource, TokenStream},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{lookups::ParseRules, stmt::parse_stmt};

/// Upper bound on the number of arguments a single call can take.
pub const MAX_CALL_ARGUMENTS: usize = 255;

/// How many expressions and blocks may be open at once. Deeper input is
/// reported instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

pub type ParseResult<T> = Result<T, Error>;

/// The main parser structure that maintains parsing state.
///
/// It holds exactly one token of lookahead (`current`) and the token that
/// was consumed last (`previous`). Once an error is reported the parser is
/// poisoned: `had_error` stays set and the driver stops.
pub struct Parser<'a> {
    /// Where tokens come from, one per advance
    source: Box<dyn TokenSource + 'a>,
    /// The next token, not yet consumed
    current: Token,
    /// The most recently consumed token
    previous: Token,
    /// Handler and binding power tables
    rules: &'a ParseRules,
    /// Set by the first reported error and never cleared
    had_error: bool,
    /// Every reported error, in order
    errors: Vec<Error>,
    /// Expressions and blocks currently being parsed
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser using the language's default rule table.
    pub fn new(source: impl TokenSource + 'a) -> Self {
        Parser::with_rules(source, ParseRules::default_rules())
    }

    /// Creates a parser that dispatches through `rules` instead of the
    /// default table.
    pub fn with_rules(source: impl TokenSource + 'a, rules: &'a ParseRules) -> Self {
        let mut source: Box<dyn TokenSource + 'a> = Box::new(source);
        let current = source.next_token();

        Parser {
            previous: current.clone(),
            current,
            source,
            rules,
            had_error: false,
            errors: vec![],
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn previous_token(&self) -> &Token {
        &self.previous
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> &Token {
        let next = self.source.next_token();
        self.previous = std::mem::replace(&mut self.current, next);
        &self.previous
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it is of the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the expected kind or reports what was expected.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - Human readable description used in the diagnostic
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(expected_kind) {
            return Ok(self.advance().clone());
        }

        let token = self.current.value.clone();
        Err(self.error_at_current(ErrorImpl::ExpectedToken {
            expected: expected.to_string(),
            token,
        }))
    }

    /// Reports an error: logs it, records it and sets the sticky error flag.
    ///
    /// Every failing production goes through here, so the flag is always set
    /// before an `Err` starts propagating.
    pub fn error(&mut self, error_impl: ErrorImpl, position: Position) -> Error {
        let error = Error::new(error_impl, position);
        debug!("parse error: {}", error);

        self.had_error = true;
        self.errors.push(error.clone());
        error
    }

    pub fn error_at_current(&mut self, error_impl: ErrorImpl) -> Error {
        let position = self.current.span.start.clone();
        self.error(error_impl, position)
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Fails with the recorded error once the sticky flag is set.
    ///
    /// A production that goes on consuming after a child returns calls this
    /// first, so nothing past the first error is read.
    pub fn bail_if_errored(&self) -> ParseResult<()> {
        match self.errors.last() {
            Some(error) if self.had_error => Err(error.clone()),
            _ => Ok(()),
        }
    }

    /// Runs `parse` one nesting level deeper, reporting input nested past
    /// [`MAX_NESTING_DEPTH`].
    pub fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_at_current(ErrorImpl::NestingTooDeep { max: MAX_NESTING_DEPTH }));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the rule table. The reference outlives the borrow of the
    /// parser, so handlers can be looked up and then called with `self`.
    pub fn get_rules(&self) -> &'a ParseRules {
        self.rules
    }

    /// Parses statements until the end of input or the first error.
    ///
    /// Statements completed before an error are kept in the returned
    /// program, next to the reported errors.
    pub fn parse_program(&mut self) -> Program {
        info!("parsing program");

        let mut nodes = Vec::new();
        while !self.check(TokenKind::EOF) && !self.had_error {
            match parse_stmt(self) {
                Ok(stmt) => nodes.push(stmt),
                Err(_) => break,
            }
        }

        info!(
            "parsed {} top-level statements ({} errors)",
            nodes.len(),
            self.errors.len()
        );

        Program::new(nodes, self.errors.clone())
    }
}

/// Parses a stream of tokens into a program.
///
/// This is the main entry point for parsing. Use [`Program::had_error`] or
/// [`Program::into_result`] to find out whether the whole input parsed.
pub fn parse(tokens: Vec<Token>) -> Program {
    let mut parser = Parser::new(TokenStream::new(tokens));
    parser.parse_program()
}

/// Tokenizes and parses `source`. Lexer errors are returned as `Err`,
/// parse errors are reported through the returned program.
pub fn parse_source(source: &str, file: Option<String>) -> ParseResult<Program> {
    let tokens = tokenize(source.to_string(), file)?;
    Ok(parse(tokens))
}
