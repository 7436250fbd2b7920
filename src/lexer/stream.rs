//! The boundary between the lexer and the parser.
//!
//! The parser pulls exactly one token per advance through [`TokenSource`]
//! and never pushes tokens back.

use std::{rc::Rc, vec::IntoIter};

use crate::{Position, Span};

use super::tokens::{Token, TokenKind};

pub trait TokenSource {
    /// Produces the next token. Once the end of input is reached every
    /// further call returns an EOF token again.
    fn next_token(&mut self) -> Token;
}

/// Feeds an already tokenized source to the parser.
pub struct TokenStream {
    tokens: IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = tokens
            .iter()
            .rev()
            .find(|token| token.kind == TokenKind::EOF)
            .cloned()
            .unwrap_or_else(|| {
                let end = tokens
                    .last()
                    .map(|token| token.span.end.clone())
                    .unwrap_or_else(|| Position(0, Rc::new(String::from("shell"))));
                Token {
                    kind: TokenKind::EOF,
                    value: String::from("EOF"),
                    span: Span { start: end.clone(), end },
                }
            });

        TokenStream {
            tokens: tokens.into_iter(),
            eof,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::EOF => {
                // Nothing after the first EOF is ever handed out.
                self.tokens = Vec::new().into_iter();
                token
            }
            Some(token) => token,
            None => self.eof.clone(),
        }
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}
