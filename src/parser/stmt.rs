use log::trace;

use crate::{
    ast::ast::{EnumVariant, MatchArm, Node},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::parse_required_expr,
    lookups::BindingPower,
    parser::{ParseResult, Parser},
};

/// Parses one statement. Keywords with a registered handler dispatch to it,
/// anything else is an expression statement. A trailing `;` is optional.
pub fn parse_stmt(parser: &mut Parser) -> ParseResult<Node> {
    let stmt = match parser.get_rules().get_stmt(parser.current_token_kind()) {
        Some(stmt_fn) => stmt_fn(parser)?,
        None => {
            let expression = parse_required_expr(parser, BindingPower::Default)?;
            expression.into_statement()
        }
    };

    // A statement cut short by an error is still returned, but nothing
    // after it is consumed.
    if !parser.had_error() {
        parser.eat(TokenKind::Semicolon);
    }
    Ok(stmt)
}

/// `let name = value` or `let! name = value`.
pub fn parse_let_stmt(parser: &mut Parser) -> ParseResult<Node> {
    let keyword = parser.advance().kind;
    let name = parser.expect(TokenKind::Identifier, "variable name")?;
    trace!("let {}", name.value);

    parser.expect(TokenKind::Assignment, "'=' after variable name")?;
    let initializer = Box::new(parse_required_expr(parser, BindingPower::Default)?);

    if keyword == TokenKind::LetBang {
        Ok(Node::LetBangStatement { name, initializer })
    } else {
        Ok(Node::LetStatement { name, initializer })
    }
}

pub fn parse_function_stmt(parser: &mut Parser) -> ParseResult<Node> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier, "function name")?;
    trace!("func {}", name.value);

    parser.expect(TokenKind::OpenParen, "'(' after function name")?;
    let params = parse_parameter_list(parser)?;

    parser.expect(TokenKind::OpenCurly, "'{' before function body")?;
    let body = parse_block(parser)?;

    Ok(Node::FunctionStatement { name, params, body })
}

/// Parses comma separated parameter names up to and including `)`, with
/// `(` already consumed.
pub fn parse_parameter_list(parser: &mut Parser) -> ParseResult<Vec<Token>> {
    let mut params = Vec::new();
    if parser.eat(TokenKind::CloseParen) {
        return Ok(params);
    }

    loop {
        if !parser.check(TokenKind::Identifier) {
            let message = if !params.is_empty() && parser.check(TokenKind::CloseParen) {
                "trailing comma is not allowed"
            } else {
                "expected parameter name"
            };
            return Err(malformed_parameter_list(parser, message));
        }
        params.push(parser.advance().clone());

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {
                parser.advance();
                return Ok(params);
            }
            _ => return Err(malformed_parameter_list(parser, "expected ',' or ')'")),
        }
    }
}

fn malformed_parameter_list(parser: &mut Parser, message: &str) -> Error {
    let token = parser.current_token().value.clone();
    parser.error_at_current(ErrorImpl::MalformedParameterList {
        token,
        message: message.to_string(),
    })
}

/// Parses statements up to and including `}`, with `{` already consumed.
pub fn parse_block(parser: &mut Parser) -> ParseResult<Vec<Node>> {
    parser.nested(parse_block_body)
}

fn parse_block_body(parser: &mut Parser) -> ParseResult<Vec<Node>> {
    let mut body = Vec::new();

    loop {
        parser.bail_if_errored()?;
        match parser.current_token_kind() {
            TokenKind::CloseCurly => {
                parser.advance();
                return Ok(body);
            }
            TokenKind::EOF => {
                return Err(parser.error_at_current(ErrorImpl::UnterminatedBlock {
                    expected: String::from("'}'"),
                }))
            }
            _ => body.push(parse_stmt(parser)?),
        }
    }
}

/// `match value { pattern -> expression, ... }`. The comma after an arm is
/// optional, including after the last one.
pub fn parse_match_stmt(parser: &mut Parser) -> ParseResult<Node> {
    parser.advance();
    trace!("match");

    let value = Box::new(parse_required_expr(parser, BindingPower::Default)?);
    parser.bail_if_errored()?;
    parser.expect(TokenKind::OpenCurly, "'{' after match value")?;

    let mut arms = Vec::new();
    while !parser.check(TokenKind::CloseCurly) {
        if parser.check(TokenKind::EOF) {
            return Err(parser.error_at_current(ErrorImpl::UnterminatedBlock {
                expected: String::from("'}' after match arms"),
            }));
        }

        let pattern = parse_required_expr(parser, BindingPower::Default)?;
        parser.bail_if_errored()?;
        parser.expect(TokenKind::Arrow, "'->' after match pattern")?;
        let expression = parse_required_expr(parser, BindingPower::Default)?;
        parser.bail_if_errored()?;

        arms.push(MatchArm { pattern, expression });
        parser.eat(TokenKind::Comma);
    }
    parser.advance();

    Ok(Node::MatchStatement { value, arms })
}

pub fn parse_import_stmt(parser: &mut Parser) -> ParseResult<Node> {
    parser.advance();

    if !parser.current_token().is_one_of_many(&[TokenKind::String, TokenKind::Identifier]) {
        let token = parser.current_token().value.clone();
        return Err(parser.error_at_current(ErrorImpl::ExpectedToken {
            expected: String::from("module path after 'import'"),
            token,
        }));
    }

    let path = parser.advance().clone();
    trace!("import {}", path.value);

    Ok(Node::ImportStatement { path })
}

/// `enum Name { A, B { x, y } }`. Trailing commas are accepted in both lists.
pub fn parse_enum_stmt(parser: &mut Parser) -> ParseResult<Node> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier, "enum name")?;
    trace!("enum {}", name.value);
    parser.expect(TokenKind::OpenCurly, "'{' after enum name")?;

    let mut variants = Vec::new();
    while !parser.check(TokenKind::CloseCurly) {
        if parser.check(TokenKind::EOF) {
            return Err(parser.error_at_current(ErrorImpl::UnterminatedBlock {
                expected: String::from("'}' after enum variants"),
            }));
        }

        let variant_name = parser.expect(TokenKind::Identifier, "variant name")?;
        let mut fields = Vec::new();
        if parser.eat(TokenKind::OpenCurly) {
            while !parser.check(TokenKind::CloseCurly) {
                fields.push(parser.expect(TokenKind::Identifier, "field name")?);
                if !parser.eat(TokenKind::Comma) {
                    break;
                }
            }
            parser.expect(TokenKind::CloseCurly, "'}' after variant fields")?;
        }

        variants.push(EnumVariant { name: variant_name, fields });
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }
    parser.expect(TokenKind::CloseCurly, "'}' after enum variants")?;

    Ok(Node::EnumStatement { name, variants })
}
