use log::trace;

use crate::{
    ast::ast::Node,
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{ParseResult, Parser, MAX_CALL_ARGUMENTS},
    stmt::{parse_block, parse_parameter_list},
};

/// Parses an expression whose infix operators bind tighter than `bp`.
///
/// Returns `Ok(None)` when the input ends where an expression would start;
/// that is not an error by itself; callers that need a node use
/// [`parse_required_expr`].
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult<Option<Node>> {
    parser.nested(|parser| parse_expr_at(parser, bp))
}

fn parse_expr_at(parser: &mut Parser, bp: BindingPower) -> ParseResult<Option<Node>> {
    let rules = parser.get_rules();

    // First parse NUD
    let token = parser.advance().clone();
    let nud_fn = match rules.get_nud(token.kind) {
        Some(nud_fn) => nud_fn,
        None if token.kind == TokenKind::EOF => return Ok(None),
        None => {
            return Err(parser.error(
                ErrorImpl::UnexpectedToken { token: token.value.clone() },
                token.span.start.clone(),
            ))
        }
    };

    let mut left = nud_fn(parser, token)?;

    // While the current token binds tighter than bp, keep extending lhs
    while rules.get_binding_power(parser.current_token_kind()) > bp
        && !parser.check(TokenKind::EOF)
        && !parser.had_error()
    {
        let token = parser.advance().clone();
        let Some(led_fn) = rules.get_led(token.kind) else {
            break;
        };

        left = led_fn(parser, left, token)?;
    }

    Ok(Some(left))
}

/// Like [`parse_expr`], but running out of input is an error.
pub fn parse_required_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult<Node> {
    match parse_expr(parser, bp)? {
        Some(node) => Ok(node),
        None => {
            let position = parser.previous_token().span.start.clone();
            Err(parser.error(
                ErrorImpl::UnexpectedEndOfInput { expected: String::from("an expression") },
                position,
            ))
        }
    }
}

pub fn parse_literal_expr(_parser: &mut Parser, token: Token) -> ParseResult<Node> {
    Ok(Node::Literal { token })
}

pub fn parse_bool_expr(_parser: &mut Parser, token: Token) -> ParseResult<Node> {
    Ok(Node::BoolLiteral { value: token.kind == TokenKind::True, token })
}

pub fn parse_variable_expr(_parser: &mut Parser, token: Token) -> ParseResult<Node> {
    Ok(Node::Variable { name: token })
}

pub fn parse_prefix_expr(parser: &mut Parser, operator: Token) -> ParseResult<Node> {
    trace!("prefix {}", operator.value);
    let right = parse_required_expr(parser, BindingPower::Unary)?;

    Ok(Node::Unary { operator, right: Box::new(right) })
}

pub fn parse_grouping_expr(parser: &mut Parser, _token: Token) -> ParseResult<Node> {
    let expression = parse_required_expr(parser, BindingPower::Default)?;
    parser.bail_if_errored()?;
    parser.expect(TokenKind::CloseParen, "')' after expression")?;

    Ok(Node::Grouping { expression: Box::new(expression) })
}

pub fn parse_list_expr(parser: &mut Parser, _token: Token) -> ParseResult<Node> {
    trace!("list literal");
    let mut elements = Vec::new();

    while !parser.check(TokenKind::CloseBracket) {
        elements.push(parse_required_expr(parser, BindingPower::Default)?);
        parser.bail_if_errored()?;
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }
    parser.expect(TokenKind::CloseBracket, "']' after list elements")?;

    Ok(Node::ListLiteral { elements })
}

/// `{` starts either a struct literal or a destructure pattern. The token
/// after the first name decides: `=` means fields, anything else bindings.
pub fn parse_brace_expr(parser: &mut Parser, _token: Token) -> ParseResult<Node> {
    if parser.eat(TokenKind::CloseCurly) {
        return Ok(Node::StructLiteral { keys: vec![], values: vec![] });
    }

    let first = parser.expect(TokenKind::Identifier, "field name or binding")?;
    if parser.check(TokenKind::Assignment) {
        trace!("struct literal");
        let (keys, values) = parse_fields_from(parser, first, false)?;
        return Ok(Node::StructLiteral { keys, values });
    }

    trace!("destructure pattern");
    let mut bindings = vec![first];
    while parser.eat(TokenKind::Comma) {
        if parser.check(TokenKind::CloseCurly) {
            break;
        }
        bindings.push(parser.expect(TokenKind::Identifier, "binding name")?);
    }
    parser.expect(TokenKind::CloseCurly, "'}' after bindings")?;

    Ok(Node::DestructurePattern { bindings })
}

pub fn parse_lambda_expr(parser: &mut Parser, _token: Token) -> ParseResult<Node> {
    trace!("lambda");
    parser.expect(TokenKind::OpenParen, "'(' after 'fn'")?;
    let params = parse_parameter_list(parser)?;

    parser.expect(TokenKind::Arrow, "'->' after lambda parameters")?;
    parser.expect(TokenKind::OpenCurly, "'{' before lambda body")?;
    let body = parse_block(parser)?;

    Ok(Node::LambdaExpression { params, body })
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, operator: Token) -> ParseResult<Node> {
    let bp = parser.get_rules().get_binding_power(operator.kind);
    let right = parse_required_expr(parser, bp)?;

    Ok(Node::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

/// `a = b = c` groups to the right, so the value is parsed below the
/// assignment's own binding power.
pub fn parse_assignment_expr(parser: &mut Parser, left: Node, token: Token) -> ParseResult<Node> {
    let name = match &left {
        Node::Variable { name } => name.clone(),
        _ => {
            return Err(parser.error(
                ErrorImpl::InvalidAssignmentTarget { token: left.to_string() },
                token.span.start.clone(),
            ))
        }
    };

    let value = parse_required_expr(parser, BindingPower::Default)?;

    Ok(Node::Assignment { name, value: Box::new(value) })
}

pub fn parse_pipeline_expr(parser: &mut Parser, left: Node, _token: Token) -> ParseResult<Node> {
    let right = parse_required_expr(parser, BindingPower::Pipeline)?;

    Ok(Node::Pipeline {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn parse_struct_update_expr(parser: &mut Parser, left: Node, _token: Token) -> ParseResult<Node> {
    trace!("struct update");
    parser.expect(TokenKind::OpenCurly, "'{' after '<-'")?;
    let (keys, values) = parse_field_block(parser, false)?;

    Ok(Node::StructUpdate {
        base: Box::new(left),
        keys,
        values,
    })
}

/// Parses the argument list of a call, `(` already consumed.
///
/// Past [`MAX_CALL_ARGUMENTS`] the error is reported, the surplus is skipped
/// up to the matching `)` and the call keeps the arguments it already has.
pub fn parse_call_expr(parser: &mut Parser, left: Node, _token: Token) -> ParseResult<Node> {
    trace!("call");
    let mut arguments = Vec::new();

    if !parser.check(TokenKind::CloseParen) {
        loop {
            if arguments.len() >= MAX_CALL_ARGUMENTS {
                let position = parser.current_token().span.start.clone();
                parser.error(ErrorImpl::TooManyArguments { max: MAX_CALL_ARGUMENTS }, position);
                skip_to_closing_paren(parser);
                break;
            }

            arguments.push(parse_required_expr(parser, BindingPower::Default)?);
            parser.bail_if_errored()?;
            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    parser.expect(TokenKind::CloseParen, "')' after arguments")?;

    Ok(Node::Call {
        callee: Box::new(left),
        arguments,
    })
}

fn skip_to_closing_paren(parser: &mut Parser) {
    let mut depth = 0usize;
    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => return,
            TokenKind::CloseParen if depth == 0 => return,
            TokenKind::CloseParen => depth -= 1,
            TokenKind::OpenParen => depth += 1,
            _ => {}
        }
        parser.advance();
    }
}

pub fn parse_member_expr(parser: &mut Parser, left: Node, _token: Token) -> ParseResult<Node> {
    let property = parser.expect(TokenKind::Identifier, "property name after '.'")?;

    Ok(Node::PropertyAccess {
        object: Box::new(left),
        property,
    })
}

/// `Enum::Variant`, optionally followed by `{ field = value, field }`.
pub fn parse_enum_constructor_expr(parser: &mut Parser, left: Node, token: Token) -> ParseResult<Node> {
    let enum_name = match &left {
        Node::Variable { name } => name.clone(),
        _ => {
            return Err(parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("an enum name before '::'"),
                    token: left.to_string(),
                },
                token.span.start.clone(),
            ))
        }
    };
    let variant = parser.expect(TokenKind::Identifier, "variant name after '::'")?;
    trace!("enum constructor {}::{}", enum_name.value, variant.value);

    let (field_names, field_values) = if parser.eat(TokenKind::OpenCurly) {
        parse_field_block(parser, true)?
    } else {
        (vec![], vec![])
    };

    Ok(Node::EnumConstructor {
        enum_name,
        variant,
        field_names,
        field_values,
    })
}

/// Default infix handler: the token has a binding power but nothing knows
/// how to continue an expression with it.
pub fn led_unexpected_infix(parser: &mut Parser, _left: Node, token: Token) -> ParseResult<Node> {
    Err(parser.error(
        ErrorImpl::UnexpectedInfixOperator { token: token.value.clone() },
        token.span.start.clone(),
    ))
}

/// Parses `name = value` pairs up to and including `}`, with `{` already
/// consumed. With `allow_shorthand` a bare `name` stands for `name = name`.
fn parse_field_block(parser: &mut Parser, allow_shorthand: bool) -> ParseResult<(Vec<Token>, Vec<Node>)> {
    if parser.eat(TokenKind::CloseCurly) {
        return Ok((vec![], vec![]));
    }

    let first = parser.expect(TokenKind::Identifier, "field name")?;
    parse_fields_from(parser, first, allow_shorthand)
}

fn parse_fields_from(
    parser: &mut Parser,
    first: Token,
    allow_shorthand: bool,
) -> ParseResult<(Vec<Token>, Vec<Node>)> {
    let mut keys = Vec::new();
    let mut values = Vec::new();
    let mut key = first;

    loop {
        let value = if parser.eat(TokenKind::Assignment) {
            parse_required_expr(parser, BindingPower::Assignment)?
        } else if allow_shorthand {
            Node::Variable { name: key.clone() }
        } else {
            let token = parser.current_token().value.clone();
            return Err(parser.error_at_current(ErrorImpl::ExpectedToken {
                expected: format!("'=' after field `{}`", key.value),
                token,
            }));
        };

        parser.bail_if_errored()?;
        keys.push(key);
        values.push(value);

        if !parser.eat(TokenKind::Comma) || parser.check(TokenKind::CloseCurly) {
            break;
        }
        key = parser.expect(TokenKind::Identifier, "field name")?;
    }
    parser.expect(TokenKind::CloseCurly, "'}' after fields")?;

    Ok((keys, values))
}
