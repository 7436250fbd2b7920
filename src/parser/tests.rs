//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Operator precedence and associativity
//! - Calls and member access chains
//! - Let bindings, functions, lambdas and match
//! - Imports, enums, lists and structs
//! - Error reporting and the sticky error flag

use crate::{
    ast::ast::{Node, NodeType, Program},
    errors::errors::ErrorImpl,
    lexer::{
        lexer::tokenize,
        stream::TokenStream,
        tokens::TokenKind,
    },
};

use super::{
    expr::{parse_expr, parse_literal_expr},
    lookups::{BindingPower, ParseRules},
    parser::{parse, Parser, MAX_CALL_ARGUMENTS, MAX_NESTING_DEPTH},
};

fn parse_str(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.n".to_string())).unwrap();
    parse(tokens)
}

fn parse_ok(source: &str) -> Program {
    let program = parse_str(source);
    assert!(!program.had_error(), "unexpected errors: {:?}", program.errors());
    program
}

fn expression(node: &Node) -> &Node {
    match node {
        Node::ExpressionStatement { expression } => expression.as_ref(),
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

fn first_expr(source: &str) -> String {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1);
    expression(&program.nodes[0]).to_string()
}

fn first_error_name(program: &Program) -> &str {
    assert!(program.had_error());
    program.errors()[0].get_error_name()
}

#[test]
fn test_parse_precedence() {
    assert_eq!(first_expr("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(first_expr("1 * 2 + 3"), "((1 * 2) + 3)");
    assert_eq!(first_expr("(1 + 2) * 3"), "(((1 + 2)) * 3)");
}

#[test]
fn test_parse_binary_shape() {
    let program = parse_ok("1 + 2 * 3");
    let Node::Binary { left, operator, right } = expression(&program.nodes[0]) else {
        panic!("expected a binary node");
    };

    assert_eq!(operator.kind, TokenKind::Plus);
    assert_eq!(left.get_node_type(), NodeType::Literal);
    assert_eq!(right.get_node_type(), NodeType::Binary);
    assert_eq!(program.nodes[0].node_count(), 6);
}

#[test]
fn test_parse_left_associative() {
    assert_eq!(first_expr("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(first_expr("8 / 4 / 2"), "((8 / 4) / 2)");
}

#[test]
fn test_parse_relational_and_logical() {
    assert_eq!(first_expr("a < b && c == d"), "((a < b) && (c == d))");
    assert_eq!(first_expr("a + 1 >= b || !c"), "(((a + 1) >= b) || !(c))");
}

#[test]
fn test_parse_unary() {
    assert_eq!(first_expr("-a * b"), "(-(a) * b)");
    assert_eq!(first_expr("-f(x)"), "-(f(x))");
    assert_eq!(first_expr("!!done"), "!(!(done))");
}

#[test]
fn test_parse_method_call() {
    let program = parse_ok("a.b(c)");
    let Node::Call { callee, arguments } = expression(&program.nodes[0]) else {
        panic!("expected a call");
    };

    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].to_string(), "c");
    let Node::PropertyAccess { object, property } = callee.as_ref() else {
        panic!("expected a property access as callee");
    };
    assert_eq!(object.to_string(), "a");
    assert_eq!(property.value, "b");
}

#[test]
fn test_parse_call_chain_nests_left_to_right() {
    let program = parse_ok("a.b(c).d(e)");

    let Node::Call { callee, arguments } = expression(&program.nodes[0]) else {
        panic!("expected the outer call");
    };
    assert_eq!(arguments[0].to_string(), "e");

    let Node::PropertyAccess { object, property } = callee.as_ref() else {
        panic!("expected .d");
    };
    assert_eq!(property.value, "d");

    let Node::Call { callee, arguments } = object.as_ref() else {
        panic!("expected the inner call");
    };
    assert_eq!(arguments[0].to_string(), "c");
    assert_eq!(callee.to_string(), "a.b");
    assert_eq!(callee.get_node_type(), NodeType::PropertyAccess);
}

#[test]
fn test_parse_call_arguments() {
    assert_eq!(first_expr("f()"), "f()");
    assert_eq!(first_expr("f(1, 2 + 3, g(4))"), "f(1, (2 + 3), g(4))");
    assert_eq!(first_expr("f(1)(2)"), "f(1)(2)");
}

#[test]
fn test_parse_call_at_argument_limit() {
    let args: Vec<String> = (0..MAX_CALL_ARGUMENTS).map(|i| i.to_string()).collect();
    let program = parse_ok(&format!("f({})", args.join(", ")));

    let Node::Call { arguments, .. } = expression(&program.nodes[0]) else {
        panic!("expected a call");
    };
    assert_eq!(arguments.len(), MAX_CALL_ARGUMENTS);
}

#[test]
fn test_parse_too_many_arguments() {
    let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
    let program = parse_str(&format!("f({})", args.join(", ")));

    assert_eq!(first_error_name(&program), "TooManyArguments");
    assert_eq!(program.errors().len(), 1);
    assert_eq!(program.len(), 1);

    let Node::Call { arguments, .. } = expression(&program.nodes[0]) else {
        panic!("expected a call");
    };
    assert_eq!(arguments.len(), 255);
}

#[test]
fn test_parse_too_many_arguments_skips_nested_calls() {
    let mut args: Vec<String> = (0..MAX_CALL_ARGUMENTS).map(|i| i.to_string()).collect();
    args.push("g(1, (2))".to_string());
    args.push("3".to_string());
    let program = parse_str(&format!("f({})", args.join(", ")));

    assert_eq!(program.errors().len(), 1);
    assert_eq!(first_error_name(&program), "TooManyArguments");
}

fn overflowing_call(callee: &str) -> String {
    let args: Vec<String> = (0..=MAX_CALL_ARGUMENTS).map(|i| i.to_string()).collect();
    format!("{}({})", callee, args.join(", "))
}

#[test]
fn test_too_many_arguments_stops_function_body() {
    let program = parse_str(&format!("func g() {{ {}; h() }}", overflowing_call("f")));

    assert_eq!(program.errors().len(), 1);
    assert_eq!(first_error_name(&program), "TooManyArguments");
    assert_eq!(program.len(), 0);
}

#[test]
fn test_too_many_arguments_stops_list() {
    let program = parse_str(&format!("[{}, 1]", overflowing_call("f")));

    assert_eq!(program.errors().len(), 1);
    assert_eq!(first_error_name(&program), "TooManyArguments");
}

#[test]
fn test_too_many_arguments_stops_match_arms() {
    let program = parse_str(&format!("match x {{ 1 -> {}, 2 -> h() }}", overflowing_call("f")));

    assert_eq!(program.errors().len(), 1);
    assert_eq!(first_error_name(&program), "TooManyArguments");
}

#[test]
fn test_too_many_arguments_stops_outer_call_and_fields() {
    let program = parse_str(&format!("g({}, 2)", overflowing_call("f")));
    assert_eq!(program.errors().len(), 1);

    let program = parse_str(&format!("{{ a = {}, b = 2 }}", overflowing_call("f")));
    assert_eq!(program.errors().len(), 1);
}

#[test]
fn test_deep_nesting_is_reported() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let program = parse_str(&source);

    assert_eq!(program.errors().len(), 1);
    assert_eq!(first_error_name(&program), "NestingTooDeep");
    assert!(matches!(
        program.errors()[0].get_internal_error(),
        ErrorImpl::NestingTooDeep { max: MAX_NESTING_DEPTH }
    ));
    assert_eq!(program.len(), 0);

    let lists = parse_str(&format!("{}{}", "[".repeat(10_000), "]".repeat(10_000)));
    assert_eq!(first_error_name(&lists), "NestingTooDeep");
}

#[test]
fn test_deep_blocks_are_reported() {
    let source = format!(
        "{}1{}",
        "fn () -> { ".repeat(MAX_NESTING_DEPTH),
        " }".repeat(MAX_NESTING_DEPTH)
    );
    let program = parse_str(&source);

    assert_eq!(program.errors().len(), 1);
    assert_eq!(first_error_name(&program), "NestingTooDeep");
}

#[test]
fn test_moderate_nesting_parses() {
    let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    let program = parse_ok(&source);

    assert_eq!(program.len(), 1);
}

#[test]
fn test_parse_pipeline() {
    assert_eq!(first_expr("a |> f |> g"), "((a |> f) |> g)");
    assert_eq!(first_expr("x + 1 |> f"), "((x + 1) |> f)");
    assert_eq!(first_expr("xs |> map(double)"), "(xs |> map(double))");
}

#[test]
fn test_parse_assignment_is_right_associative() {
    let program = parse_ok("x = y = 1");
    let Node::Assignment { name, value } = expression(&program.nodes[0]) else {
        panic!("expected an assignment");
    };

    assert_eq!(name.value, "x");
    let Node::Assignment { name, value } = value.as_ref() else {
        panic!("expected a nested assignment");
    };
    assert_eq!(name.value, "y");
    assert_eq!(value.to_string(), "1");
}

#[test]
fn test_parse_invalid_assignment_target() {
    let program = parse_str("1 = 2");
    assert_eq!(first_error_name(&program), "InvalidAssignmentTarget");
    assert!(program.is_empty());
}

#[test]
fn test_parse_let() {
    let program = parse_ok("let x = 42");
    let Node::LetStatement { name, initializer } = &program.nodes[0] else {
        panic!("expected a let statement");
    };

    assert_eq!(name.value, "x");
    assert_eq!(initializer.get_node_type(), NodeType::Literal);
}

#[test]
fn test_parse_let_bang() {
    let program = parse_ok("let! y = read()");
    assert_eq!(program.nodes[0].get_node_type(), NodeType::LetBangStatement);
    assert_eq!(program.nodes[0].to_string(), "let! y = read()");
}

#[test]
fn test_parse_let_without_value() {
    let program = parse_str("let x");

    assert_eq!(first_error_name(&program), "ExpectedToken");
    assert!(program.is_empty());
}

#[test]
fn test_parse_let_missing_name() {
    let program = parse_str("let = 1");
    assert!(matches!(
        program.errors()[0].get_internal_error(),
        ErrorImpl::ExpectedToken { expected, .. } if expected == "variable name"
    ));
}

#[test]
fn test_parse_semicolons_are_optional() {
    let program = parse_ok("let a = 1; let b = 2;\nlet c = 3");
    assert_eq!(program.len(), 3);
}

#[test]
fn test_parse_empty_source() {
    let program = parse_ok("");
    assert!(program.is_empty());
    assert!(program.into_result().unwrap().is_empty());
}

#[test]
fn test_parse_function() {
    let program = parse_ok("func add(a, b) { a + b }");
    let Node::FunctionStatement { name, params, body } = &program.nodes[0] else {
        panic!("expected a function");
    };

    assert_eq!(name.value, "add");
    let names: Vec<&str> = params.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(body.len(), 1);
    assert_eq!(program.nodes[0].to_string(), "func add(a, b) { (a + b) }");
}

#[test]
fn test_parse_function_empty_body() {
    let program = parse_ok("func f() { }");
    let Node::FunctionStatement { params, body, .. } = &program.nodes[0] else {
        panic!("expected a function");
    };

    assert!(params.is_empty());
    assert!(body.is_empty());
}

#[test]
fn test_parse_function_nested_statements() {
    let program = parse_ok("func main() {\n  let x = 1;\n  print(x)\n}");
    assert_eq!(program.nodes[0].to_string(), "func main() { let x = 1; print(x) }");
}

fn parameter_error_message(source: &str) -> String {
    let program = parse_str(source);
    match program.errors()[0].get_internal_error() {
        ErrorImpl::MalformedParameterList { message, .. } => message.clone(),
        other => panic!("expected a parameter list error, found {:?}", other),
    }
}

#[test]
fn test_parse_parameter_list_errors() {
    assert_eq!(parameter_error_message("func f(a,) { }"), "trailing comma is not allowed");
    assert_eq!(parameter_error_message("func f(1) { }"), "expected parameter name");
    assert_eq!(parameter_error_message("func f(a b) { }"), "expected ',' or ')'");
    assert_eq!(parameter_error_message("func f(a"), "expected ',' or ')'");
}

#[test]
fn test_parse_unterminated_body() {
    let program = parse_str("func f() { let x = 1");

    assert_eq!(first_error_name(&program), "UnterminatedBlock");
    assert!(program.is_empty());
}

#[test]
fn test_parse_lambda() {
    let program = parse_ok("let add = fn (a, b) -> { a + b }");
    let Node::LetStatement { initializer, .. } = &program.nodes[0] else {
        panic!("expected a let statement");
    };

    let Node::LambdaExpression { params, body } = initializer.as_ref() else {
        panic!("expected a lambda");
    };
    assert_eq!(params.len(), 2);
    assert_eq!(body.len(), 1);
    assert_eq!(program.nodes[0].to_string(), "let add = fn(a, b) -> { (a + b) }");
}

#[test]
fn test_parse_lambda_missing_arrow() {
    let program = parse_str("fn (a) { a }");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

fn arm_count(source: &str) -> usize {
    let program = parse_ok(source);
    match &program.nodes[0] {
        Node::MatchStatement { arms, .. } => arms.len(),
        other => panic!("expected a match, found {:?}", other),
    }
}

#[test]
fn test_parse_match_arms() {
    assert_eq!(arm_count("match x { 1 -> a, 2 -> b, }"), 2);
    assert_eq!(arm_count("match x { 1 -> a, 2 -> b }"), 2);
    assert_eq!(arm_count("match x {\n  1 -> a\n  2 -> b\n}"), 2);
    assert_eq!(arm_count("match x { }"), 0);
}

#[test]
fn test_parse_match_print() {
    let program = parse_ok("match shape { Shape::Circle { r } -> r * r, _ -> 0 }");
    assert_eq!(
        program.nodes[0].to_string(),
        "match shape {\n  Shape::Circle { r = r } -> (r * r),\n  _ -> 0,\n}"
    );
}

#[test]
fn test_parse_match_unterminated() {
    let program = parse_str("match x { 1 -> a");
    assert_eq!(first_error_name(&program), "UnterminatedBlock");
}

#[test]
fn test_parse_match_missing_arrow() {
    let program = parse_str("match x { 1 a }");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_import() {
    let program = parse_ok("import \"IO\"\nimport math");

    assert_eq!(program.len(), 2);
    assert_eq!(program.nodes[0].to_string(), "import \"IO\"");
    assert_eq!(program.nodes[1].to_string(), "import math");
}

#[test]
fn test_parse_import_requires_path() {
    let program = parse_str("import 42");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_enum() {
    let program = parse_ok("enum Shape { Circle { radius }, Rect { w, h, }, Empty, }");
    let Node::EnumStatement { name, variants } = &program.nodes[0] else {
        panic!("expected an enum");
    };

    assert_eq!(name.value, "Shape");
    let table: Vec<(&str, usize)> = variants
        .iter()
        .map(|v| (v.name.value.as_str(), v.field_count()))
        .collect();
    assert_eq!(table, [("Circle", 1), ("Rect", 2), ("Empty", 0)]);
    assert_eq!(variants[1].fields[1].value, "h");
}

#[test]
fn test_parse_enum_unterminated() {
    let program = parse_str("enum Color { Red, Green,");
    assert_eq!(first_error_name(&program), "UnterminatedBlock");
}

#[test]
fn test_parse_enum_constructor() {
    let program = parse_ok("Shape::Rect { w, h = 2 }");
    let Node::EnumConstructor { enum_name, variant, field_names, field_values } =
        expression(&program.nodes[0])
    else {
        panic!("expected an enum constructor");
    };

    assert_eq!(enum_name.value, "Shape");
    assert_eq!(variant.value, "Rect");
    assert_eq!(field_names.len(), 2);
    assert_eq!(field_values[0].get_node_type(), NodeType::Variable);
    assert_eq!(field_values[1].to_string(), "2");
}

#[test]
fn test_parse_enum_constructor_without_fields() {
    assert_eq!(first_expr("Color::Red"), "Color::Red");
    assert_eq!(first_expr("paint(Color::Red)"), "paint(Color::Red)");
}

#[test]
fn test_parse_enum_constructor_requires_name() {
    let program = parse_str("1::A");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_list() {
    assert_eq!(first_expr("[1, 2, 3,]"), "[1, 2, 3]");
    assert_eq!(first_expr("[]"), "[]");
    assert_eq!(first_expr("[[1], [2, 3]]"), "[[1], [2, 3]]");
}

#[test]
fn test_parse_list_unclosed() {
    let program = parse_str("[1, 2");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_struct_literal() {
    assert_eq!(first_expr("{ x = 1, y = 2 }"), "{ x = 1, y = 2 }");
    assert_eq!(first_expr("{}"), "{ }");

    let program = parse_ok("{ x = 1, y = 2, }");
    let Node::StructLiteral { keys, values } = expression(&program.nodes[0]) else {
        panic!("expected a struct literal");
    };
    assert_eq!(keys.len(), values.len());
}

#[test]
fn test_parse_struct_literal_requires_values() {
    let program = parse_str("{ x = 1, y }");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_destructure_pattern() {
    let program = parse_ok("{ a, b, }");
    let Node::DestructurePattern { bindings } = expression(&program.nodes[0]) else {
        panic!("expected a destructure pattern");
    };

    let names: Vec<&str> = bindings.iter().map(|b| b.value.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_parse_struct_update() {
    assert_eq!(first_expr("p <- { x = 3 }"), "p <- { x = 3 }");
    assert_eq!(first_expr("p <- { x = p.x + 1, y = 0 }"), "p <- { x = (p.x + 1), y = 0 }");
}

#[test]
fn test_parse_member_requires_identifier() {
    let program = parse_str("a.1");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_unclosed_grouping() {
    let program = parse_str("(1 + 2");
    assert_eq!(first_error_name(&program), "ExpectedToken");
}

#[test]
fn test_parse_unexpected_token() {
    let program = parse_str(")");
    assert_eq!(first_error_name(&program), "UnexpectedToken");
}

#[test]
fn test_parse_missing_operand() {
    let program = parse_str("1 +");
    assert_eq!(first_error_name(&program), "UnexpectedEndOfInput");
}

#[test]
fn test_parse_stops_at_first_error() {
    let program = parse_str(") let a = 1");

    assert!(program.is_empty());
    assert_eq!(program.errors().len(), 1);
}

#[test]
fn test_parse_keeps_statements_before_error() {
    let program = parse_str("let a = 1\nlet b = )\nlet c = 3");

    assert_eq!(program.len(), 1);
    assert_eq!(program.nodes[0].to_string(), "let a = 1");
    assert_eq!(program.errors()[0].get_position().0, 18);

    let error = program.into_result().unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_is_deterministic() {
    let source = "import \"IO\"\nfunc main() { let x = [1, 2] |> sum; print(x) }\nmain()";
    assert_eq!(parse_str(source), parse_str(source));
}

#[test]
fn test_parser_navigation() {
    let tokens = tokenize("let x = 1".to_string(), None).unwrap();
    let mut parser = Parser::new(TokenStream::new(tokens));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert!(!parser.eat(TokenKind::Identifier));
    assert!(parser.eat(TokenKind::Let));
    assert_eq!(parser.previous_token().kind, TokenKind::Let);

    let name = parser.expect(TokenKind::Identifier, "name").unwrap();
    assert_eq!(name.value, "x");
    assert!(!parser.had_error());

    assert!(parser.expect(TokenKind::Number, "a number").is_err());
    assert!(parser.had_error());
    assert_eq!(parser.errors().len(), 1);
}

#[test]
fn test_parse_expr_at_end_of_input() {
    let tokens = tokenize(String::new(), None).unwrap();
    let mut parser = Parser::new(TokenStream::new(tokens));

    assert!(parse_expr(&mut parser, BindingPower::Default).unwrap().is_none());
    assert!(!parser.had_error());
}

#[test]
fn test_custom_rules_default_infix_handler() {
    let mut rules = ParseRules::new();
    rules.nud(TokenKind::Number, parse_literal_expr);
    rules.binding_power(TokenKind::Plus, BindingPower::Additive);

    let tokens = tokenize("1 + 2".to_string(), None).unwrap();
    let mut parser = Parser::with_rules(TokenStream::new(tokens), &rules);

    let error = parse_expr(&mut parser, BindingPower::Default).unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedInfixOperator");
    assert!(parser.had_error());
}

#[test]
fn test_custom_rules_without_infix_handler_stop() {
    let mut rules = ParseRules::new();
    rules.nud(TokenKind::Number, parse_literal_expr);
    rules.binding_power(TokenKind::Plus, BindingPower::Additive);
    rules.set_default_led(None);

    let tokens = tokenize("1 + 2".to_string(), None).unwrap();
    let mut parser = Parser::with_rules(TokenStream::new(tokens), &rules);

    let node = parse_expr(&mut parser, BindingPower::Default).unwrap().unwrap();
    assert_eq!(node.to_string(), "1");
    assert!(!parser.had_error());
}

#[test]
fn test_custom_rules_without_statements() {
    let mut rules = ParseRules::new();
    rules.nud(TokenKind::Identifier, super::expr::parse_variable_expr);

    let tokens = tokenize("let".to_string(), None).unwrap();
    let mut parser = Parser::with_rules(TokenStream::new(tokens), &rules);
    let program = parser.parse_program();

    assert_eq!(first_error_name(&program), "UnexpectedToken");
}

#[test]
fn test_default_rules_binding_powers() {
    let rules = ParseRules::default_rules();

    assert!(rules.get_binding_power(TokenKind::Dot) > rules.get_binding_power(TokenKind::OpenParen));
    assert!(rules.get_binding_power(TokenKind::OpenParen) > BindingPower::Unary);
    assert!(rules.get_binding_power(TokenKind::Star) > rules.get_binding_power(TokenKind::Plus));
    assert_eq!(rules.get_binding_power(TokenKind::Comma), BindingPower::Default);
    assert!(rules.get_stmt(TokenKind::Identifier).is_none());
    assert!(rules.get_nud(TokenKind::CloseParen).is_none());
}
