//! Source-like rendering of the tree, for debugging.
//!
//! Binary operators and pipelines are fully parenthesized so that the shape
//! of the tree can be read off the output.

use std::fmt::{self, Display, Formatter};

use crate::lexer::tokens::Token;

use super::ast::{Node, Program};

fn write_separated<T, F>(f: &mut Formatter<'_>, items: &[T], separator: &str, mut write_item: F) -> fmt::Result
where
    F: FnMut(&mut Formatter<'_>, &T) -> fmt::Result,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

fn write_tokens(f: &mut Formatter<'_>, tokens: &[Token]) -> fmt::Result {
    write_separated(f, tokens, ", ", |f, token| f.write_str(&token.lexeme()))
}

fn write_body(f: &mut Formatter<'_>, body: &[Node]) -> fmt::Result {
    if body.is_empty() {
        return f.write_str("{ }");
    }
    f.write_str("{ ")?;
    write_separated(f, body, "; ", |f, node| write!(f, "{}", node))?;
    f.write_str(" }")
}

fn write_fields(f: &mut Formatter<'_>, keys: &[Token], values: &[Node]) -> fmt::Result {
    if keys.is_empty() {
        return f.write_str("{ }");
    }
    f.write_str("{ ")?;
    for (i, (key, value)) in keys.iter().zip(values).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} = {}", key.value, value)?;
    }
    f.write_str(" }")
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal { token } => f.write_str(&token.lexeme()),
            Node::BoolLiteral { value, .. } => write!(f, "{}", value),
            Node::Unary { operator, right } => write!(f, "{}({})", operator.value, right),
            Node::Binary { left, operator, right } => {
                write!(f, "({} {} {})", left, operator.value, right)
            }
            Node::Variable { name } => f.write_str(&name.value),
            Node::Grouping { expression } => write!(f, "({})", expression),
            Node::Assignment { name, value } => write!(f, "{} = {}", name.value, value),
            Node::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                write_separated(f, arguments, ", ", |f, arg| write!(f, "{}", arg))?;
                f.write_str(")")
            }
            Node::PropertyAccess { object, property } => write!(f, "{}.{}", object, property.value),
            Node::Pipeline { left, right } => write!(f, "({} |> {})", left, right),
            Node::LetStatement { name, initializer } => {
                write!(f, "let {} = {}", name.value, initializer)
            }
            Node::LetBangStatement { name, initializer } => {
                write!(f, "let! {} = {}", name.value, initializer)
            }
            Node::ExpressionStatement { expression } => write!(f, "{}", expression),
            Node::FunctionStatement { name, params, body } => {
                write!(f, "func {}(", name.value)?;
                write_tokens(f, params)?;
                f.write_str(") ")?;
                write_body(f, body)
            }
            Node::LambdaExpression { params, body } => {
                f.write_str("fn(")?;
                write_tokens(f, params)?;
                f.write_str(") -> ")?;
                write_body(f, body)
            }
            Node::MatchStatement { value, arms } => {
                writeln!(f, "match {} {{", value)?;
                for arm in arms {
                    writeln!(f, "  {} -> {},", arm.pattern, arm.expression)?;
                }
                f.write_str("}")
            }
            Node::ImportStatement { path } => write!(f, "import {}", path.lexeme()),
            Node::ListLiteral { elements } => {
                f.write_str("[")?;
                write_separated(f, elements, ", ", |f, element| write!(f, "{}", element))?;
                f.write_str("]")
            }
            Node::StructLiteral { keys, values } => write_fields(f, keys, values),
            Node::StructUpdate { base, keys, values } => {
                write!(f, "{} <- ", base)?;
                write_fields(f, keys, values)
            }
            Node::EnumStatement { name, variants } => {
                writeln!(f, "enum {} {{", name.value)?;
                for (i, variant) in variants.iter().enumerate() {
                    write!(f, "  {}", variant.name.value)?;
                    if variant.field_count() > 0 {
                        f.write_str(" { ")?;
                        write_tokens(f, &variant.fields)?;
                        f.write_str(" }")?;
                    }
                    if i + 1 < variants.len() {
                        f.write_str(",")?;
                    }
                    writeln!(f)?;
                }
                f.write_str("}")
            }
            Node::EnumConstructor { enum_name, variant, field_names, field_values } => {
                write!(f, "{}::{}", enum_name.value, variant.value)?;
                if !field_names.is_empty() {
                    f.write_str(" ")?;
                    write_fields(f, field_names, field_values)?;
                }
                Ok(())
            }
            Node::DestructurePattern { bindings } => {
                f.write_str("{ ")?;
                write_tokens(f, bindings)?;
                f.write_str(" }")
            }
            Node::Error => f.write_str("<error>"),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for node in self {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}
