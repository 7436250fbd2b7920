use std::slice::Iter;

use crate::{errors::errors::Error, lexer::tokens::Token};

/// Node Types
///
/// One tag per syntactic form, mirroring the variants of [`Node`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Literal,
    BoolLiteral,
    Unary,
    Binary,
    Variable,
    Grouping,
    Assignment,
    Call,
    PropertyAccess,
    Pipeline,
    LetStatement,
    LetBangStatement,
    ExpressionStatement,
    FunctionStatement,
    LambdaExpression,
    MatchStatement,
    ImportStatement,
    ListLiteral,
    StructLiteral,
    StructUpdate,
    EnumStatement,
    EnumConstructor,
    DestructurePattern,
    Error,
}

/// A node of the syntax tree.
///
/// Every child is exclusively owned by its parent. Tokens are copies of the
/// lexer's tokens and carry the source span used for diagnostics.
///
/// Dropping a node releases its whole subtree without recursing, see
/// [`crate::ast::release`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal {
        token: Token,
    },
    BoolLiteral {
        value: bool,
        token: Token,
    },
    Unary {
        operator: Token,
        right: Box<Node>,
    },
    Binary {
        left: Box<Node>,
        operator: Token,
        right: Box<Node>,
    },
    Variable {
        name: Token,
    },
    Grouping {
        expression: Box<Node>,
    },
    Assignment {
        name: Token,
        value: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    PropertyAccess {
        object: Box<Node>,
        property: Token,
    },
    Pipeline {
        left: Box<Node>,
        right: Box<Node>,
    },
    LetStatement {
        name: Token,
        initializer: Box<Node>,
    },
    LetBangStatement {
        name: Token,
        initializer: Box<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    FunctionStatement {
        name: Token,
        params: Vec<Token>,
        body: Vec<Node>,
    },
    LambdaExpression {
        params: Vec<Token>,
        body: Vec<Node>,
    },
    MatchStatement {
        value: Box<Node>,
        arms: Vec<MatchArm>,
    },
    ImportStatement {
        path: Token,
    },
    ListLiteral {
        elements: Vec<Node>,
    },
    /// `keys[i]` is bound to `values[i]`.
    StructLiteral {
        keys: Vec<Token>,
        values: Vec<Node>,
    },
    StructUpdate {
        base: Box<Node>,
        keys: Vec<Token>,
        values: Vec<Node>,
    },
    EnumStatement {
        name: Token,
        variants: Vec<EnumVariant>,
    },
    EnumConstructor {
        enum_name: Token,
        variant: Token,
        field_names: Vec<Token>,
        field_values: Vec<Node>,
    },
    DestructurePattern {
        bindings: Vec<Token>,
    },
    Error,
}

impl Node {
    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::Literal { .. } => NodeType::Literal,
            Node::BoolLiteral { .. } => NodeType::BoolLiteral,
            Node::Unary { .. } => NodeType::Unary,
            Node::Binary { .. } => NodeType::Binary,
            Node::Variable { .. } => NodeType::Variable,
            Node::Grouping { .. } => NodeType::Grouping,
            Node::Assignment { .. } => NodeType::Assignment,
            Node::Call { .. } => NodeType::Call,
            Node::PropertyAccess { .. } => NodeType::PropertyAccess,
            Node::Pipeline { .. } => NodeType::Pipeline,
            Node::LetStatement { .. } => NodeType::LetStatement,
            Node::LetBangStatement { .. } => NodeType::LetBangStatement,
            Node::ExpressionStatement { .. } => NodeType::ExpressionStatement,
            Node::FunctionStatement { .. } => NodeType::FunctionStatement,
            Node::LambdaExpression { .. } => NodeType::LambdaExpression,
            Node::MatchStatement { .. } => NodeType::MatchStatement,
            Node::ImportStatement { .. } => NodeType::ImportStatement,
            Node::ListLiteral { .. } => NodeType::ListLiteral,
            Node::StructLiteral { .. } => NodeType::StructLiteral,
            Node::StructUpdate { .. } => NodeType::StructUpdate,
            Node::EnumStatement { .. } => NodeType::EnumStatement,
            Node::EnumConstructor { .. } => NodeType::EnumConstructor,
            Node::DestructurePattern { .. } => NodeType::DestructurePattern,
            Node::Error => NodeType::Error,
        }
    }

    /// Wraps an expression so it can stand where a statement is expected.
    pub fn into_statement(self) -> Node {
        Node::ExpressionStatement {
            expression: Box::new(self),
        }
    }
}

/// One `pattern -> expression` clause of a match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Node,
    pub expression: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: Token,
    pub fields: Vec<Token>,
}

impl EnumVariant {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// The top-level statements of a parsed source, in source order.
///
/// A program produced by a failed parse still holds every statement that
/// was completed before the first error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: Vec<Node>,
    errors: Vec<Error>,
}

impl Program {
    pub fn new(nodes: Vec<Node>, errors: Vec<Error>) -> Self {
        Program { nodes, errors }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every diagnostic reported while parsing, in the order they occurred.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// All-or-nothing view: the statements when parsing succeeded, the first
    /// error otherwise.
    pub fn into_result(mut self) -> Result<Vec<Node>, Error> {
        if self.errors.is_empty() {
            Ok(std::mem::take(&mut self.nodes))
        } else {
            Err(self.errors.swap_remove(0))
        }
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Node;
    type IntoIter = Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
